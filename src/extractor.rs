use std::{collections::HashMap, sync::mpsc, sync::Arc};

use image::RgbImage;
use threadpool::ThreadPool;

use crate::{
    color::{PackedColor, RGBColorFormat},
    grid::{Cell, GridPlan},
};

#[derive(Clone, Copy)]
struct ColorCount {
    count: u32,
    first_seen: usize,
}

/// Occurrence counts of the colors inside one block.
///
/// Every color remembers the scan position it was first seen at, so the
/// winner among equally frequent colors does not depend on the iteration
/// order of the underlying map.
#[derive(Default)]
pub struct ColorHistogram {
    counts: HashMap<PackedColor, ColorCount>,
    position: usize,
}

impl ColorHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ColorHistogram {
            counts: HashMap::with_capacity(capacity),
            position: 0,
        }
    }

    pub fn add(&mut self, color: PackedColor) {
        let position = self.position;
        self.counts
            .entry(color)
            .and_modify(|entry| entry.count += 1)
            .or_insert(ColorCount {
                count: 1,
                first_seen: position,
            });
        self.position += 1;
    }

    pub fn count(&self, color: PackedColor) -> u32 {
        self.counts.get(&color).map_or(0, |entry| entry.count)
    }

    pub fn distinct_colors(&self) -> usize {
        self.counts.len()
    }

    /// Most frequent color; ties go to the color seen first.
    pub fn dominant(&self) -> Option<RGBColorFormat> {
        self.counts
            .iter()
            .max_by(|(_, left), (_, right)| {
                left.count
                    .cmp(&right.count)
                    .then(right.first_seen.cmp(&left.first_seen))
            })
            .map(|(color, _)| RGBColorFormat::unpack(*color))
    }
}

fn block_area(square_size: u32) -> usize {
    (square_size as usize).pow(2)
}

/// Dominant color of the square block with top left corner `origin`.
///
/// Pixels are visited column by column (x outer, y inner); this scan order
/// decides ties. The block must lie completely inside the image.
pub fn dominant_color(image: &RgbImage, origin: (u32, u32), square_size: u32) -> RGBColorFormat {
    let (left, top) = origin;
    let mut histogram = ColorHistogram::with_capacity(block_area(square_size));
    for x in left..left + square_size {
        for y in top..top + square_size {
            histogram.add(RGBColorFormat::from(image.get_pixel(x, y)).pack());
        }
    }
    histogram.dominant().unwrap_or_default()
}

fn dominant_colors_of_row(
    image: &RgbImage,
    plan: &GridPlan,
    row: u32,
    square_size: u32,
) -> Vec<RGBColorFormat> {
    plan.row_cells(row)
        .map(|cell| dominant_color(image, cell.origin(square_size), square_size))
        .collect()
}

/// Dominant colors of all cells of a [`GridPlan`], stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DominantColorGrid {
    rows: u32,
    columns: u32,
    colors: Vec<RGBColorFormat>,
}

impl DominantColorGrid {
    pub fn new(rows: u32, columns: u32, colors: Vec<RGBColorFormat>) -> Self {
        assert_eq!(
            colors.len(),
            rows as usize * columns as usize,
            "Number of colors must match the grid dimensions"
        );
        DominantColorGrid {
            rows,
            columns,
            colors,
        }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, row: u32, column: u32) -> Option<RGBColorFormat> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        Some(self.colors[(row * self.columns + column) as usize])
    }

    pub fn row(&self, row: u32) -> &[RGBColorFormat] {
        let start = (row * self.columns) as usize;
        &self.colors[start..start + self.columns as usize]
    }

    pub fn cells(&self) -> impl Iterator<Item = (Cell, RGBColorFormat)> + '_ {
        let columns = self.columns.max(1);
        self.colors.iter().enumerate().map(move |(index, color)| {
            let index = index as u32;
            let cell = Cell {
                row: index / columns,
                column: index % columns,
            };
            (cell, *color)
        })
    }
}

pub struct DominantColorExtractor<'a> {
    square_size: u32,
    threadpool: &'a ThreadPool,
}

impl<'a> DominantColorExtractor<'a> {
    pub fn new(square_size: u32, threadpool: &'a ThreadPool) -> Self {
        DominantColorExtractor {
            square_size,
            threadpool,
        }
    }

    /// Computes the dominant color of every cell, one pool job per grid row.
    ///
    /// Returns only after all rows are collected.
    pub fn extract(&self, image: &Arc<RgbImage>, plan: &GridPlan) -> DominantColorGrid {
        let rows = plan.vertical_count();
        let columns = plan.horizontal_count();
        log::debug!(
            "Extracting dominant colors of {}x{} cells on {} threads",
            columns,
            rows,
            self.threadpool.max_count()
        );

        let (sender, receiver) = mpsc::channel();
        for row in 0..rows {
            let sender = sender.clone();
            let image = Arc::clone(image);
            let plan = *plan;
            let square_size = self.square_size;
            self.threadpool.execute(move || {
                let colors = dominant_colors_of_row(&image, &plan, row, square_size);
                let _ = sender.send((row, colors));
            });
        }
        drop(sender);

        let mut collected: Vec<Option<Vec<RGBColorFormat>>> = vec![None; rows as usize];
        for (row, colors) in receiver.iter() {
            collected[row as usize] = Some(colors);
        }

        let colors: Vec<RGBColorFormat> = collected
            .into_iter()
            .flat_map(|row_colors| {
                row_colors.expect("Extraction worker panicked before reporting its row")
            })
            .collect();
        DominantColorGrid::new(rows, columns, colors)
    }
}
