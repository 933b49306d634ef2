use std::{path::Path, sync::Arc};

use image::RgbImage;
use threadpool::ThreadPool;

use crate::{
    error::Error,
    extractor::DominantColorExtractor,
    grid::GridPlan,
    logger::log_dominant_colors,
    raster::{self, path_name},
    reconstructor::reconstruct,
    Result,
};

pub const DEFAULT_SQUARE_SIZE: u32 = 10;
pub const DEFAULT_QUALITY: u8 = 75;

/// Side length of a block in pixels, always greater than 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SquareSize(u32);

impl SquareSize {
    pub const MINIMUM_EXCLUSIVE: u32 = 2;

    pub fn new(value: u32) -> Result<Self> {
        if value <= Self::MINIMUM_EXCLUSIVE {
            return Err(Error::InvalidSquareSize(value));
        }
        Ok(SquareSize(value))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for SquareSize {
    fn default() -> Self {
        SquareSize(DEFAULT_SQUARE_SIZE)
    }
}

impl TryFrom<u32> for SquareSize {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        SquareSize::new(value)
    }
}

fn validate_quality(quality: u8) -> Result<u8> {
    match quality {
        1..=100 => Ok(quality),
        _ => Err(Error::InvalidQuality(quality)),
    }
}

pub struct PixelartConverter {
    square_size: SquareSize,
    quality: u8,
    threadpool: ThreadPool,
}

impl PixelartConverter {
    pub fn new(square_size: u32) -> Result<Self> {
        Ok(PixelartConverter {
            square_size: SquareSize::new(square_size)?,
            quality: DEFAULT_QUALITY,
            threadpool: ThreadPool::new(1),
        })
    }

    pub fn with_quality(mut self, quality: u8) -> Result<Self> {
        self.quality = validate_quality(quality)?;
        Ok(self)
    }

    /// Worker threads used for color extraction; zero is treated as one.
    pub fn with_threads(mut self, number_of_threads: usize) -> Self {
        self.threadpool = ThreadPool::new(number_of_threads.max(1));
        self
    }

    pub fn set_square_size(&mut self, square_size: u32) -> Result<&mut Self> {
        self.square_size = SquareSize::new(square_size)?;
        Ok(self)
    }

    pub fn square_size(&self) -> u32 {
        self.square_size.get()
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    pub fn number_of_threads(&self) -> usize {
        self.threadpool.max_count()
    }

    /// Replaces every whole block of `image` by its dominant color.
    pub fn pixelize_image(&self, image: RgbImage) -> RgbImage {
        let square_size = self.square_size.get();
        let (width, height) = image.dimensions();
        let plan = GridPlan::new(width, height, square_size);
        log::info!(
            "Partitioning {}x{} image into {}x{} squares of {} pixels",
            width,
            height,
            plan.horizontal_count(),
            plan.vertical_count(),
            square_size
        );
        let image = Arc::new(image);
        let extractor = DominantColorExtractor::new(square_size, &self.threadpool);
        let colors = extractor.extract(&image, &plan);
        drop(image);
        log_dominant_colors(&colors);
        reconstruct(width, height, square_size, &colors)
    }

    /// Reads the JPEG at `source`, pixelizes it and stores it as JPEG at
    /// `destination`, whatever extension `destination` carries.
    pub fn pixelize(&self, source: &Path, destination: &Path) -> Result<()> {
        if !source.exists() {
            return Err(Error::InputFileNotFound(path_name(source)));
        }
        if !raster::has_supported_extension(source) {
            return Err(Error::UnsupportedFileExtension(path_name(source)));
        }
        let image = raster::read_jpeg_file(source)?;
        let output_image = self.pixelize_image(image);
        raster::write_jpeg_file(&output_image, destination, self.quality)?;
        log::info!("Pixel art written to {}", destination.display());
        Ok(())
    }
}

impl Default for PixelartConverter {
    fn default() -> Self {
        PixelartConverter {
            square_size: SquareSize::default(),
            quality: DEFAULT_QUALITY,
            threadpool: ThreadPool::new(1),
        }
    }
}
