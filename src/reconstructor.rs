use image::{Rgb, RgbImage};

use crate::{color::RGBColorFormat, extractor::DominantColorGrid};

/// Color of every pixel that is not covered by a grid cell.
pub const BACKGROUND: RGBColorFormat = RGBColorFormat::black();

/// Paints a `width` x `height` image with one flat square per grid cell.
///
/// Cells overwrite the background completely. The strips left over at the
/// right and bottom edge keep the [`BACKGROUND`] color.
pub fn reconstruct(
    width: u32,
    height: u32,
    square_size: u32,
    grid: &DominantColorGrid,
) -> RgbImage {
    let mut image = RgbImage::from_pixel(width, height, Rgb::from(BACKGROUND));
    for (cell, color) in grid.cells() {
        let (left, top) = cell.origin(square_size);
        fill_square(&mut image, left, top, square_size, Rgb::from(color));
    }
    image
}

fn fill_square(image: &mut RgbImage, left: u32, top: u32, square_size: u32, pixel: Rgb<u8>) {
    let right = (left + square_size).min(image.width());
    let bottom = (top + square_size).min(image.height());
    for y in top..bottom {
        for x in left..right {
            image.put_pixel(x, y, pixel);
        }
    }
}
