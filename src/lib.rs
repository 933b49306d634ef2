use std::path::PathBuf;

pub use cli::CLIParser;
pub use color::RGBColorFormat;
pub use converter::{PixelartConverter, SquareSize, DEFAULT_QUALITY, DEFAULT_SQUARE_SIZE};
pub use error::Error;
pub use extractor::{dominant_color, ColorHistogram, DominantColorExtractor, DominantColorGrid};
pub use grid::{Cell, GridPlan};
pub use reconstructor::{reconstruct, BACKGROUND};

mod cli;
mod color;
mod converter;
mod error;
mod extractor;
mod grid;
mod logger;
pub mod raster;
mod reconstructor;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    input_file: PathBuf,
    output_file: PathBuf,
    square_size: u32,
    quality: u8,
    number_of_threads: usize,
}

impl TryFrom<&Arguments> for PixelartConverter {
    type Error = Error;

    fn try_from(value: &Arguments) -> Result<Self> {
        Ok(PixelartConverter::new(value.square_size)?
            .with_quality(value.quality)?
            .with_threads(value.number_of_threads))
    }
}

pub fn pixelize(arguments: &Arguments) -> Result<()> {
    let converter = PixelartConverter::try_from(arguments)?;
    converter.pixelize(&arguments.input_file, &arguments.output_file)
}
