use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use image::RgbImage;
use reader::jpeg::JpegImageReader;
use writer::jpeg::JpegImageWriter;

use crate::{error::Error, Result};

pub mod reader;
pub mod writer;

/// Extensions accepted for input files, compared ASCII case-insensitively.
pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

const TEMPORARY_FILE_PREFIX: &str = ".pixelart-";
const TEMPORARY_FILE_SUFFIX: &str = ".tmp";
/// Requested mode of output files before the umask is applied, as with `File::create`.
#[cfg(unix)]
const OUTPUT_FILE_MODE: u32 = 0o666;

pub trait ImageReader {
    fn read_image(&mut self) -> Result<RgbImage>;
}

pub trait ImageWriter {
    fn write_image(&mut self) -> Result<()>;
}

pub(crate) fn path_name(path: &Path) -> String {
    path.display().to_string()
}

pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(extension))
        })
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path)
        .map_err(|e| Error::UnableToOpenInputFileForReading(path_name(file_path), e))
}

pub fn read_jpeg_file(file_path: &Path) -> Result<RgbImage> {
    let input_file = open_input_file(file_path)?;
    let mut reader = JpegImageReader::new(BufReader::new(input_file), path_name(file_path));
    reader.read_image()
}

fn output_directory(file_path: &Path) -> &Path {
    match file_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn temporary_file_builder() -> tempfile::Builder<'static, 'static> {
    let mut builder = tempfile::Builder::new();
    builder
        .prefix(TEMPORARY_FILE_PREFIX)
        .suffix(TEMPORARY_FILE_SUFFIX);
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(OUTPUT_FILE_MODE));
    }
    builder
}

/// Encodes `image` as JPEG next to `file_path` and moves it into place once
/// the encoder finished, so a failed write never leaves a truncated file.
pub fn write_jpeg_file(image: &RgbImage, file_path: &Path, quality: u8) -> Result<()> {
    let mut temporary_file = temporary_file_builder()
        .tempfile_in(output_directory(file_path))
        .map_err(|e| Error::UnableToOpenOutputFileForWriting(path_name(file_path), e))?;
    log::debug!(
        "Writing {}x{} image to temporary file {}",
        image.width(),
        image.height(),
        temporary_file.path().display()
    );
    {
        let output_file_writer = BufWriter::new(temporary_file.as_file_mut());
        let mut writer =
            JpegImageWriter::new(output_file_writer, image, quality, path_name(file_path));
        writer.write_image()?;
    }
    temporary_file
        .persist(file_path)
        .map_err(|e| Error::UnableToPersistOutputFile(path_name(file_path), e.error))?;
    Ok(())
}
