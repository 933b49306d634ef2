use std::io::{BufRead, Seek};

use image::{ImageFormat, RgbImage};

use super::super::ImageReader;
use crate::Error;

pub struct JpegImageReader<T: BufRead + Seek> {
    reader: T,
    source_name: String,
}

impl<T: BufRead + Seek> JpegImageReader<T> {
    pub fn new(reader: T, source_name: String) -> Self {
        Self {
            reader,
            source_name,
        }
    }
}

impl<T: BufRead + Seek> ImageReader for JpegImageReader<T> {
    fn read_image(&mut self) -> crate::Result<RgbImage> {
        let decoded = image::ImageReader::with_format(&mut self.reader, ImageFormat::Jpeg)
            .decode()
            .map_err(|e| Error::UnableToDecodeInputImage(self.source_name.clone(), e))?;
        log::info!(
            "Decoded {} ({}x{}, {:?})",
            self.source_name,
            decoded.width(),
            decoded.height(),
            decoded.color()
        );
        Ok(decoded.to_rgb8())
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use image::{codecs::jpeg::JpegEncoder, Rgb, RgbImage};

    use super::JpegImageReader;
    use crate::{error::Error, raster::ImageReader};

    fn encoded_jpeg(image: &RgbImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut bytes, 100)
            .encode_image(image)
            .expect("Encoding failed");
        bytes
    }

    #[test]
    fn read_uniform_image() {
        let bytes = encoded_jpeg(&RgbImage::from_pixel(16, 16, Rgb([128, 128, 128])));
        let mut reader = JpegImageReader::new(Cursor::new(bytes), "memory".to_owned());
        let image = reader.read_image().expect("Decoding failed");
        assert_eq!(image.dimensions(), (16, 16));
        let pixel = image.get_pixel(8, 8);
        assert!(pixel.0.iter().all(|channel| channel.abs_diff(128) <= 2));
    }

    #[test]
    fn read_truncated_data_fails() {
        let mut bytes = encoded_jpeg(&RgbImage::new(16, 16));
        bytes.truncate(20);
        let mut reader = JpegImageReader::new(Cursor::new(bytes), "memory".to_owned());
        match reader.read_image() {
            Err(Error::UnableToDecodeInputImage(name, _)) => assert_eq!(name, "memory"),
            other => panic!("Unexpected result: {:?}", other.map(|i| i.dimensions())),
        }
    }
}
