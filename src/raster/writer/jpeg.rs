use std::io::Write;

use image::{codecs::jpeg::JpegEncoder, ImageError, RgbImage};

use super::super::ImageWriter;
use crate::Error;

pub struct JpegImageWriter<'a, T: Write> {
    writer: T,
    image: &'a RgbImage,
    quality: u8,
    destination_name: String,
}

impl<'a, T: Write> JpegImageWriter<'a, T> {
    pub fn new(writer: T, image: &'a RgbImage, quality: u8, destination_name: String) -> Self {
        Self {
            writer,
            image,
            quality,
            destination_name,
        }
    }

    fn encoding_error(&self, error: ImageError) -> Error {
        Error::UnableToEncodeOutputImage(self.destination_name.clone(), error)
    }
}

impl<T: Write> ImageWriter for JpegImageWriter<'_, T> {
    fn write_image(&mut self) -> crate::Result<()> {
        let encoded =
            JpegEncoder::new_with_quality(&mut self.writer, self.quality).encode_image(self.image);
        if let Err(e) = encoded {
            return Err(self.encoding_error(e));
        }
        if let Err(e) = self.writer.flush() {
            return Err(self.encoding_error(ImageError::IoError(e)));
        }
        log::info!(
            "Encoded {}x{} image for {} with quality {}",
            self.image.width(),
            self.image.height(),
            self.destination_name,
            self.quality
        );
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::io::{self, Write};

    use image::{Rgb, RgbImage};

    use super::JpegImageWriter;
    use crate::{error::Error, raster::ImageWriter};

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::StorageFull))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_starts_with_jpeg_marker() {
        let image = RgbImage::from_pixel(4, 4, Rgb([1, 1, 1]));
        let mut bytes = Vec::new();
        JpegImageWriter::new(&mut bytes, &image, 75, "memory".to_owned())
            .write_image()
            .expect("Encoding failed");
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        assert_eq!(&bytes[bytes.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn write_failure_is_reported_with_destination() {
        let image = RgbImage::from_pixel(4, 4, Rgb([1, 1, 1]));
        let result =
            JpegImageWriter::new(FailingWriter, &image, 75, "out.jpg".to_owned()).write_image();
        match result {
            Err(Error::UnableToEncodeOutputImage(name, _)) => assert_eq!(name, "out.jpg"),
            other => panic!("Unexpected result: {:?}", other),
        }
    }
}
