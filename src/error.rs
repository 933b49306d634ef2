use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    InvalidSquareSize(u32),
    InvalidQuality(u8),
    InputFileNotFound(String),
    UnsupportedFileExtension(String),
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToDecodeInputImage(String, image::ImageError),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    UnableToEncodeOutputImage(String, image::ImageError),
    UnableToPersistOutputFile(String, std::io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSquareSize(square_size) => {
                write!(
                    f,
                    "Square size must be greater than 2, but '{}' was given",
                    square_size
                )
            }
            Self::InvalidQuality(quality) => {
                write!(
                    f,
                    "JPEG quality must be in range 1 to 100, but '{}' was given",
                    quality
                )
            }
            Self::InputFileNotFound(path) => {
                write!(f, "Input file '{}' not found", path)
            }
            Self::UnsupportedFileExtension(path) => {
                write!(
                    f,
                    "Extension of input file '{}' is not supported. Expected jpg or jpeg.",
                    path
                )
            }
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToDecodeInputImage(path, error) => {
                write!(f, "Unable to decode input image '{}': {}", path, error)
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::UnableToEncodeOutputImage(path, error) => {
                write!(f, "Unable to encode output image '{}': {}", path, error)
            }
            Self::UnableToPersistOutputFile(path, error) => {
                write!(
                    f,
                    "Unable to move finished output image to '{}': {}",
                    path, error
                )
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnableToOpenInputFileForReading(_, error)
            | Self::UnableToOpenOutputFileForWriting(_, error)
            | Self::UnableToPersistOutputFile(_, error) => Some(error),
            Self::UnableToDecodeInputImage(_, error) | Self::UnableToEncodeOutputImage(_, error) => {
                Some(error)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::Error;

    #[test]
    fn display_names_offending_square_size() {
        let message = Error::InvalidSquareSize(2).to_string();
        assert!(message.contains("'2'"), "message was: {}", message);
    }

    #[test]
    fn display_names_offending_path() {
        let message = Error::UnsupportedFileExtension("/tmp/picture.png".to_owned()).to_string();
        assert!(
            message.contains("/tmp/picture.png"),
            "message was: {}",
            message
        );
    }

    #[test]
    fn io_errors_are_exposed_as_source() {
        use std::error::Error as _;
        let error = Error::UnableToOpenInputFileForReading(
            "input.jpg".to_owned(),
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert!(error.source().is_some());
        assert!(Error::InputFileNotFound("input.jpg".to_owned())
            .source()
            .is_none());
    }
}
