/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Error when the path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(std::path::PathBuf),

    /// Error to open the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to create the image.
    #[error("Failed to create image. {0}")]
    ImageCreationError(#[from] dewarp_image::ImageError),

    /// Error to decode or encode the image.
    #[error("Failed to decode the image. {0}")]
    ImageDecodeError(#[from] image::ImageError),

    /// Error to parse or write a json document.
    #[error("Invalid json document. {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error from the dewarping engine.
    #[error(transparent)]
    DewarpError(#[from] dewarp_imgproc::DewarpError),
}
