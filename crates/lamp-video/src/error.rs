use lamp_image::ImageError;
use std::fmt;

#[derive(Debug)]
pub enum SourceError {
    /// The source could not be opened or configured.
    Device(String),
    /// Reading from an open source failed.
    Stream(String),
    /// One frame could not be decoded; the source itself is still usable.
    Decode(ImageError),
    /// The container or pixel format is not supported.
    Format(String),
}

impl SourceError {
    /// Whether the source can still deliver frames after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SourceError::Decode(_))
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Device(msg) => write!(f, "device error: {msg}"),
            SourceError::Stream(msg) => write!(f, "stream error: {msg}"),
            SourceError::Decode(err) => write!(f, "decode error: {err}"),
            SourceError::Format(msg) => write!(f, "format error: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        SourceError::Device(err.to_string())
    }
}

impl From<ImageError> for SourceError {
    fn from(err: ImageError) -> Self {
        SourceError::Decode(err)
    }
}
