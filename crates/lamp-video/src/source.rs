use crate::{
    AviReader, FrameSource, ImageSequence, MemorySource, SourceConfig, SourceError, SourceKind,
};
use lamp_base::Frame;

#[cfg(feature = "v4l2")]
use crate::V4l2Camera;

/// Any of the supported frame sources.
#[derive(Debug)]
pub enum Source {
    Avi(AviReader),
    Images(ImageSequence),
    Memory(MemorySource),
    #[cfg(feature = "v4l2")]
    Camera(V4l2Camera),
}

impl Source {
    /// Opens the source described by `config`.
    ///
    /// # Errors
    ///
    /// Whatever the backend reports on open. Cameras fail with
    /// `SourceError::Device` when built without the `v4l2` feature.
    pub async fn open(config: &SourceConfig) -> Result<Self, SourceError> {
        match config.kind() {
            SourceKind::Avi(path) => Ok(Source::Avi(AviReader::open(path).await?)),
            SourceKind::Images(dir) => Ok(Source::Images(ImageSequence::open(dir).await?)),
            #[cfg(feature = "v4l2")]
            SourceKind::Camera(_) => Ok(Source::Camera(V4l2Camera::new(config)?)),
            #[cfg(not(feature = "v4l2"))]
            SourceKind::Camera(path) => Err(SourceError::Device(format!(
                "{path}: camera capture needs the v4l2 feature"
            ))),
        }
    }
}

impl From<MemorySource> for Source {
    fn from(source: MemorySource) -> Self {
        Source::Memory(source)
    }
}

impl FrameSource for Source {
    async fn recv(&mut self) -> Result<Option<Frame>, SourceError> {
        match self {
            Source::Avi(s) => s.recv().await,
            Source::Images(s) => s.recv().await,
            Source::Memory(s) => s.recv().await,
            #[cfg(feature = "v4l2")]
            Source::Camera(s) => s.recv().await,
        }
    }
}
