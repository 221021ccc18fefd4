use crate::{FrameSource, SourceError};
use lamp_base::Frame;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

const EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff", "webp"];

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| EXTENSIONS.iter().any(|x| x.eq_ignore_ascii_case(e)))
}

/// Plays the still images of a directory in file name order.
#[derive(Debug)]
pub struct ImageSequence {
    dir: PathBuf,
    pending: VecDeque<PathBuf>,
}

impl ImageSequence {
    /// Lists the image files of `dir`; subdirectories and files with other
    /// extensions are ignored.
    ///
    /// # Errors
    ///
    /// `SourceError::Device` if the directory cannot be read,
    /// `SourceError::Format` if it holds no images.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, SourceError> {
        let dir = dir.as_ref().to_path_buf();
        let mut entries = tokio::fs::read_dir(&dir).await?;
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if entry.file_type().await?.is_file() && is_image(&path) {
                files.push(path);
            }
        }
        if files.is_empty() {
            return Err(SourceError::Format(format!(
                "no images in {}",
                dir.display()
            )));
        }
        files.sort();
        log::debug!("{} images in {}", files.len(), dir.display());

        Ok(Self {
            dir,
            pending: files.into(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl FrameSource for ImageSequence {
    async fn recv(&mut self) -> Result<Option<Frame>, SourceError> {
        let Some(path) = self.pending.pop_front() else {
            return Ok(None);
        };
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| SourceError::Stream(format!("{}: {e}", path.display())))?;
        Ok(Some(lamp_image::decode_frame(&bytes)?))
    }
}
