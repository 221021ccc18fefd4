use std::path::{Path, PathBuf};

/// Where frames come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// V4L2 device path, e.g. "/dev/video0".
    Camera(String),
    /// AVI clip on disk.
    Avi(PathBuf),
    /// Directory of still images, played in file name order.
    Images(PathBuf),
}

/// Configuration for opening a frame source.
///
/// Width, height, fps and buffer count only apply to cameras.
#[derive(Clone, Debug)]
pub struct SourceConfig {
    kind: SourceKind,
    width: u32,
    height: u32,
    fps: u32,
    buffer_count: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::camera(0)
    }
}

impl SourceConfig {
    fn with_kind(kind: SourceKind) -> Self {
        Self {
            kind,
            width: 640,
            height: 480,
            fps: 30,
            buffer_count: 4,
        }
    }

    /// Camera by index, `0` being /dev/video0.
    pub fn camera(index: u32) -> Self {
        Self::with_kind(SourceKind::Camera(format!("/dev/video{index}")))
    }

    pub fn avi(path: impl Into<PathBuf>) -> Self {
        Self::with_kind(SourceKind::Avi(path.into()))
    }

    pub fn images(dir: impl Into<PathBuf>) -> Self {
        Self::with_kind(SourceKind::Images(dir.into()))
    }

    /// Interpret a command line argument: a decimal number is a camera
    /// index, an existing directory is an image sequence, anything else
    /// is taken as an AVI path.
    pub fn from_arg(arg: &str) -> Self {
        if let Ok(index) = arg.parse::<u32>() {
            return Self::camera(index);
        }
        let path = Path::new(arg);
        if path.is_dir() {
            Self::images(path)
        } else {
            Self::avi(path)
        }
    }

    /// Set the device path of a camera source. Other sources are replaced
    /// by the camera.
    pub fn with_device(mut self, device: String) -> Self {
        self.kind = SourceKind::Camera(device);
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    pub fn with_buffer_count(mut self, buffer_count: u32) -> Self {
        self.buffer_count = buffer_count;
        self
    }

    pub fn kind(&self) -> &SourceKind {
        &self.kind
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn buffer_count(&self) -> u32 {
        self.buffer_count
    }
}
