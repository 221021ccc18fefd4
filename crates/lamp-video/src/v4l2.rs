use crate::convert::yuyv_to_rgb;
use crate::{FrameSource, SourceConfig, SourceError, SourceKind};
use lamp_base::Frame;
use lamp_image::ImageError;
use v4l::buffer::Type;
use v4l::io::mmap::Stream as MmapStream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;
use v4l::{Device, Format, FourCC};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PixelFormat {
    Mjpeg,
    Yuyv,
}

/// V4L2 camera capturing on the calling thread.
///
/// `recv` blocks until the driver hands over the next buffer.
pub struct V4l2Camera {
    device_path: String,
    width: usize,
    height: usize,
    format: PixelFormat,
    stream: MmapStream<'static>,
    // kept open for as long as the stream runs
    _device: Device,
}

impl std::fmt::Debug for V4l2Camera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("V4l2Camera")
            .field("device", &self.device_path)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .finish()
    }
}

impl V4l2Camera {
    /// Opens the camera named by `config` and starts streaming.
    ///
    /// MJPEG is requested first; a device that answers with YUYV is used
    /// as is.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Device` if the device cannot be opened,
    /// offers neither MJPEG nor YUYV, or refuses the stream parameters.
    pub fn new(config: &SourceConfig) -> Result<Self, SourceError> {
        let SourceKind::Camera(path) = config.kind() else {
            return Err(SourceError::Device("not a camera source".to_string()));
        };
        let device = Device::with_path(path)
            .map_err(|e| SourceError::Device(format!("cannot open {path}: {e}")))?;

        let requested = Format::new(config.width(), config.height(), FourCC::new(b"MJPG"));
        let format = Capture::set_format(&device, &requested)?;
        let pixel = if format.fourcc == FourCC::new(b"MJPG") {
            PixelFormat::Mjpeg
        } else if format.fourcc == FourCC::new(b"YUYV") {
            PixelFormat::Yuyv
        } else {
            return Err(SourceError::Device(format!(
                "{path}: unsupported pixel format {}",
                format.fourcc
            )));
        };

        let params = v4l::video::capture::Parameters::with_fps(config.fps());
        Capture::set_params(&device, &params)?;

        let stream = MmapStream::with_buffers(&device, Type::VideoCapture, config.buffer_count())?;
        log::info!(
            "{path}: {}x{} {:?} at {} fps",
            format.width,
            format.height,
            pixel,
            config.fps()
        );

        Ok(Self {
            device_path: path.clone(),
            width: format.width as usize,
            height: format.height as usize,
            format: pixel,
            stream,
            _device: device,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }
}

impl FrameSource for V4l2Camera {
    async fn recv(&mut self) -> Result<Option<Frame>, SourceError> {
        let (buf, meta) = CaptureStream::next(&mut self.stream)
            .map_err(|e| SourceError::Stream(format!("{}: {e}", self.device_path)))?;
        let used = (meta.bytesused as usize).min(buf.len());
        let data = &buf[..used];

        let frame = match self.format {
            PixelFormat::Mjpeg => lamp_image::decode_frame(data)?,
            PixelFormat::Yuyv => yuyv_to_rgb(data, self.width, self.height).ok_or_else(|| {
                ImageError::Decode(format!("short YUYV buffer: {used} bytes"))
            })?,
        };
        Ok(Some(frame))
    }
}
