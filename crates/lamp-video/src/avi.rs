//! RIFF/AVI clip reader.
//!
//! Supports one video stream stored either as MJPEG (`##dc` chunks) or as
//! uncompressed 24-bit DIB rows (`##db` chunks). Audio, `JUNK` and index
//! chunks are skipped, and `rec ` lists inside `movi` are walked in place.

use crate::{FrameSource, SourceError};
use lamp_base::Frame;
use lamp_image::ImageError;
use std::io;
use std::path::Path;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt, SeekFrom};

type FourCc = [u8; 4];

const RIFF: &FourCc = b"RIFF";
const AVI: &FourCc = b"AVI ";
const LIST: &FourCc = b"LIST";

fn le_u16(buf: &[u8], at: usize) -> Option<u16> {
    Some(u16::from_le_bytes(buf.get(at..at + 2)?.try_into().ok()?))
}

fn le_u32(buf: &[u8], at: usize) -> Option<u32> {
    Some(u32::from_le_bytes(buf.get(at..at + 4)?.try_into().ok()?))
}

fn fourcc(buf: &[u8], at: usize) -> Option<FourCc> {
    buf.get(at..at + 4)?.try_into().ok()
}

// chunk payloads are padded to an even length
fn padded(size: u32) -> u64 {
    size as u64 + (size & 1) as u64
}

/// Iterates `(id, payload)` over the chunks packed in a buffer.
struct Chunks<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Chunks<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = (FourCc, &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        let id = fourcc(self.buf, self.pos)?;
        let size = le_u32(self.buf, self.pos + 4)? as usize;
        let start = self.pos + 8;
        // a truncated last chunk yields what is there
        let end = (start + size).min(self.buf.len());
        self.pos = start + size + (size & 1);
        Some((id, &self.buf[start..end]))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AviCodec {
    Mjpeg,
    /// Uncompressed 24-bit BGR rows, bottom-up unless the height is negative.
    Dib,
}

#[derive(Debug)]
struct VideoStream {
    index: u32,
    width: usize,
    height: usize,
    top_down: bool,
    codec: AviCodec,
}

#[derive(Debug, Default)]
struct MainHeader {
    micros_per_frame: u32,
    total_frames: u32,
    width: u32,
    height: u32,
}

fn parse_codec(compression: FourCc, bit_count: u16) -> Result<AviCodec, SourceError> {
    match &compression.map(|b| b.to_ascii_uppercase()) {
        b"MJPG" | b"JPEG" => Ok(AviCodec::Mjpeg),
        &[0, 0, 0, 0] | b"DIB " if bit_count == 24 => Ok(AviCodec::Dib),
        &[0, 0, 0, 0] | b"DIB " => Err(SourceError::Format(format!(
            "unsupported DIB bit depth {bit_count}"
        ))),
        other => Err(SourceError::Format(format!(
            "unsupported video codec {:?}",
            String::from_utf8_lossy(other)
        ))),
    }
}

// `strl` list: stream header plus BITMAPINFOHEADER format
fn parse_stream(index: u32, list: &[u8]) -> Result<Option<VideoStream>, SourceError> {
    let mut is_video = false;
    let mut format = None;
    for (id, body) in Chunks::new(list) {
        match &id {
            b"strh" => is_video = fourcc(body, 0) == Some(*b"vids"),
            b"strf" => format = Some(body),
            _ => {}
        }
    }
    let Some(format) = format.filter(|_| is_video) else {
        return Ok(None);
    };

    let bad = || SourceError::Format("truncated video stream format".to_string());
    let width = le_u32(format, 4).ok_or_else(bad)? as i32;
    let height = le_u32(format, 8).ok_or_else(bad)? as i32;
    let bit_count = le_u16(format, 14).ok_or_else(bad)?;
    let compression = fourcc(format, 16).ok_or_else(bad)?;

    Ok(Some(VideoStream {
        index,
        width: width.unsigned_abs() as usize,
        height: height.unsigned_abs() as usize,
        top_down: height < 0,
        codec: parse_codec(compression, bit_count)?,
    }))
}

// `hdrl` list: main header and one `strl` per stream
fn parse_header(hdrl: &[u8]) -> Result<(MainHeader, VideoStream), SourceError> {
    let mut main = MainHeader::default();
    let mut video = None;
    let mut streams = 0;
    for (id, body) in Chunks::new(hdrl) {
        if &id == b"avih" {
            main = MainHeader {
                micros_per_frame: le_u32(body, 0).unwrap_or(0),
                total_frames: le_u32(body, 16).unwrap_or(0),
                width: le_u32(body, 32).unwrap_or(0),
                height: le_u32(body, 36).unwrap_or(0),
            };
        } else if &id == LIST && body.starts_with(b"strl") {
            if video.is_none() {
                video = parse_stream(streams, &body[4..])?;
            }
            streams += 1;
        }
    }
    let video = video.ok_or_else(|| SourceError::Format("no video stream".to_string()))?;
    Ok((main, video))
}

fn decode_dib(data: &[u8], stream: &VideoStream) -> Result<Frame, ImageError> {
    let (width, height) = (stream.width, stream.height);
    let stride = (width * 3 + 3) & !3;
    if data.len() < stride * height {
        return Err(ImageError::Decode(format!(
            "DIB frame has {} bytes, expected {}",
            data.len(),
            stride * height
        )));
    }
    let mut rgb = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        let src = if stream.top_down { y } else { height - 1 - y };
        let row = &data[src * stride..src * stride + width * 3];
        for bgr in row.chunks_exact(3) {
            rgb.extend_from_slice(&[bgr[2], bgr[1], bgr[0]]);
        }
    }
    Ok(Frame::new(width, height, rgb)?)
}

/// Frame source reading an AVI container.
#[derive(Debug)]
pub struct AviReader<R = File> {
    reader: R,
    stream: VideoStream,
    main: MainHeader,
    // next chunk inside `movi` and the end of `movi`
    pos: u64,
    end: u64,
}

impl AviReader<File> {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let file = File::open(path.as_ref()).await.map_err(|e| {
            SourceError::Device(format!("cannot open {}: {e}", path.as_ref().display()))
        })?;
        Self::from_reader(file).await
    }
}

impl<R: AsyncRead + AsyncSeek + Unpin> AviReader<R> {
    /// Parses the RIFF header and positions the reader at the first chunk
    /// of `movi`.
    pub async fn from_reader(mut reader: R) -> Result<Self, SourceError> {
        let truncated = |e: io::Error| match e.kind() {
            io::ErrorKind::UnexpectedEof => SourceError::Format("truncated AVI header".to_string()),
            _ => SourceError::Device(e.to_string()),
        };

        let mut riff = [0u8; 12];
        reader.read_exact(&mut riff).await.map_err(truncated)?;
        if &riff[0..4] != RIFF || &riff[8..12] != AVI {
            return Err(SourceError::Format("not a RIFF/AVI file".to_string()));
        }
        let riff_end = 8 + le_u32(&riff, 4).unwrap_or(0) as u64;

        let mut header = None;
        let mut pos = 12u64;
        while pos + 12 <= riff_end {
            reader.seek(SeekFrom::Start(pos)).await?;
            let mut head = [0u8; 12];
            reader.read_exact(&mut head).await.map_err(truncated)?;
            let size = le_u32(&head, 4).unwrap_or(0);
            let next = pos + 8 + padded(size);

            if &head[0..4] == LIST && &head[8..12] == b"hdrl" {
                let mut hdrl = vec![0u8; (size as usize).saturating_sub(4)];
                reader.read_exact(&mut hdrl).await.map_err(truncated)?;
                header = Some(parse_header(&hdrl)?);
            } else if &head[0..4] == LIST && &head[8..12] == b"movi" {
                let (main, stream) =
                    header.ok_or_else(|| SourceError::Format("movi before hdrl".to_string()))?;
                log::debug!(
                    "avi: {}x{} {:?}, {} frames at {} us",
                    stream.width,
                    stream.height,
                    stream.codec,
                    main.total_frames,
                    main.micros_per_frame
                );
                return Ok(Self {
                    reader,
                    stream,
                    main,
                    pos: pos + 12,
                    end: (pos + 8 + size as u64).min(riff_end),
                });
            }
            pos = next;
        }
        Err(SourceError::Format("no movi list".to_string()))
    }

    pub fn width(&self) -> usize {
        self.stream.width
    }

    pub fn height(&self) -> usize {
        self.stream.height
    }

    pub fn codec(&self) -> AviCodec {
        self.stream.codec
    }

    /// Frame count claimed by the main header.
    pub fn frame_count(&self) -> u32 {
        self.main.total_frames
    }

    /// Nominal frame interval, if the header states one.
    pub fn frame_interval(&self) -> Option<Duration> {
        match self.main.micros_per_frame {
            0 => None,
            us => Some(Duration::from_micros(us as u64)),
        }
    }

    /// Dimensions stated by the main header, which may differ from the stream format.
    pub fn main_dimensions(&self) -> (u32, u32) {
        (self.main.width, self.main.height)
    }

    fn is_video_chunk(&self, id: &FourCc) -> bool {
        let tag = format!("{:02}", self.stream.index);
        id[0..2] == *tag.as_bytes() && matches!(&id[2..4], b"dc" | b"db")
    }

    async fn read_at(&mut self, pos: u64, buf: &mut [u8]) -> io::Result<()> {
        self.reader.seek(SeekFrom::Start(pos)).await?;
        self.reader.read_exact(buf).await?;
        Ok(())
    }

    fn decode(&self, data: &[u8]) -> Result<Frame, ImageError> {
        match self.stream.codec {
            AviCodec::Mjpeg => lamp_image::decode_frame(data),
            AviCodec::Dib => decode_dib(data, &self.stream),
        }
    }
}

impl<R: AsyncRead + AsyncSeek + Unpin> FrameSource for AviReader<R> {
    async fn recv(&mut self) -> Result<Option<Frame>, SourceError> {
        let stream_err = |e: io::Error| SourceError::Stream(e.to_string());

        while self.pos + 8 <= self.end {
            let mut head = [0u8; 8];
            match self.read_at(self.pos, &mut head).await {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    log::warn!("avi: clip ends mid-chunk at offset {}", self.pos);
                    self.pos = self.end;
                    return Ok(None);
                }
                Err(e) => return Err(stream_err(e)),
            }
            let id = fourcc(&head, 0).unwrap_or_default();
            let size = le_u32(&head, 4).unwrap_or(0);

            if &id == LIST {
                // step into the list, its children follow the list type
                self.pos += 12;
                continue;
            }

            let start = self.pos + 8;
            self.pos = start + padded(size);
            if !self.is_video_chunk(&id) || size == 0 {
                continue;
            }

            let mut data = vec![0u8; size as usize];
            match self.read_at(start, &mut data).await {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    log::warn!("avi: truncated frame at offset {start}");
                    self.pos = self.end;
                    return Ok(None);
                }
                Err(e) => return Err(stream_err(e)),
            }
            return Ok(Some(self.decode(&data)?));
        }
        Ok(None)
    }
}
