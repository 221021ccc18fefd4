//! Image handling for lampwatch.
//!
//! Decodes still images and compressed video frames into RGB `Frame`s,
//! converts pixels to the 8-bit HSV scale used for color thresholding,
//! and draws the overlay primitives (circles, discs, bitmap text).

pub mod draw;
pub mod error;
pub mod font;
pub mod hsv;

pub use error::ImageError;
pub use hsv::{Hsv, HsvBand, in_range, rgb_to_hsv};

use crates_image::{DynamicImage, ImageEncoder};
use lamp_base::Frame;
use std::path::Path;

fn to_frame(img: DynamicImage) -> Result<Frame, ImageError> {
    let rgb = match img {
        DynamicImage::ImageRgb8(buf) => buf,
        // gray, alpha, 16-bit and float variants collapse to 8-bit RGB
        other => other.to_rgb8(),
    };
    let (width, height) = rgb.dimensions();
    Ok(Frame::new(width as usize, height as usize, rgb.into_raw())?)
}

/// Decodes an image from raw bytes into an RGB frame.
///
/// The format is auto-detected by the `image` crate. Alpha is dropped and
/// higher bit depths are reduced to 8 bits per channel.
///
/// # Errors
///
/// Returns `ImageError::Decode` if the data is invalid or the format is unsupported.
pub fn decode_frame(data: &[u8]) -> Result<Frame, ImageError> {
    to_frame(crates_image::load_from_memory(data)?)
}

/// Reads and decodes an image file into an RGB frame.
pub fn load_frame(path: impl AsRef<Path>) -> Result<Frame, ImageError> {
    to_frame(crates_image::open(path)?)
}

/// Encodes a frame as JPEG bytes with the given quality (1-100).
pub fn encode_jpeg(frame: &Frame, quality: u8) -> Result<Vec<u8>, ImageError> {
    let mut buffer = Vec::new();
    crates_image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(
            frame.data(),
            frame.width() as u32,
            frame.height() as u32,
            crates_image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(buffer)
}

/// Encodes a frame as PNG bytes.
pub fn encode_png(frame: &Frame) -> Result<Vec<u8>, ImageError> {
    let mut buffer = Vec::new();
    crates_image::codecs::png::PngEncoder::new(&mut buffer)
        .write_image(
            frame.data(),
            frame.width() as u32,
            frame.height() as u32,
            crates_image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(buffer)
}
