//! Frame sources for lampwatch.
//!
//! Every source implements the async `FrameSource` trait and yields RGB
//! `Frame`s until the stream ends: AVI clips, directories of still images,
//! in-memory clips and, with the `v4l2` feature, live cameras.

pub mod avi;
pub mod config;
pub mod convert;
pub mod error;
pub mod memory;
pub mod sequence;
pub mod source;
pub mod traits;

#[cfg(feature = "v4l2")]
pub mod v4l2;

pub use avi::{AviCodec, AviReader};
pub use config::{SourceConfig, SourceKind};
pub use convert::yuyv_to_rgb;
pub use error::SourceError;
pub use memory::MemorySource;
pub use sequence::ImageSequence;
pub use source::Source;
pub use traits::FrameSource;

#[cfg(feature = "v4l2")]
pub use v4l2::V4l2Camera;
