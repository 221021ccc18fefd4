//! Traffic light state detection.
//!
//! Each frame is segmented into red and green HSV masks, each mask is
//! searched for circles with a Hough gradient transform, and the two
//! candidate lists decide the light state. Nothing is carried between
//! frames.

pub mod annotate;
pub mod classify;
pub mod config;
pub mod detector;
pub mod fit;
pub mod hough;
pub mod segment;

pub use annotate::{AnnotationStyle, LabelColor, annotate, state_color};
pub use classify::{LightState, classify};
pub use config::{DetectorConfig, HoughParams};
pub use detector::{Detection, Detector};
pub use hough::{Circle, find_circles};
pub use segment::{ColorMasks, segment};
