use crate::config::DetectorConfig;
use lamp_base::{Frame, Mask};
use lamp_image::in_range;

/// Binary masks of the pixels that fall in the red and green bands.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMasks {
    pub red: Mask,
    pub green: Mask,
}

pub fn segment(frame: &Frame, config: &DetectorConfig) -> ColorMasks {
    ColorMasks {
        red: in_range(frame, config.red_bands()),
        green: in_range(frame, config.green_bands()),
    }
}
