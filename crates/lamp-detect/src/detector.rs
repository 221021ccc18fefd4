use crate::classify::{LightState, classify};
use crate::config::DetectorConfig;
use crate::hough::{Circle, find_circles};
use crate::segment::segment;
use lamp_base::Frame;

/// Outcome of one frame: the state and the circles behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub state: LightState,
    pub red: Vec<Circle>,
    pub green: Vec<Circle>,
}

impl Detection {
    /// Circles of the color that decided the state, empty for `None`.
    pub fn winning_circles(&self) -> &[Circle] {
        match self.state {
            LightState::Red => &self.red,
            LightState::Green => &self.green,
            LightState::None => &[],
        }
    }
}

/// Stateless per-frame detector.
pub struct Detector {
    config: DetectorConfig,
}

impl Detector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn detect(&self, frame: &Frame) -> Detection {
        if frame.is_empty() {
            return Detection {
                state: LightState::None,
                red: Vec::new(),
                green: Vec::new(),
            };
        }

        let masks = segment(frame, &self.config);
        let red = find_circles(&masks.red, self.config.hough());
        let green = find_circles(&masks.green, self.config.hough());
        let state = classify(&red, &green);
        log::trace!(
            "{}x{} frame: {} red, {} green -> {}",
            frame.width(),
            frame.height(),
            red.len(),
            green.len(),
            state
        );

        Detection { state, red, green }
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}
