use crate::hough::Circle;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightState {
    Red,
    Green,
    None,
}

impl LightState {
    pub const ALL: [LightState; 3] = [LightState::Red, LightState::Green, LightState::None];

    pub fn label(&self) -> &'static str {
        match self {
            LightState::Red => "RED",
            LightState::Green => "GREEN",
            LightState::None => "NONE",
        }
    }
}

impl fmt::Display for LightState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Green wins over red; no candidates at all means no light.
pub fn classify(red: &[Circle], green: &[Circle]) -> LightState {
    if !green.is_empty() {
        LightState::Green
    } else if !red.is_empty() {
        LightState::Red
    } else {
        LightState::None
    }
}
