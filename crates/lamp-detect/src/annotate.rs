use crate::classify::LightState;
use crate::detector::Detection;
use lamp_base::{Frame, Rgb};
use lamp_image::draw::{draw_circle, draw_text, fill_circle};

/// Color of the state label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelColor {
    /// Same color whatever the state.
    Fixed(Rgb),
    /// The state's own color, see [`state_color`].
    ByState,
}

/// How detections are drawn onto a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationStyle {
    label_color: LabelColor,
    label_x: i64,
    label_baseline: i64,
    label_scale: usize,
    outline_thickness: u32,
    center_radius: f32,
    center_color: Rgb,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            label_color: LabelColor::Fixed(Rgb::BLUE),
            label_x: 10,
            label_baseline: 50,
            label_scale: 3,
            outline_thickness: 2,
            center_radius: 3.0,
            center_color: Rgb::WHITE,
        }
    }
}

impl AnnotationStyle {
    pub fn with_label_color(mut self, label_color: LabelColor) -> Self {
        self.label_color = label_color;
        self
    }

    /// Bottom-left corner of the label text.
    pub fn with_label_position(mut self, x: i64, baseline: i64) -> Self {
        self.label_x = x;
        self.label_baseline = baseline;
        self
    }

    pub fn with_label_scale(mut self, scale: usize) -> Self {
        self.label_scale = scale;
        self
    }

    pub fn with_outline_thickness(mut self, thickness: u32) -> Self {
        self.outline_thickness = thickness;
        self
    }

    pub fn with_center(mut self, radius: f32, color: Rgb) -> Self {
        self.center_radius = radius;
        self.center_color = color;
        self
    }

    pub fn label_color(&self) -> LabelColor {
        self.label_color
    }

    pub fn label_position(&self) -> (i64, i64) {
        (self.label_x, self.label_baseline)
    }

    pub fn label_scale(&self) -> usize {
        self.label_scale
    }

    pub fn outline_thickness(&self) -> u32 {
        self.outline_thickness
    }

    pub fn center_radius(&self) -> f32 {
        self.center_radius
    }

    pub fn center_color(&self) -> Rgb {
        self.center_color
    }

    fn label_rgb(&self, state: LightState) -> Rgb {
        match self.label_color {
            LabelColor::Fixed(color) => color,
            LabelColor::ByState => state_color(state),
        }
    }
}

pub fn state_color(state: LightState) -> Rgb {
    match state {
        LightState::Red => Rgb::RED,
        LightState::Green => Rgb::GREEN,
        LightState::None => Rgb::WHITE,
    }
}

/// Draws the state label, then an outline and a center dot for every
/// circle of the winning color. A `None` state draws the label only.
pub fn annotate(frame: &mut Frame, detection: &Detection, style: &AnnotationStyle) {
    let state = detection.state;
    draw_text(
        frame,
        style.label_x,
        style.label_baseline,
        state.label(),
        style.label_scale,
        style.label_rgb(state),
    );

    let outline = state_color(state);
    for c in detection.winning_circles() {
        draw_circle(frame, c.x, c.y, c.radius, outline, style.outline_thickness);
        fill_circle(frame, c.x, c.y, style.center_radius, style.center_color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_color_modes() {
        let fixed = AnnotationStyle::default();
        assert_eq!(fixed.label_rgb(LightState::Red), Rgb::BLUE);
        assert_eq!(fixed.label_rgb(LightState::None), Rgb::BLUE);

        let by_state = fixed.with_label_color(LabelColor::ByState);
        assert_eq!(by_state.label_rgb(LightState::Red), Rgb::RED);
        assert_eq!(by_state.label_rgb(LightState::Green), Rgb::GREEN);
        assert_eq!(by_state.label_rgb(LightState::None), Rgb::WHITE);
    }
}
