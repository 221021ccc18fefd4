use lamp_base::{Frame, Mask, Rgb};

/// A color on the 8-bit HSV scale: hue in `[0, 180)` (degrees halved),
/// saturation and value in `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }
}

impl From<Rgb> for Hsv {
    fn from(color: Rgb) -> Self {
        rgb_to_hsv(color.0, color.1, color.2)
    }
}

// round half up, like fixed-point shift arithmetic
fn round_half_up(value: f32) -> i32 {
    (value + 0.5).floor() as i32
}

pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let (r, g, b) = (r as i32, g as i32, b as i32);
    let v = r.max(g).max(b);
    let diff = v - r.min(g).min(b);

    let s = if v == 0 {
        0
    } else {
        round_half_up(255.0 * diff as f32 / v as f32)
    };

    let h = if diff == 0 {
        0
    } else {
        // sextant offset: red spans [-1, 1], green [1, 3], blue [3, 5]
        let num = if v == r {
            g - b
        } else if v == g {
            b - r + 2 * diff
        } else {
            r - g + 4 * diff
        };
        let h = round_half_up(num as f32 * 30.0 / diff as f32);
        if h < 0 { h + 180 } else { h }
    };

    Hsv {
        h: h.clamp(0, 179) as u8,
        s: s.clamp(0, 255) as u8,
        v: v as u8,
    }
}

/// An inclusive box in HSV space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvBand {
    pub low: Hsv,
    pub high: Hsv,
}

impl HsvBand {
    pub const fn new(low: Hsv, high: Hsv) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, hsv: Hsv) -> bool {
        (self.low.h..=self.high.h).contains(&hsv.h)
            && (self.low.s..=self.high.s).contains(&hsv.s)
            && (self.low.v..=self.high.v).contains(&hsv.v)
    }
}

/// Marks every pixel whose HSV value falls inside any of `bands`.
///
/// The mask has the frame's dimensions; a zero-size frame gives a zero-size mask.
pub fn in_range(frame: &Frame, bands: &[HsvBand]) -> Mask {
    let data = frame
        .pixels()
        .map(|p| {
            let hsv = Hsv::from(p);
            if bands.iter().any(|band| band.contains(hsv)) {
                Mask::ON
            } else {
                0
            }
        })
        .collect();
    Mask::new(frame.width(), frame.height(), data)
        .expect("mask has exactly one byte per frame pixel")
}
