use crate::font::{self, GLYPH_HEIGHT, GLYPH_WIDTH};
use lamp_base::{Frame, Rgb};

// pixel-center bounding box of a circle, clipped to the frame
fn bounds(frame: &Frame, cx: f32, cy: f32, reach: f32) -> (i64, i64, i64, i64) {
    let x0 = ((cx - reach).floor() as i64).max(0);
    let y0 = ((cy - reach).floor() as i64).max(0);
    let x1 = ((cx + reach).ceil() as i64).min(frame.width() as i64 - 1);
    let y1 = ((cy + reach).ceil() as i64).min(frame.height() as i64 - 1);
    (x0, y0, x1, y1)
}

/// Draws a circle outline of the given stroke `thickness` centered on the
/// nominal radius. Pixels outside the frame are clipped.
pub fn draw_circle(frame: &mut Frame, cx: f32, cy: f32, radius: f32, color: Rgb, thickness: u32) {
    let half = (thickness.max(1) as f32) / 2.0;
    let (x0, y0, x1, y1) = bounds(frame, cx, cy, radius + half + 1.0);
    for y in y0..=y1 {
        for x in x0..=x1 {
            let d = (x as f32 - cx).hypot(y as f32 - cy);
            if (d - radius).abs() <= half {
                frame.put_pixel(x, y, color);
            }
        }
    }
}

/// Fills every pixel whose center lies within `radius` of `(cx, cy)`.
pub fn fill_circle(frame: &mut Frame, cx: f32, cy: f32, radius: f32, color: Rgb) {
    let r2 = radius * radius;
    let (x0, y0, x1, y1) = bounds(frame, cx, cy, radius + 1.0);
    for y in y0..=y1 {
        for x in x0..=x1 {
            let (dx, dy) = (x as f32 - cx, y as f32 - cy);
            if dx * dx + dy * dy <= r2 {
                frame.put_pixel(x, y, color);
            }
        }
    }
}

/// Renders `text` with the built-in bitmap font, each font pixel drawn as a
/// `scale` x `scale` block. `(x, baseline)` is the bottom-left corner of the
/// first glyph.
pub fn draw_text(frame: &mut Frame, x: i64, baseline: i64, text: &str, scale: usize, color: Rgb) {
    let scale = scale.max(1);
    let top = baseline - (GLYPH_HEIGHT * scale) as i64;
    for (i, c) in text.chars().enumerate() {
        let rows = font::glyph(c);
        let left = x + (i * (GLYPH_WIDTH + 1) * scale) as i64;
        for row in 0..GLYPH_HEIGHT {
            for col in 0..GLYPH_WIDTH {
                if !font::is_lit(&rows, col, row) {
                    continue;
                }
                let px = left + (col * scale) as i64;
                let py = top + (row * scale) as i64;
                for dy in 0..scale as i64 {
                    for dx in 0..scale as i64 {
                        frame.put_pixel(px + dx, py + dy, color);
                    }
                }
            }
        }
    }
}
