use lamp_base::{Frame, Rgb};
use lamp_image::draw::{draw_circle, draw_text, fill_circle};
use lamp_image::font::{self, GLYPH_HEIGHT, GLYPH_WIDTH};

fn count(frame: &Frame, color: Rgb) -> usize {
    frame.pixels().filter(|&p| p == color).count()
}

#[test]
fn test_fill_circle_covers_center_not_corners() {
    let mut frame = Frame::filled(21, 21, Rgb::BLACK).unwrap();
    fill_circle(&mut frame, 10.0, 10.0, 5.0, Rgb::WHITE);
    assert_eq!(frame.pixel(10, 10), Rgb::WHITE);
    assert_eq!(frame.pixel(15, 10), Rgb::WHITE);
    assert_eq!(frame.pixel(16, 10), Rgb::BLACK);
    assert_eq!(frame.pixel(14, 14), Rgb::BLACK);
    // roughly pi * r^2
    let n = count(&frame, Rgb::WHITE);
    assert!((70..=90).contains(&n), "filled {n} pixels");
}

#[test]
fn test_draw_circle_leaves_interior_untouched() {
    let mut frame = Frame::filled(41, 41, Rgb::BLACK).unwrap();
    draw_circle(&mut frame, 20.0, 20.0, 12.0, Rgb::GREEN, 2);
    assert_eq!(frame.pixel(20, 20), Rgb::BLACK);
    assert_eq!(frame.pixel(32, 20), Rgb::GREEN);
    assert_eq!(frame.pixel(20, 8), Rgb::GREEN);
    assert_eq!(frame.pixel(20, 3), Rgb::BLACK);
}

#[test]
fn test_drawing_clips_at_border() {
    let mut frame = Frame::filled(10, 10, Rgb::BLACK).unwrap();
    draw_circle(&mut frame, 0.0, 0.0, 30.0, Rgb::RED, 2);
    fill_circle(&mut frame, -3.0, 12.0, 5.0, Rgb::WHITE);
    draw_text(&mut frame, -20, 200, "RED", 3, Rgb::BLUE);
    // nothing to assert beyond not panicking and staying in bounds
    assert_eq!(frame.data().len(), 300);
}

#[test]
fn test_draw_text_places_glyph_above_baseline() {
    let mut frame = Frame::filled(40, 30, Rgb::BLACK).unwrap();
    draw_text(&mut frame, 2, 20, "L", 2, Rgb::BLUE);
    // 'L' has a full left column and a full bottom row
    assert_eq!(frame.pixel(2, 20 - 2 * GLYPH_HEIGHT), Rgb::BLUE);
    assert_eq!(frame.pixel(3, 19), Rgb::BLUE);
    assert_eq!(frame.pixel(2 + 2 * GLYPH_WIDTH - 1, 19), Rgb::BLUE);
    assert_eq!(frame.pixel(2, 20), Rgb::BLACK);
    assert_eq!(frame.pixel(2, 20 - 2 * GLYPH_HEIGHT - 1), Rgb::BLACK);
}

#[test]
fn test_text_width() {
    assert_eq!(font::text_width("", 3), 0);
    assert_eq!(font::text_width("RED", 1), 17);
    assert_eq!(font::text_width("GREEN", 3), (5 * 6 - 1) * 3);
}

#[test]
fn test_glyph_lowercase_and_unknown() {
    assert_eq!(font::glyph('g'), font::glyph('G'));
    assert_ne!(font::glyph('~'), font::glyph(' '));
    assert!(!font::is_lit(&font::glyph(' '), 2, 3));
}
