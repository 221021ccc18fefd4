use lamp_base::{Frame, Rgb};
use lamp_detect::{
    Circle, Detection, Detector, DetectorConfig, HoughParams, LightState, classify, find_circles,
    segment,
};
use lamp_image::draw::fill_circle;

const RED: Rgb = Rgb(255, 0, 0);
const GREEN: Rgb = Rgb(0, 255, 0);

fn scene(width: usize, height: usize, discs: &[(f32, f32, f32, Rgb)]) -> Frame {
    let mut frame = Frame::filled(width, height, Rgb::BLACK).unwrap();
    for &(cx, cy, r, color) in discs {
        fill_circle(&mut frame, cx, cy, r, color);
    }
    frame
}

fn circle(x: f32, y: f32) -> Circle {
    Circle {
        x,
        y,
        radius: 10.0,
        support: 40,
    }
}

#[test]
fn test_blank_frame_is_none() {
    let detector = Detector::default();
    let detection = detector.detect(&scene(160, 120, &[]));
    assert_eq!(detection.state, LightState::None);
    assert!(detection.red.is_empty());
    assert!(detection.green.is_empty());
    assert!(detection.winning_circles().is_empty());
}

#[test]
fn test_out_of_band_colors_are_none() {
    // dark red and washed-out green fail the saturation/value floors
    let frame = scene(
        160,
        120,
        &[(40.0, 60.0, 20.0, Rgb(90, 10, 10)), (120.0, 60.0, 20.0, Rgb(30, 40, 30))],
    );
    assert_eq!(Detector::default().detect(&frame).state, LightState::None);
}

#[test]
fn test_empty_frame_is_none() {
    let frame = Frame::new(0, 0, Vec::new()).unwrap();
    assert_eq!(Detector::default().detect(&frame).state, LightState::None);
}

#[test]
fn test_single_red_circle() {
    let frame = scene(160, 120, &[(80.0, 60.0, 25.0, RED)]);
    let detection = Detector::default().detect(&frame);

    assert_eq!(detection.state, LightState::Red);
    assert!(detection.green.is_empty());
    assert_eq!(detection.red.len(), 1, "{:?}", detection.red);
    let c = detection.red[0];
    assert!((c.x - 80.0).abs() <= 1.5, "x = {}", c.x);
    assert!((c.y - 60.0).abs() <= 1.5, "y = {}", c.y);
    assert!((c.radius - 25.0).abs() <= 1.5, "r = {}", c.radius);
    assert_eq!(detection.winning_circles(), &detection.red[..]);
}

#[test]
fn test_single_green_circle() {
    let frame = scene(160, 120, &[(60.0, 50.0, 18.0, GREEN)]);
    let detection = Detector::default().detect(&frame);
    assert_eq!(detection.state, LightState::Green);
    assert_eq!(detection.green.len(), 1);
    assert!(detection.red.is_empty());
}

#[test]
fn test_green_wins_over_red() {
    let frame = scene(
        200,
        120,
        &[(50.0, 60.0, 20.0, RED), (150.0, 60.0, 20.0, GREEN)],
    );
    let detection = Detector::default().detect(&frame);
    assert_eq!(detection.state, LightState::Green);
    assert_eq!(detection.red.len(), 1);
    assert_eq!(detection.green.len(), 1);
    assert!((detection.green[0].x - 150.0).abs() <= 1.5);
}

#[test]
fn test_detect_is_deterministic() {
    let frame = scene(
        200,
        120,
        &[(50.0, 60.0, 20.0, RED), (150.0, 60.0, 12.0, GREEN)],
    );
    let detector = Detector::default();
    let first = detector.detect(&frame);
    let second = detector.detect(&frame);
    assert_eq!(first, second);
    // a fresh detector carries nothing over either
    assert_eq!(Detector::default().detect(&frame), first);
}

#[test]
fn test_radius_bounds() {
    let config = DetectorConfig::default().with_hough(
        HoughParams::default()
            .with_radius_range(10, 20)
            .with_accumulator_threshold(10),
    );
    let detector = Detector::new(config);

    for (radius, expected) in [(9.0, false), (10.0, true), (20.0, true), (21.0, false)] {
        let frame = scene(120, 120, &[(60.0, 60.0, radius, RED)]);
        let detection = detector.detect(&frame);
        assert_eq!(
            !detection.red.is_empty(),
            expected,
            "radius {radius}: {:?}",
            detection.red
        );
        if expected {
            assert_eq!(detection.red.len(), 1);
            assert!((detection.red[0].radius - radius).abs() < 0.5);
        }
    }
}

#[test]
fn test_two_separate_circles_of_one_color() {
    let frame = scene(
        200,
        100,
        &[(50.0, 50.0, 15.0, RED), (150.0, 50.0, 15.0, RED)],
    );
    let mut circles = Detector::default().detect(&frame).red;
    circles.sort_by(|a, b| a.x.total_cmp(&b.x));
    assert_eq!(circles.len(), 2);
    assert!((circles[0].x - 50.0).abs() <= 1.5);
    assert!((circles[1].x - 150.0).abs() <= 1.5);
}

#[test]
fn test_find_circles_on_mask() {
    let frame = scene(100, 100, &[(50.0, 50.0, 20.0, RED)]);
    let config = DetectorConfig::default();
    let masks = segment(&frame, &config);
    assert!(masks.green.count_set() == 0);
    assert!(find_circles(&masks.green, config.hough()).is_empty());
    assert_eq!(find_circles(&masks.red, config.hough()).len(), 1);
}

#[test]
fn test_classify_priority() {
    let red = [circle(10.0, 10.0)];
    let green = [circle(50.0, 50.0)];
    assert_eq!(classify(&[], &[]), LightState::None);
    assert_eq!(classify(&red, &[]), LightState::Red);
    assert_eq!(classify(&[], &green), LightState::Green);
    assert_eq!(classify(&red, &green), LightState::Green);
}

#[test]
fn test_winning_circles() {
    let detection = Detection {
        state: LightState::Red,
        red: vec![circle(1.0, 1.0)],
        green: vec![circle(2.0, 2.0), circle(3.0, 3.0)],
    };
    assert_eq!(detection.winning_circles().len(), 1);

    let none = Detection {
        state: LightState::None,
        ..detection
    };
    assert!(none.winning_circles().is_empty());
}

#[test]
fn test_state_labels() {
    let labels: Vec<_> = LightState::ALL.iter().map(|s| s.to_string()).collect();
    assert_eq!(labels, ["RED", "GREEN", "NONE"]);
}
