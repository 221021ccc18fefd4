use lamp_base::{Frame, Rgb};
use lamp_detect::{Detection, Detector, LightState};
use lamp_image::ImageError;
use lamp_image::draw::fill_circle;
use lamp_video::{FrameSource, MemorySource, SourceError};
use lampwatch::{Display, ExitReason, LoopConfig, LoopError, rgb_to_argb};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

#[derive(Default)]
struct Shown {
    states: Vec<LightState>,
    frames: Vec<Frame>,
}

struct Recorder {
    shown: Rc<RefCell<Shown>>,
    quit_after: Option<usize>,
    released: Rc<Cell<bool>>,
}

impl Recorder {
    fn new() -> (Self, Rc<RefCell<Shown>>) {
        let shown = Rc::new(RefCell::new(Shown::default()));
        let recorder = Self {
            shown: shown.clone(),
            quit_after: None,
            released: Rc::new(Cell::new(false)),
        };
        (recorder, shown)
    }
}

impl Display for Recorder {
    fn show(&mut self, frame: &Frame, detection: &Detection) -> Result<(), LoopError> {
        let mut shown = self.shown.borrow_mut();
        shown.states.push(detection.state);
        shown.frames.push(frame.clone());
        Ok(())
    }

    fn quit_requested(&mut self) -> bool {
        self.quit_after
            .is_some_and(|n| self.shown.borrow().states.len() >= n)
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        self.released.set(true);
    }
}

/// Replays scripted results, then ends.
struct Scripted {
    script: Vec<Result<Frame, SourceError>>,
    released: Rc<Cell<bool>>,
}

impl FrameSource for Scripted {
    async fn recv(&mut self) -> Result<Option<Frame>, SourceError> {
        if self.script.is_empty() {
            return Ok(None);
        }
        self.script.remove(0).map(Some)
    }
}

impl Drop for Scripted {
    fn drop(&mut self) {
        self.released.set(true);
    }
}

fn frame_with(disc: Option<Rgb>) -> Frame {
    let mut frame = Frame::filled(160, 120, Rgb::BLACK).unwrap();
    if let Some(color) = disc {
        fill_circle(&mut frame, 80.0, 60.0, 20.0, color);
    }
    frame
}

fn fast() -> LoopConfig {
    LoopConfig::default().with_wait_interval(Duration::ZERO)
}

#[tokio::test]
async fn test_blank_green_red_clip() {
    let mut clip = Vec::new();
    clip.extend((0..10).map(|_| frame_with(None)));
    clip.extend((0..10).map(|_| frame_with(Some(Rgb(0, 255, 0)))));
    clip.extend((0..10).map(|_| frame_with(Some(Rgb(255, 0, 0)))));

    let (recorder, shown) = Recorder::new();
    let summary = lampwatch::run(
        MemorySource::new(clip),
        recorder,
        &Detector::default(),
        &fast(),
    )
    .await
    .unwrap();

    let mut expected = vec![LightState::None; 10];
    expected.extend([LightState::Green; 10]);
    expected.extend([LightState::Red; 10]);
    assert_eq!(shown.borrow().states, expected);

    assert_eq!(summary.frames, 30);
    assert_eq!(summary.count(LightState::None), 10);
    assert_eq!(summary.count(LightState::Green), 10);
    assert_eq!(summary.count(LightState::Red), 10);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.exit, ExitReason::EndOfStream);
}

#[tokio::test]
async fn test_frames_are_annotated_before_display() {
    let (recorder, shown) = Recorder::new();
    lampwatch::run(
        MemorySource::new(vec![frame_with(Some(Rgb(255, 0, 0)))]),
        recorder,
        &Detector::default(),
        &fast(),
    )
    .await
    .unwrap();

    let shown = shown.borrow();
    let frame = &shown.frames[0];
    // label in blue, white center dot, red outline on the disc edge
    assert!(frame.pixels().any(|p| p == Rgb::BLUE));
    assert_eq!(frame.pixel(80, 60), Rgb::WHITE);
    assert!(frame.pixels().filter(|&p| p == Rgb::RED).count() > 0);
}

#[tokio::test]
async fn test_quit_stops_and_releases() {
    let clip: Vec<Frame> = (0..10).map(|_| frame_with(None)).collect();
    let source_released = Rc::new(Cell::new(false));
    let display_released = Rc::new(Cell::new(false));
    let source = Scripted {
        script: clip.into_iter().map(Ok).collect(),
        released: source_released.clone(),
    };
    let (mut recorder, shown) = Recorder::new();
    recorder.quit_after = Some(3);
    recorder.released = display_released.clone();

    let summary = lampwatch::run(source, recorder, &Detector::default(), &fast())
        .await
        .unwrap();
    assert_eq!(summary.exit, ExitReason::Quit);
    assert_eq!(summary.frames, 3);
    assert_eq!(shown.borrow().states.len(), 3);
    assert!(source_released.get());
    assert!(display_released.get());
}

#[tokio::test]
async fn test_decode_errors_are_skipped() {
    let source = Scripted {
        script: vec![
            Ok(frame_with(None)),
            Err(SourceError::Decode(ImageError::Decode("bad jpeg".to_string()))),
            Ok(frame_with(Some(Rgb(0, 255, 0)))),
        ],
        released: Rc::new(Cell::new(false)),
    };
    let (recorder, shown) = Recorder::new();
    let summary = lampwatch::run(source, recorder, &Detector::default(), &fast())
        .await
        .unwrap();

    assert_eq!(summary.frames, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(shown.borrow().states, [LightState::None, LightState::Green]);
}

#[tokio::test]
async fn test_stream_error_ends_run() {
    let released = Rc::new(Cell::new(false));
    let source = Scripted {
        script: vec![
            Ok(frame_with(None)),
            Err(SourceError::Stream("device unplugged".to_string())),
            Ok(frame_with(None)),
        ],
        released: released.clone(),
    };
    let (recorder, _) = Recorder::new();
    let err = lampwatch::run(source, recorder, &Detector::default(), &fast())
        .await
        .unwrap_err();
    assert!(matches!(err, LoopError::Source(SourceError::Stream(_))));
    assert!(released.get());
}

#[test]
fn test_default_loop_config() {
    let config = LoopConfig::default();
    assert_eq!(config.wait_interval(), Duration::from_millis(30));
    assert_eq!(config.quit_key(), minifb::Key::Escape);
    assert_eq!(config.title(), "Traffic Light Detection - ESC to exit");
}

#[test]
fn test_rgb_to_argb() {
    let frame = Frame::new(2, 1, vec![255, 0, 0, 1, 2, 3]).unwrap();
    assert_eq!(rgb_to_argb(&frame), [0x00FF_0000, 0x0001_0203]);
}
