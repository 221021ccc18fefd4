//! Capture loop of the traffic light monitor.
//!
//! Pulls frames from a `FrameSource`, classifies each one, draws the result
//! and hands it to a `Display` until the stream ends or the user quits.

pub mod display;

use lamp_base::Frame;
use lamp_detect::{Detection, Detector, LightState, annotate};
use lamp_video::{FrameSource, SourceError};
use minifb::Key;
use std::fmt;
use std::time::Duration;

pub use display::{WindowDisplay, rgb_to_argb};

#[derive(Debug)]
pub enum LoopError {
    Source(SourceError),
    Display(String),
}

impl fmt::Display for LoopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopError::Source(err) => write!(f, "source error: {err}"),
            LoopError::Display(msg) => write!(f, "display error: {msg}"),
        }
    }
}

impl std::error::Error for LoopError {}

impl From<SourceError> for LoopError {
    fn from(err: SourceError) -> Self {
        LoopError::Source(err)
    }
}

/// Where annotated frames go.
pub trait Display {
    fn show(&mut self, frame: &Frame, detection: &Detection) -> Result<(), LoopError>;

    /// Whether the user asked to stop. Called once per frame, after the
    /// wait interval.
    fn quit_requested(&mut self) -> bool;
}

#[derive(Clone, Debug)]
pub struct LoopConfig {
    wait_interval: Duration,
    quit_key: Key,
    title: String,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            wait_interval: Duration::from_millis(30),
            quit_key: Key::Escape,
            title: "Traffic Light Detection - ESC to exit".to_string(),
        }
    }
}

impl LoopConfig {
    /// Pause after each displayed frame; paces file playback.
    pub fn with_wait_interval(mut self, wait_interval: Duration) -> Self {
        self.wait_interval = wait_interval;
        self
    }

    pub fn with_quit_key(mut self, quit_key: Key) -> Self {
        self.quit_key = quit_key;
        self
    }

    pub fn with_title(mut self, title: String) -> Self {
        self.title = title;
        self
    }

    pub fn wait_interval(&self) -> Duration {
        self.wait_interval
    }

    pub fn quit_key(&self) -> Key {
        self.quit_key
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitReason {
    Quit,
    EndOfStream,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub red: u64,
    pub green: u64,
    pub none: u64,
    /// frames lost to decode errors
    pub skipped: u64,
    pub exit: ExitReason,
}

impl RunSummary {
    fn new() -> Self {
        Self {
            frames: 0,
            red: 0,
            green: 0,
            none: 0,
            skipped: 0,
            exit: ExitReason::EndOfStream,
        }
    }

    fn record(&mut self, state: LightState) {
        self.frames += 1;
        match state {
            LightState::Red => self.red += 1,
            LightState::Green => self.green += 1,
            LightState::None => self.none += 1,
        }
    }

    pub fn count(&self, state: LightState) -> u64 {
        match state {
            LightState::Red => self.red,
            LightState::Green => self.green,
            LightState::None => self.none,
        }
    }
}

/// Runs the detect-and-annotate loop until the stream ends or the display
/// reports a quit.
///
/// Source and display are consumed and released on every exit path. Frames
/// that fail to decode are logged and skipped; any other source error ends
/// the run.
pub async fn run<S: FrameSource, D: Display>(
    mut source: S,
    mut display: D,
    detector: &Detector,
    config: &LoopConfig,
) -> Result<RunSummary, LoopError> {
    let mut summary = RunSummary::new();
    let mut last_state = None;

    loop {
        let mut frame = match source.recv().await {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                log::info!("end of stream");
                summary.exit = ExitReason::EndOfStream;
                break;
            }
            Err(e) if e.is_recoverable() => {
                log::warn!("skipping frame {}: {e}", summary.frames + summary.skipped);
                summary.skipped += 1;
                tokio::time::sleep(config.wait_interval).await;
                if display.quit_requested() {
                    summary.exit = ExitReason::Quit;
                    break;
                }
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        if summary.frames == 0 {
            log::info!("first frame {}x{}", frame.width(), frame.height());
        }

        let detection = detector.detect(&frame);
        if last_state != Some(detection.state) {
            log::info!("frame {}: {}", summary.frames, detection.state);
            last_state = Some(detection.state);
        }
        annotate(&mut frame, &detection, detector.config().annotation());
        display.show(&frame, &detection)?;
        summary.record(detection.state);

        tokio::time::sleep(config.wait_interval).await;
        if display.quit_requested() {
            log::info!("quit requested");
            summary.exit = ExitReason::Quit;
            break;
        }
    }

    log::info!(
        "{} frames: {} red, {} green, {} none, {} skipped",
        summary.frames,
        summary.red,
        summary.green,
        summary.none,
        summary.skipped
    );
    Ok(summary)
}
