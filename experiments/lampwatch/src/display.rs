use crate::{Display, LoopConfig, LoopError};
use lamp_base::Frame;
use lamp_detect::Detection;
use minifb::{Key, Window, WindowOptions};

/// Convert HWC RGB buffer to packed 0RGB u32 for minifb
pub fn rgb_to_argb(frame: &Frame) -> Vec<u32> {
    frame
        .data()
        .chunks_exact(3)
        .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
        .collect()
}

/// minifb window, opened at the size of the first frame shown.
pub struct WindowDisplay {
    title: String,
    quit_key: Key,
    window: Option<Window>,
}

impl WindowDisplay {
    pub fn new(config: &LoopConfig) -> Self {
        Self {
            title: config.title().to_string(),
            quit_key: config.quit_key(),
            window: None,
        }
    }
}

impl Display for WindowDisplay {
    fn show(&mut self, frame: &Frame, _detection: &Detection) -> Result<(), LoopError> {
        let (width, height) = (frame.width(), frame.height());
        if self.window.is_none() {
            log::info!("opening {width}x{height} window");
            let window = Window::new(&self.title, width, height, WindowOptions::default())
                .map_err(|e| LoopError::Display(e.to_string()))?;
            self.window = Some(window);
        }
        if let Some(window) = &mut self.window {
            window
                .update_with_buffer(&rgb_to_argb(frame), width, height)
                .map_err(|e| LoopError::Display(e.to_string()))?;
        }
        Ok(())
    }

    fn quit_requested(&mut self) -> bool {
        let Some(window) = &mut self.window else {
            return false;
        };
        // pump events so key state and close requests are current
        window.update();
        !window.is_open() || window.is_key_down(self.quit_key)
    }
}
