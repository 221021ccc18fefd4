pub mod frame;
pub mod logging;

pub use frame::{Frame, FrameError, Mask, Rgb};
pub use logging::{FileLogger, StdoutLogger, init_file_logger, init_stdout_logger};

// Re-export log crate so downstream crates can use lamp_base::log::*
pub use log;
