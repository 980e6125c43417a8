// SPDX-License-Identifier: GPL-3.0-only

//! Presentation of annotated frames
//!
//! The scan loop hands every annotated frame to a [`FrameSink`] and asks it,
//! once per full pass over the cameras, whether the user wants to quit.

pub mod headless;
pub mod window;

pub use headless::HeadlessSink;
pub use window::WindowSink;

use crate::config::DisplayMode;
use crate::constants::QUIT_KEY;
use crate::errors::AppResult;
use image::RgbImage;

/// Action returned after each pass to control the scan loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopAction {
    /// Continue running the loop
    Continue,
    /// Stop the loop gracefully
    Stop,
}

/// Destination for annotated frames
pub trait FrameSink {
    /// Present the latest frame for a camera
    fn show(&mut self, camera: u32, frame: &RgbImage) -> AppResult<()>;

    /// Called once after every camera has been processed
    ///
    /// Polls for the quit key with a minimal wait.
    fn end_pass(&mut self) -> AppResult<LoopAction>;

    /// Tear down windows or restore the terminal
    fn close(&mut self) -> AppResult<()>;

    /// How the user ends the loop, printed once before scanning starts
    fn quit_hint(&self) -> String {
        format!("Press '{}' to quit.", QUIT_KEY)
    }

    /// Whether the sink draws over the console until `close`
    ///
    /// Report lines are held back while this is true and written once the
    /// sink has been closed.
    fn owns_console(&self) -> bool {
        false
    }

    /// Show a held-back report line inside the display
    fn notice(&mut self, _line: &str) {}
}

/// Create the sink for a display mode
///
/// Called only after at least one camera opened, with the opened indices.
pub fn create_sink(
    mode: DisplayMode,
    cameras: &[u32],
    width: u32,
    height: u32,
) -> AppResult<Box<dyn FrameSink>> {
    match mode {
        DisplayMode::Window => Ok(Box::new(WindowSink::new(cameras, width, height)?)),
        DisplayMode::Terminal => Ok(Box::new(crate::terminal::TerminalSink::new(cameras)?)),
        DisplayMode::Headless => Ok(Box::new(HeadlessSink::new()?)),
    }
}
