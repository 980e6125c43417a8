// SPDX-License-Identifier: GPL-3.0-only

//! Display-less sink
//!
//! Frames are dropped; only the console report is produced. Ctrl-C ends the
//! loop at the next pass boundary.

use super::{FrameSink, LoopAction};
use crate::errors::{AppError, AppResult};
use image::RgbImage;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

pub struct HeadlessSink {
    stop_signal: Arc<AtomicBool>,
}

impl HeadlessSink {
    /// Install the Ctrl-C handler and create the sink
    pub fn new() -> AppResult<Self> {
        let stop_signal = Arc::new(AtomicBool::new(false));
        let handler_signal = Arc::clone(&stop_signal);
        ctrlc::set_handler(move || {
            handler_signal.store(true, Ordering::SeqCst);
        })
        .map_err(|e| AppError::Display(format!("cannot install Ctrl-C handler: {}", e)))?;

        info!("Running headless, press Ctrl-C to stop");
        Ok(Self { stop_signal })
    }

    /// Create a sink driven by an external stop flag
    pub fn with_stop_signal(stop_signal: Arc<AtomicBool>) -> Self {
        Self { stop_signal }
    }
}

impl FrameSink for HeadlessSink {
    fn show(&mut self, _camera: u32, _frame: &RgbImage) -> AppResult<()> {
        Ok(())
    }

    fn end_pass(&mut self) -> AppResult<LoopAction> {
        if self.stop_signal.load(Ordering::SeqCst) {
            Ok(LoopAction::Stop)
        } else {
            Ok(LoopAction::Continue)
        }
    }

    fn close(&mut self) -> AppResult<()> {
        Ok(())
    }

    fn quit_hint(&self) -> String {
        "Press Ctrl-C to quit.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_signal_ends_loop() {
        let signal = Arc::new(AtomicBool::new(false));
        let mut sink = HeadlessSink::with_stop_signal(Arc::clone(&signal));
        assert_eq!(sink.end_pass().unwrap(), LoopAction::Continue);

        signal.store(true, Ordering::SeqCst);
        assert_eq!(sink.end_pass().unwrap(), LoopAction::Stop);
    }
}
