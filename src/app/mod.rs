// SPDX-License-Identifier: MPL-2.0

//! Scan application
//!
//! # Architecture
//!
//! - `camera_ops`: opening the configured devices and releasing them
//! - `session`: per-camera handle plus debounce state
//! - `frame_processor`: the decode step (QR detection)
//! - `overlay`: outline, payload text and caption drawing
//! - `scanner`: the single-threaded polling loop and shutdown
//!
//! # Main Types
//!
//! - `Scanner`: runs read → decode → debounce/log → render → display
//! - `CameraSession`: one open camera and its detection counter

pub mod camera_ops;
pub mod frame_processor;
pub mod overlay;
pub mod scanner;
pub mod session;

pub use camera_ops::{OpenOutcome, open_sessions, release_all};
pub use overlay::{Overlay, outline_points};
pub use scanner::Scanner;
pub use session::{CameraSession, CameraSummary, DetectionTracker};

use crate::backends::camera::{CameraFormat, CameraOpener};
use crate::config::Config;
use crate::display::FrameSink;
use crate::errors::AppResult;
use frame_processor::CodeDecoder;
use std::io::Write;
use tracing::{error, info};

/// Run a complete scan session
///
/// Opens the configured cameras, creates the display through `make_sink`,
/// loops until the user quits and shuts everything down. Returns `None`
/// when no camera could be opened; the display is never created then.
pub fn run_scan<W, F>(
    config: &Config,
    opener: &dyn CameraOpener,
    decoder: Box<dyn CodeDecoder>,
    make_sink: F,
    mut report: W,
) -> AppResult<Option<Vec<CameraSummary>>>
where
    W: Write,
    F: FnOnce(&[u32]) -> AppResult<Box<dyn FrameSink>>,
{
    let format = CameraFormat {
        width: config.width,
        height: config.height,
        pixel_format: config.pixel_format,
    };

    let sessions = match open_sessions(
        &config.camera_indices,
        &format,
        config.debounce_window(),
        opener,
        &mut report,
    )? {
        OpenOutcome::Ready(sessions) => sessions,
        OpenOutcome::NoCameras => return Ok(None),
    };

    let cameras: Vec<u32> = sessions.iter().map(CameraSession::index).collect();
    let mut sink = match make_sink(&cameras) {
        Ok(sink) => sink,
        Err(e) => {
            error!(error = %e, "Cannot create display");
            release_all(sessions);
            return Err(e);
        }
    };

    info!(?cameras, display = %config.display, "Cameras ready");
    let mut scanner = Scanner::new(
        sessions,
        decoder,
        Overlay::new(config.caption.clone()),
        report,
    );

    // The terminal preview shows its own quit hint in the status bar
    if !sink.owns_console()
        && let Err(e) = scanner
            .report_line(
                sink.as_mut(),
                "Cameras are open. Show a QR code to each camera.".to_string(),
            )
            .and_then(|_| {
                let quit_hint = sink.quit_hint();
                scanner.report_line(sink.as_mut(), quit_hint)
            })
    {
        scanner.shutdown(sink.as_mut())?;
        return Err(e);
    }

    let loop_result = scanner.run(sink.as_mut());
    if let Err(e) = &loop_result {
        error!(error = %e, "Scan loop failed, shutting down");
    }

    let summaries = scanner.shutdown(sink.as_mut())?;
    loop_result?;
    Ok(Some(summaries))
}
