// SPDX-License-Identifier: GPL-3.0-only

//! Camera opening and release
//!
//! Devices come from a fixed list of indices. A device that fails to open is
//! reported and skipped; the run only stops when none of them open.

use super::session::{CameraSession, CameraSummary};
use crate::backends::camera::{CameraFormat, CameraOpener};
use crate::errors::{AppResult, CameraError};
use std::io::Write;
use std::time::Duration;
use tracing::{info, warn};

/// Outcome of opening the configured devices
pub enum OpenOutcome {
    /// At least one camera is streaming
    Ready(Vec<CameraSession>),
    /// Nothing could be opened
    NoCameras,
}

/// Open every configured device index in order
///
/// Failures are written to `report` and logged; the remaining indices are
/// still tried.
pub fn open_sessions<W: Write>(
    indices: &[u32],
    format: &CameraFormat,
    debounce_window: Duration,
    opener: &dyn CameraOpener,
    report: &mut W,
) -> AppResult<OpenOutcome> {
    writeln!(report, "Opening cameras...")?;

    let mut sessions = Vec::with_capacity(indices.len());
    for &index in indices {
        match opener.open(index, format) {
            Ok(source) => {
                info!(index, "Camera opened");
                sessions.push(CameraSession::new(source, debounce_window));
            }
            Err(e) => {
                warn!(index, error = %e, "Skipping camera");
                writeln!(
                    report,
                    "Camera {} could not be opened, check its connection: {}",
                    index, e
                )?;
            }
        }
    }

    if sessions.is_empty() {
        warn!(error = %CameraError::NoCameraAvailable, "Nothing to scan");
        writeln!(report, "No cameras available. Exiting.")?;
        return Ok(OpenOutcome::NoCameras);
    }

    Ok(OpenOutcome::Ready(sessions))
}

/// Release every session, returning the final totals in session order
pub fn release_all(sessions: Vec<CameraSession>) -> Vec<CameraSummary> {
    sessions.into_iter().map(CameraSession::release).collect()
}
