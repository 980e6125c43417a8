// SPDX-License-Identifier: GPL-3.0-only

//! Per-camera session state
//!
//! A [`CameraSession`] owns one open capture device together with the
//! debounce state used to decide whether a decoded payload gets logged.

use crate::backends::camera::{CameraFrame, FrameSource};
use crate::constants::DEBOUNCE_WINDOW;
use crate::errors::CameraResult;
use std::time::{Duration, Instant};
use tracing::trace;

/// Single-slot debounce over decoded payloads
///
/// Only the last payload and the time it was counted are remembered, so
/// two codes alternating in view both count on every switch.
#[derive(Debug, Clone)]
pub struct DetectionTracker {
    window: Duration,
    detection_count: u64,
    last_payload: Option<String>,
    last_detection_time: Option<Instant>,
}

impl Default for DetectionTracker {
    fn default() -> Self {
        Self::new(DEBOUNCE_WINDOW)
    }
}

impl DetectionTracker {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            detection_count: 0,
            last_payload: None,
            last_detection_time: None,
        }
    }

    /// Record a decoded payload seen at `now`
    ///
    /// Returns the new detection number when the payload differs from the
    /// last counted one or the window has elapsed since it was counted.
    /// Returns `None` when the detection is suppressed.
    pub fn observe(&mut self, payload: &str, now: Instant) -> Option<u64> {
        let changed = self.last_payload.as_deref() != Some(payload);
        let expired = match self.last_detection_time {
            Some(last) => now.saturating_duration_since(last) > self.window,
            None => true,
        };

        if !changed && !expired {
            trace!(payload, "Suppressed repeated payload");
            return None;
        }

        self.detection_count += 1;
        self.last_payload = Some(payload.to_string());
        self.last_detection_time = Some(now);
        Some(self.detection_count)
    }

    pub fn detection_count(&self) -> u64 {
        self.detection_count
    }

    pub fn last_payload(&self) -> Option<&str> {
        self.last_payload.as_deref()
    }

    pub fn last_detection_time(&self) -> Option<Instant> {
        self.last_detection_time
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

/// One open camera and its detection state
pub struct CameraSession {
    index: u32,
    source: Box<dyn FrameSource>,
    tracker: DetectionTracker,
}

impl CameraSession {
    pub fn new(source: Box<dyn FrameSource>, window: Duration) -> Self {
        Self {
            index: source.index(),
            source,
            tracker: DetectionTracker::new(window),
        }
    }

    /// Device index
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn read_frame(&mut self) -> CameraResult<CameraFrame> {
        self.source.read_frame()
    }

    pub fn tracker(&self) -> &DetectionTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut DetectionTracker {
        &mut self.tracker
    }

    pub fn detection_count(&self) -> u64 {
        self.tracker.detection_count()
    }

    /// Release the device handle and return the final count
    pub fn release(mut self) -> CameraSummary {
        self.source.release();
        CameraSummary {
            camera: self.index,
            detections: self.tracker.detection_count(),
        }
    }
}

/// Final per-camera totals reported at shutdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraSummary {
    pub camera: u32,
    pub detections: u64,
}
