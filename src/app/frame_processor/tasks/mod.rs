// SPDX-License-Identifier: GPL-3.0-only

//! Frame processing tasks
//!
//! This module contains the decoder abstraction and its implementations.

pub mod qr_detector;

pub use qr_detector::QrDetector;

use super::types::QrDetection;
use crate::backends::camera::CameraFrame;

/// Finds and decodes codes in a frame
///
/// Returns zero or more detections in frame pixel coordinates. Codes that are
/// located but fail to decode are left out.
pub trait CodeDecoder {
    fn decode(&self, frame: &CameraFrame) -> Vec<QrDetection>;
}
