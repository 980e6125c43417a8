// SPDX-License-Identifier: MPL-2.0

//! Frame processor module
//!
//! Runs the decode step on captured frames. Currently implements QR code
//! detection.

pub mod tasks;
pub mod types;

pub use tasks::qr_detector;
pub use tasks::{CodeDecoder, QrDetector};
pub use types::{BoundingRect, Point, QrDetection};
