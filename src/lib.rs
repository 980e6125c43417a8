// SPDX-License-Identifier: MPL-2.0

//! QR Monitor - watches several cameras for QR codes
//!
//! Every configured camera is polled in turn from a single thread. Each frame
//! is searched for QR codes, annotated with the code outline and payload,
//! and shown in a preview. Newly seen payloads are written to the console,
//! debounced per camera.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`app`]: scan loop, per-camera sessions, decoding and overlay
//! - [`backends`]: V4L2 camera capture and pixel conversion
//! - [`display`]: preview sinks (windows, headless) and loop control
//! - [`terminal`]: terminal preview sink
//! - [`config`]: runtime configuration
//! - [`errors`]: error types

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod display;
pub mod errors;
pub mod terminal;

// Re-export commonly used types
pub use app::frame_processor::{CodeDecoder, QrDetection, QrDetector};
pub use app::{CameraSession, CameraSummary, DetectionTracker, Scanner};
pub use config::{Config, DisplayMode};
pub use errors::{AppError, AppResult, CameraError, CameraResult};
