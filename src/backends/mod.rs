// SPDX-License-Identifier: MPL-2.0

//! Backend abstraction layer for camera capture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │           Scan loop (app::Scanner)           │
//! └────────────────────┬────────────────────────┘
//!                      │ FrameSource
//! ┌────────────────────┴────────────────────────┐
//! │     Camera backend (V4L2 via the v4l crate)  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! - [`camera`]: device opening, frame capture and pixel conversion

pub mod camera;
