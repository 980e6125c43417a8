// SPDX-License-Identifier: MPL-2.0

//! Camera backend abstraction
//!
//! ```text
//! ┌─────────────────────┐
//! │  Scan loop (Scanner)│
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │   CameraOpener      │  ← opens a device index with a requested format
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │   FrameSource trait │  ← one blocking read per loop tick
//! └──────────┬──────────┘
//!            │
//!            ▼
//!        ┌──────┐
//!        │ V4L2 │  ← Concrete implementation
//!        └──────┘
//! ```

pub mod format_converters;
pub mod types;
pub mod v4l2;

pub use types::*;
pub use v4l2::{V4l2Camera, V4l2Opener};

use crate::errors::CameraResult;

/// An open capture device
///
/// Implementations own their device handle exclusively. `read_frame` blocks
/// until the driver hands over a buffer.
pub trait FrameSource {
    /// Device index this source was opened from
    fn index(&self) -> u32;

    /// Read and convert the next frame
    fn read_frame(&mut self) -> CameraResult<CameraFrame>;

    /// Release the device handle
    ///
    /// Called exactly once by the session that owns the source.
    fn release(&mut self);
}

/// Opens capture devices by index
pub trait CameraOpener {
    /// Open the device and apply the requested format (best-effort)
    fn open(&self, index: u32, format: &CameraFormat) -> CameraResult<Box<dyn FrameSource>>;
}
