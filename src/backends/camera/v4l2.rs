// SPDX-License-Identifier: GPL-3.0-only

//! Direct V4L2 capture through the v4l crate
//!
//! Each camera is opened as `/dev/video{index}` with a memory-mapped stream.
//! Buffers are copied and converted to RGB on every read, so no driver
//! buffer outlives the call.

use super::format_converters::buffer_to_rgb;
use super::types::*;
use super::{CameraOpener, FrameSource};
use crate::constants::CAPTURE_BUFFER_COUNT;
use crate::errors::{CameraError, CameraResult};
use tracing::{debug, info, warn};
use v4l::buffer::Type;
use v4l::io::traits::CaptureStream;
use v4l::prelude::*;
use v4l::video::Capture;

/// Opens real V4L2 devices
#[derive(Debug, Default, Clone, Copy)]
pub struct V4l2Opener;

impl CameraOpener for V4l2Opener {
    fn open(&self, index: u32, format: &CameraFormat) -> CameraResult<Box<dyn FrameSource>> {
        Ok(Box::new(V4l2Camera::open(index, format)?))
    }
}

/// A V4L2 capture device with an active mmap stream
pub struct V4l2Camera {
    index: u32,
    // Declared before `device` so the stream is dropped first
    stream: Option<MmapStream<'static>>,
    device: Option<Device>,
    active: CameraFormat,
}

impl V4l2Camera {
    /// Open `/dev/video{index}` and start streaming
    ///
    /// The requested resolution and pixel format are applied best-effort;
    /// if the driver refuses them the current device format is used as long
    /// as we can convert it.
    pub fn open(index: u32, requested: &CameraFormat) -> CameraResult<Self> {
        info!(index, format = %requested, "Opening V4L2 camera");

        let device = Device::new(index as usize).map_err(|e| CameraError::OpenFailed {
            index,
            reason: e.to_string(),
        })?;

        let mut format = device.format().map_err(|e| CameraError::FormatRejected {
            index,
            reason: e.to_string(),
        })?;
        format.width = requested.width;
        format.height = requested.height;
        format.fourcc = v4l::FourCC::new(&requested.pixel_format.fourcc());

        let applied = match device.set_format(&format) {
            Ok(f) => f,
            Err(e) => {
                warn!(index, error = %e, "Could not set format, using current device format");
                device.format().map_err(|e| CameraError::FormatRejected {
                    index,
                    reason: e.to_string(),
                })?
            }
        };

        let pixel_format = PixelFormat::from_fourcc(&applied.fourcc.repr).ok_or_else(|| {
            CameraError::UnsupportedPixelFormat {
                index,
                fourcc: applied.fourcc.to_string(),
            }
        })?;

        if applied.width != requested.width || applied.height != requested.height {
            warn!(
                index,
                requested_width = requested.width,
                requested_height = requested.height,
                width = applied.width,
                height = applied.height,
                "Driver adjusted capture resolution"
            );
        }

        let active = CameraFormat {
            width: applied.width,
            height: applied.height,
            pixel_format,
        };

        let stream = MmapStream::with_buffers(&device, Type::VideoCapture, CAPTURE_BUFFER_COUNT)
            .map_err(|e| CameraError::OpenFailed {
                index,
                reason: format!("cannot start stream: {}", e),
            })?;

        info!(index, format = %active, "V4L2 capture stream started");

        Ok(Self {
            index,
            stream: Some(stream),
            device: Some(device),
            active,
        })
    }

    /// Format the driver actually accepted
    pub fn active_format(&self) -> &CameraFormat {
        &self.active
    }
}

impl FrameSource for V4l2Camera {
    fn index(&self) -> u32 {
        self.index
    }

    fn read_frame(&mut self) -> CameraResult<CameraFrame> {
        let index = self.index;
        let stream = self.stream.as_mut().ok_or_else(|| CameraError::ReadFailed {
            index,
            reason: "camera already released".to_string(),
        })?;

        let (buf, meta) = stream.next().map_err(|e| CameraError::ReadFailed {
            index,
            reason: e.to_string(),
        })?;

        // MJPG buffers carry their real length in bytesused
        let used = (meta.bytesused as usize).min(buf.len());
        let data = if used > 0 { &buf[..used] } else { buf };

        let image = buffer_to_rgb(
            data,
            self.active.pixel_format,
            self.active.width,
            self.active.height,
        )
        .map_err(|reason| CameraError::DecodeFailed { index, reason })?;

        Ok(CameraFrame::new(index, image, meta.sequence))
    }

    fn release(&mut self) {
        if self.stream.take().is_some() {
            debug!(index = self.index, "Stopped capture stream");
        }
        if self.device.take().is_some() {
            info!(index = self.index, "Released camera");
        }
    }
}

impl Drop for V4l2Camera {
    fn drop(&mut self) {
        self.release();
    }
}
