// SPDX-License-Identifier: GPL-3.0-only
// Shared types for camera backend abstraction

//! Shared types for camera backends

use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Capture pixel format requested from the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PixelFormat {
    /// Motion JPEG (most UVC webcams reach 1280x720 at full rate only in MJPG)
    #[default]
    Mjpg,
    /// Packed YUV 4:2:2
    Yuyv,
    /// Packed 24-bit RGB
    Rgb3,
}

impl PixelFormat {
    /// V4L2 FourCC bytes for this format
    pub fn fourcc(&self) -> [u8; 4] {
        match self {
            PixelFormat::Mjpg => *b"MJPG",
            PixelFormat::Yuyv => *b"YUYV",
            PixelFormat::Rgb3 => *b"RGB3",
        }
    }

    /// Map a FourCC reported by the driver back to a supported format
    pub fn from_fourcc(fourcc: &[u8; 4]) -> Option<Self> {
        match fourcc {
            b"MJPG" | b"JPEG" => Some(PixelFormat::Mjpg),
            b"YUYV" => Some(PixelFormat::Yuyv),
            b"RGB3" => Some(PixelFormat::Rgb3),
            _ => None,
        }
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fourcc = self.fourcc();
        write!(f, "{}", String::from_utf8_lossy(&fourcc))
    }
}

/// Requested capture format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraFormat {
    pub width: u32,
    pub height: u32,
    pub pixel_format: PixelFormat,
}

impl std::fmt::Display for CameraFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{} {}", self.width, self.height, self.pixel_format)
    }
}

/// A single captured frame, already converted to RGB
#[derive(Debug, Clone)]
pub struct CameraFrame {
    /// Device index the frame came from
    pub camera: u32,
    pub image: RgbImage,
    /// Driver sequence number
    pub sequence: u32,
    /// Timestamp when frame was captured
    pub captured_at: Instant,
}

impl CameraFrame {
    pub fn new(camera: u32, image: RgbImage, sequence: u32) -> Self {
        Self {
            camera,
            image,
            sequence,
            captured_at: Instant::now(),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fourcc_round_trip_for_supported_formats() {
        for format in [PixelFormat::Mjpg, PixelFormat::Yuyv, PixelFormat::Rgb3] {
            assert_eq!(PixelFormat::from_fourcc(&format.fourcc()), Some(format));
        }
        assert_eq!(PixelFormat::from_fourcc(b"NV12"), None);
    }

    #[test]
    fn test_camera_format_display() {
        let format = CameraFormat {
            width: 1280,
            height: 720,
            pixel_format: PixelFormat::Yuyv,
        };
        assert_eq!(format.to_string(), "1280x720 YUYV");
    }
}
