// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use std::time::Duration;

/// Device indices polled when nothing else is configured (`/dev/video{N}`)
pub const DEFAULT_CAMERA_INDICES: [u32; 4] = [2, 4, 6, 8];

/// Requested capture width (best-effort)
pub const DEFAULT_WIDTH: u32 = 1280;

/// Requested capture height (best-effort)
pub const DEFAULT_HEIGHT: u32 = 720;

/// Window during which an identical payload on the same camera is not re-logged
pub const DEBOUNCE_WINDOW: Duration = Duration::from_secs(2);

/// Frames larger than this (on either side) are downscaled before decoding
pub const DEFAULT_MAX_DECODE_DIMENSION: u32 = 1280;

/// Number of mmap buffers requested from the V4L2 driver
pub const CAPTURE_BUFFER_COUNT: u32 = 4;

/// Wait used when polling for the quit key after each pass
pub const KEY_POLL_WAIT: Duration = Duration::from_millis(1);

/// Key that ends the scan loop
pub const QUIT_KEY: char = 'q';

/// Instruction caption drawn on every frame
pub const DEFAULT_CAPTION: &str = "Show a QR code to the camera";

/// Overlay colors (RGB)
pub mod colors {
    /// Detection outline and payload text
    pub const DETECTION: [u8; 3] = [0, 255, 0];
    /// Instruction caption
    pub const CAPTION: [u8; 3] = [255, 0, 0];
}

/// Overlay geometry in pixels
pub mod overlay {
    /// Outline thickness
    pub const OUTLINE_THICKNESS: i32 = 2;
    /// Payload text is drawn this far above the bounding box
    pub const PAYLOAD_TEXT_OFFSET: i32 = 10;
    /// Glyph scale for payload text (8px glyphs)
    pub const PAYLOAD_TEXT_SCALE: u32 = 1;
    /// Glyph scale for the caption
    pub const CAPTION_SCALE: u32 = 2;
    /// Caption anchor (left, baseline)
    pub const CAPTION_ORIGIN: (i32, i32) = (10, 30);
}

/// Window title for a camera preview
pub fn window_title(camera: u32) -> String {
    format!("QR Monitor - Camera {}", camera)
}
