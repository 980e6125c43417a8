// SPDX-License-Identifier: GPL-3.0-only
//! Pixel format conversion for captured V4L2 buffers
//!
//! Every driver format we accept is turned into a packed RGB image before it
//! reaches the decoder or the overlay.

use super::types::PixelFormat;
use image::RgbImage;

/// Convert one YUV (BT.601) sample to RGB
fn yuv_to_rgb(y: u8, u: u8, v: u8) -> [u8; 3] {
    let y = y as f32;
    let u = u as f32 - 128.0;
    let v = v as f32 - 128.0;

    let r = (y + 1.402 * v).clamp(0.0, 255.0) as u8;
    let g = (y - 0.344136 * u - 0.714136 * v).clamp(0.0, 255.0) as u8;
    let b = (y + 1.772 * u).clamp(0.0, 255.0) as u8;

    [r, g, b]
}

/// Convert YUYV (YUV 4:2:2) to packed RGB
///
/// YUYV format: Y0 U0 Y1 V0 - each 4-byte group encodes 2 pixels.
/// Returns `None` if the buffer is shorter than `width * height * 2`.
pub fn yuyv_to_rgb(data: &[u8], width: u32, height: u32) -> Option<Vec<u8>> {
    let pixel_count = (width * height) as usize;
    if data.len() < pixel_count * 2 {
        return None;
    }

    let mut rgb = Vec::with_capacity(pixel_count * 3);
    for chunk in data[..pixel_count * 2].chunks_exact(4) {
        let (y0, u, y1, v) = (chunk[0], chunk[1], chunk[2], chunk[3]);
        rgb.extend_from_slice(&yuv_to_rgb(y0, u, v));
        rgb.extend_from_slice(&yuv_to_rgb(y1, u, v));
    }

    Some(rgb)
}

/// Turn a raw driver buffer into an RGB image
pub fn buffer_to_rgb(
    data: &[u8],
    format: PixelFormat,
    width: u32,
    height: u32,
) -> Result<RgbImage, String> {
    match format {
        PixelFormat::Mjpg => image::load_from_memory_with_format(data, image::ImageFormat::Jpeg)
            .map(|img| img.to_rgb8())
            .map_err(|e| format!("MJPG decode failed: {}", e)),
        PixelFormat::Yuyv => {
            let rgb = yuyv_to_rgb(data, width, height).ok_or_else(|| {
                format!(
                    "YUYV buffer too short: {} bytes for {}x{}",
                    data.len(),
                    width,
                    height
                )
            })?;
            RgbImage::from_raw(width, height, rgb)
                .ok_or_else(|| "YUYV conversion size mismatch".to_string())
        }
        PixelFormat::Rgb3 => {
            let len = (width * height * 3) as usize;
            if data.len() < len {
                return Err(format!(
                    "RGB3 buffer too short: {} bytes for {}x{}",
                    data.len(),
                    width,
                    height
                ));
            }
            RgbImage::from_raw(width, height, data[..len].to_vec())
                .ok_or_else(|| "RGB3 size mismatch".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yuyv_grey_maps_to_grey() {
        // Neutral chroma (128) keeps luma as grey
        let data = [100u8, 128, 200, 128];
        let rgb = yuyv_to_rgb(&data, 2, 1).unwrap();
        assert_eq!(rgb, vec![100, 100, 100, 200, 200, 200]);
    }

    #[test]
    fn test_yuyv_short_buffer_rejected() {
        let data = [0u8; 6];
        assert!(yuyv_to_rgb(&data, 2, 2).is_none());
    }

    #[test]
    fn test_rgb3_buffer_passthrough() {
        let data: Vec<u8> = (0..12).collect();
        let img = buffer_to_rgb(&data, PixelFormat::Rgb3, 2, 2).unwrap();
        assert_eq!(img.get_pixel(1, 1).0, [9, 10, 11]);
    }

    #[test]
    fn test_mjpg_garbage_is_an_error() {
        let data = [0u8, 1, 2, 3];
        assert!(buffer_to_rgb(&data, PixelFormat::Mjpg, 2, 2).is_err());
    }
}
