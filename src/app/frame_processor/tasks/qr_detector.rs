// SPDX-License-Identifier: GPL-3.0-only

//! QR code detection task
//!
//! This module implements QR code detection using the rqrr crate.
//! It converts camera frames to grayscale and searches for QR codes,
//! returning their corner points and decoded content.

use super::CodeDecoder;
use crate::app::frame_processor::types::{Point, QrDetection};
use crate::backends::camera::CameraFrame;
use crate::constants::DEFAULT_MAX_DECODE_DIMENSION;
use image::GrayImage;
use image::imageops::{self, FilterType};
use std::time::Instant;
use tracing::{debug, trace};

/// QR code detector
///
/// Analyzes camera frames to detect and decode QR codes.
/// Large frames are downscaled before the grid search.
pub struct QrDetector {
    /// Maximum dimension for processing (frames are downscaled to this)
    max_dimension: u32,
}

impl Default for QrDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl QrDetector {
    /// Create a new QR detector with default settings
    pub fn new() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DECODE_DIMENSION,
        }
    }

    /// Create a QR detector with custom max dimension
    pub fn with_max_dimension(max_dimension: u32) -> Self {
        Self {
            max_dimension: max_dimension.max(1),
        }
    }

    pub fn max_dimension(&self) -> u32 {
        self.max_dimension
    }
}

impl CodeDecoder for QrDetector {
    fn decode(&self, frame: &CameraFrame) -> Vec<QrDetection> {
        let start = Instant::now();

        let gray = imageops::grayscale(&frame.image);
        let (gray, scale) = downscale_for_detection(gray, self.max_dimension);

        trace!(
            camera = frame.camera,
            proc_width = gray.width(),
            proc_height = gray.height(),
            scale,
            conversion_ms = start.elapsed().as_millis(),
            "Prepared grayscale image for processing"
        );

        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
            gray.width() as usize,
            gray.height() as usize,
            |x, y| gray.get_pixel(x as u32, y as u32).0[0],
        );
        let grids = prepared.detect_grids();

        let mut detections = Vec::with_capacity(grids.len());
        for grid in grids {
            let mut bytes = Vec::new();
            if let Err(e) = grid.decode_to(&mut bytes) {
                debug!(camera = frame.camera, error = %e, "Failed to decode QR code");
                continue;
            }
            let payload = String::from_utf8_lossy(&bytes).into_owned();

            let polygon = grid
                .bounds
                .iter()
                .map(|p| scale_point(p.x, p.y, scale))
                .collect::<Vec<_>>();

            let detection = QrDetection::new(payload, polygon);
            debug!(
                camera = frame.camera,
                content = %detection.payload,
                left = detection.rect.left,
                top = detection.rect.top,
                width = detection.rect.width,
                height = detection.rect.height,
                "Detected QR code"
            );
            detections.push(detection);
        }

        if !detections.is_empty() {
            debug!(
                camera = frame.camera,
                count = detections.len(),
                total_ms = start.elapsed().as_millis(),
                "QR detection found codes"
            );
        }

        detections
    }
}

/// Downscale so neither side exceeds `max_dimension`
///
/// Returns the image to search and the factor that maps its coordinates back
/// to the full-size frame.
fn downscale_for_detection(gray: GrayImage, max_dimension: u32) -> (GrayImage, f32) {
    let (width, height) = gray.dimensions();
    if width <= max_dimension && height <= max_dimension {
        return (gray, 1.0);
    }

    let scale = (width as f32 / max_dimension as f32).max(height as f32 / max_dimension as f32);
    let new_width = ((width as f32 / scale) as u32).max(1);
    let new_height = ((height as f32 / scale) as u32).max(1);

    let resized = imageops::resize(&gray, new_width, new_height, FilterType::Triangle);
    (resized, scale)
}

/// Map a point in the downscaled image back to frame coordinates
fn scale_point(x: i32, y: i32, scale: f32) -> Point {
    Point::new(
        (x as f32 * scale).round() as i32,
        (y as f32 * scale).round() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, RgbImage};

    #[test]
    fn test_small_frames_are_not_downscaled() {
        let gray = GrayImage::from_pixel(640, 480, Luma([0]));
        let (out, scale) = downscale_for_detection(gray, 1280);
        assert_eq!(out.dimensions(), (640, 480));
        assert_eq!(scale, 1.0);
    }

    #[test]
    fn test_large_frames_fit_max_dimension() {
        let gray = GrayImage::from_pixel(1920, 1080, Luma([0]));
        let (out, scale) = downscale_for_detection(gray, 960);
        assert_eq!(out.dimensions(), (960, 540));
        assert_eq!(scale, 2.0);
    }

    #[test]
    fn test_scale_point_maps_back_to_frame() {
        assert_eq!(scale_point(10, 21, 2.0), Point::new(20, 42));
        assert_eq!(scale_point(10, 21, 1.0), Point::new(10, 21));
    }

    #[test]
    fn test_blank_frame_has_no_detections() {
        let white = RgbImage::from_pixel(320, 240, image::Rgb([255, 255, 255]));
        let frame = CameraFrame::new(2, white, 0);
        let detections = QrDetector::new().decode(&frame);
        assert!(detections.is_empty());
    }
}
