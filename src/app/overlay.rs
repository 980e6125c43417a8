// SPDX-License-Identifier: GPL-3.0-only

//! Frame annotation
//!
//! Draws the outline and payload of every detection plus a fixed instruction
//! caption onto the RGB frame before it is displayed.

use super::frame_processor::{Point, QrDetection};
use crate::constants::{colors, overlay};
use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use imageproc::geometry::convex_hull;

/// Glyph cell size of the bitmap font
const GLYPH_SIZE: u32 = 8;

/// Points to draw as the closed outline of a detection
///
/// Polygons with more than four points are replaced by their convex hull;
/// anything else is used exactly as reported.
pub fn outline_points(polygon: &[Point]) -> Vec<Point> {
    if polygon.len() <= 4 {
        return polygon.to_vec();
    }

    let points: Vec<imageproc::point::Point<i32>> = polygon
        .iter()
        .map(|p| imageproc::point::Point::new(p.x, p.y))
        .collect();

    convex_hull(points.as_slice())
        .into_iter()
        .map(|p| Point::new(p.x, p.y))
        .collect()
}

/// Draws detections and the caption onto frames
#[derive(Debug, Clone)]
pub struct Overlay {
    caption: String,
}

impl Overlay {
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
        }
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Draw the outline and payload text of one detection
    pub fn draw_detection(&self, image: &mut RgbImage, detection: &QrDetection) {
        let outline = outline_points(&detection.polygon);
        draw_closed_polygon(
            image,
            &outline,
            Rgb(colors::DETECTION),
            overlay::OUTLINE_THICKNESS,
        );

        let (text_x, text_y) = payload_text_origin(image, detection);
        draw_text(
            image,
            text_x,
            text_y,
            &detection.payload,
            Rgb(colors::DETECTION),
            overlay::PAYLOAD_TEXT_SCALE,
        );
    }

    /// Draw the instruction caption
    pub fn draw_caption(&self, image: &mut RgbImage) {
        let (x, y) = overlay::CAPTION_ORIGIN;
        draw_text(
            image,
            x,
            y,
            &self.caption,
            Rgb(colors::CAPTION),
            overlay::CAPTION_SCALE,
        );
    }

    /// Annotate a frame with all of its detections and the caption
    pub fn render(&self, image: &mut RgbImage, detections: &[QrDetection]) {
        for detection in detections {
            self.draw_detection(image, detection);
        }
        self.draw_caption(image);
    }
}

/// Baseline origin for a detection's payload text
///
/// Sits just above the bounding rect, clamped so the first glyph cell stays
/// inside the frame.
fn payload_text_origin(image: &RgbImage, detection: &QrDetection) -> (i32, i32) {
    let cell = (GLYPH_SIZE * overlay::PAYLOAD_TEXT_SCALE.max(1)) as i32;
    let max_x = (image.width() as i32 - cell).max(0);
    let max_y = (image.height() as i32).max(cell);

    let x = detection.rect.left.clamp(0, max_x);
    let y = (detection.rect.top - overlay::PAYLOAD_TEXT_OFFSET).clamp(cell, max_y);
    (x, y)
}

/// Draw a closed polygon with the given stroke thickness
///
/// Thickness is approximated by offsetting the edge by whole pixels.
pub fn draw_closed_polygon(image: &mut RgbImage, points: &[Point], color: Rgb<u8>, thickness: i32) {
    if points.len() < 2 {
        return;
    }

    for (i, start) in points.iter().enumerate() {
        let end = points[(i + 1) % points.len()];
        for offset in 0..thickness.max(1) {
            for (dx, dy) in [(offset, 0), (0, offset)] {
                draw_line_segment_mut(
                    image,
                    ((start.x + dx) as f32, (start.y + dy) as f32),
                    ((end.x + dx) as f32, (end.y + dy) as f32),
                    color,
                );
            }
        }
    }
}

/// Draw text with its baseline at `y`, like a typical `putText`
///
/// Characters without a glyph are drawn as '?'. Pixels outside the image
/// are clipped.
pub fn draw_text(image: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>, scale: u32) {
    let scale = scale.max(1);
    let cell = (GLYPH_SIZE * scale) as i32;
    let top = y - cell;

    for (i, ch) in text.chars().enumerate() {
        let glyph = BASIC_FONTS
            .get(ch)
            .or_else(|| BASIC_FONTS.get('?'))
            .unwrap_or([0; 8]);
        let origin_x = x + i as i32 * cell;
        if origin_x >= image.width() as i32 {
            break;
        }
        draw_glyph(image, origin_x, top, &glyph, color, scale);
    }
}

fn draw_glyph(image: &mut RgbImage, x: i32, y: i32, glyph: &[u8; 8], color: Rgb<u8>, scale: u32) {
    let (width, height) = (image.width() as i32, image.height() as i32);

    for (row, bits) in glyph.iter().enumerate() {
        for col in 0..8 {
            // Bit 0 is the leftmost pixel
            if bits & (1u8 << col) == 0 {
                continue;
            }
            for sy in 0..scale as i32 {
                for sx in 0..scale as i32 {
                    let px = x + col * scale as i32 + sx;
                    let py = y + row as i32 * scale as i32 + sy;
                    if px >= 0 && py >= 0 && px < width && py < height {
                        image.put_pixel(px as u32, py as u32, color);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    fn sorted(mut points: Vec<Point>) -> Vec<Point> {
        points.sort();
        points
    }

    #[test]
    fn test_four_points_are_used_as_is() {
        // Concave quad: a hull would drop the (20, 15) vertex
        let quad = vec![
            Point::new(10, 10),
            Point::new(30, 10),
            Point::new(20, 15),
            Point::new(20, 30),
        ];
        assert_eq!(outline_points(&quad), quad);
    }

    #[test]
    fn test_more_than_four_points_use_convex_hull() {
        let polygon = vec![
            Point::new(0, 0),
            Point::new(5, 5),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
        ];
        let hull = outline_points(&polygon);
        assert_eq!(
            sorted(hull),
            vec![
                Point::new(0, 0),
                Point::new(0, 10),
                Point::new(10, 0),
                Point::new(10, 10),
            ]
        );
    }

    #[test]
    fn test_outline_is_drawn_in_detection_color() {
        let mut image = RgbImage::from_pixel(40, 40, BLACK);
        let detection = QrDetection::new(
            "",
            vec![
                Point::new(10, 20),
                Point::new(30, 20),
                Point::new(30, 35),
                Point::new(10, 35),
            ],
        );
        Overlay::new("").draw_detection(&mut image, &detection);

        assert_eq!(image.get_pixel(20, 20).0, colors::DETECTION);
        assert_eq!(image.get_pixel(10, 28).0, colors::DETECTION);
        assert_eq!(image.get_pixel(20, 28).0, [0, 0, 0]);
    }

    fn count_color(image: &RgbImage, color: [u8; 3], rows: std::ops::Range<u32>) -> usize {
        rows.flat_map(|y| (0..image.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| image.get_pixel(x, y).0 == color)
            .count()
    }

    fn square_at(left: i32, top: i32, size: i32) -> Vec<Point> {
        vec![
            Point::new(left, top),
            Point::new(left + size, top),
            Point::new(left + size, top + size),
            Point::new(left, top + size),
        ]
    }

    #[test]
    fn test_payload_text_is_drawn_above_the_code() {
        let mut image = RgbImage::from_pixel(120, 80, BLACK);
        let detection = QrDetection::new("QR", square_at(20, 40, 20));
        Overlay::new("").draw_detection(&mut image, &detection);

        // Baseline at top - 10, so the glyph cell spans rows 22..30
        assert!(count_color(&image, colors::DETECTION, 22..30) > 0);
        assert_eq!(count_color(&image, colors::DETECTION, 0..22), 0);
    }

    #[test]
    fn test_payload_text_near_top_edge_stays_visible() {
        let with_text = {
            let mut image = RgbImage::from_pixel(120, 80, BLACK);
            let detection = QrDetection::new("QR", square_at(-4, 5, 20));
            Overlay::new("").draw_detection(&mut image, &detection);
            image
        };
        let without_text = {
            let mut image = RgbImage::from_pixel(120, 80, BLACK);
            let detection = QrDetection::new("", square_at(-4, 5, 20));
            Overlay::new("").draw_detection(&mut image, &detection);
            image
        };

        let text_pixels = count_color(&with_text, colors::DETECTION, 0..8);
        let outline_pixels = count_color(&without_text, colors::DETECTION, 0..8);
        assert!(text_pixels > outline_pixels);
    }

    #[test]
    fn test_payload_origin_is_clamped_to_frame() {
        let image = RgbImage::new(100, 60);
        let detection = QrDetection::new("QR", square_at(-10, 2, 10));
        assert_eq!(payload_text_origin(&image, &detection), (0, 8));

        let detection = QrDetection::new("QR", square_at(150, 90, 10));
        assert_eq!(payload_text_origin(&image, &detection), (92, 60));
    }

    #[test]
    fn test_text_is_clipped_at_frame_edges() {
        let mut image = RgbImage::from_pixel(16, 16, BLACK);
        // Starts left of and above the frame; must not panic
        draw_text(&mut image, -4, 4, "QR", Rgb([255, 255, 255]), 2);
        draw_text(&mut image, 12, 40, "QR", Rgb([255, 255, 255]), 1);
    }

    #[test]
    fn test_caption_draws_pixels_near_origin() {
        let mut image = RgbImage::from_pixel(200, 60, BLACK);
        Overlay::new("Show").draw_caption(&mut image);

        let (x, y) = overlay::CAPTION_ORIGIN;
        let cell = (GLYPH_SIZE * overlay::CAPTION_SCALE) as i32;
        let painted = (x..x + cell * 4)
            .flat_map(|px| (y - cell..y).map(move |py| (px, py)))
            .any(|(px, py)| image.get_pixel(px as u32, py as u32).0 == colors::CAPTION);
        assert!(painted);
    }
}
