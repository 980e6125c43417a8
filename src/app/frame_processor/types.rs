// SPDX-License-Identifier: MPL-2.0

//! Core types for frame processing results
//!
//! A detection is produced by the decoder, consumed by the debounce and
//! overlay steps of the same pass, and then dropped.

/// A point in frame pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding rectangle in frame pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundingRect {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

impl BoundingRect {
    /// Smallest rectangle containing every point
    ///
    /// Returns the zero rectangle for an empty slice.
    pub fn enclosing(points: &[Point]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };

        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        Self {
            left: min_x,
            top: min_y,
            width: (max_x - min_x) as u32,
            height: (max_y - min_y) as u32,
        }
    }
}

/// A decoded QR code within one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrDetection {
    /// Decoded text
    pub payload: String,
    /// Boundary points as reported by the decoder, in order
    pub polygon: Vec<Point>,
    /// Bounding rectangle of the code
    pub rect: BoundingRect,
}

impl QrDetection {
    /// Create a detection whose rectangle encloses the polygon
    pub fn new(payload: impl Into<String>, polygon: Vec<Point>) -> Self {
        let rect = BoundingRect::enclosing(&polygon);
        Self {
            payload: payload.into(),
            polygon,
            rect,
        }
    }

    /// Create a detection with an explicit rectangle
    pub fn with_rect(payload: impl Into<String>, polygon: Vec<Point>, rect: BoundingRect) -> Self {
        Self {
            payload: payload.into(),
            polygon,
            rect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enclosing_rect_of_rotated_quad() {
        let quad = [
            Point::new(50, 10),
            Point::new(90, 50),
            Point::new(50, 90),
            Point::new(10, 50),
        ];
        let rect = BoundingRect::enclosing(&quad);
        assert_eq!(
            rect,
            BoundingRect {
                left: 10,
                top: 10,
                width: 80,
                height: 80
            }
        );
    }

    #[test]
    fn test_enclosing_rect_of_nothing_is_zero() {
        assert_eq!(BoundingRect::enclosing(&[]), BoundingRect::default());
    }
}
