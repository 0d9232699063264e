use serde::{Deserialize, Serialize};

/// Face bounding box in pixel coordinates, `(x1, y1)` top-left and `(x2, y2)`
/// bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Width of the pixel box returned by [`to_pixels`](Self::to_pixels).
    pub fn width(&self) -> i64 {
        let [x1, _, x2, _] = self.to_pixels();
        (x2 as i64 - x1 as i64).max(0)
    }

    pub fn height(&self) -> i64 {
        let [_, y1, _, y2] = self.to_pixels();
        (y2 as i64 - y1 as i64).max(0)
    }

    /// Area in whole pixels, measured on the truncated box so it agrees with
    /// the coordinates reported back to callers.
    pub fn area(&self) -> f64 {
        (self.width() * self.height()) as f64
    }

    /// Fraction of a `width` × `height` image covered by this box.
    pub fn area_ratio(&self, width: u32, height: u32) -> f64 {
        let image_area = width as f64 * height as f64;
        if image_area == 0.0 {
            return 0.0;
        }
        self.area() / image_area
    }

    /// Integer pixel coordinates, truncated toward zero.
    pub fn to_pixels(&self) -> [i32; 4] {
        [self.x1 as i32, self.y1 as i32, self.x2 as i32, self.y2 as i32]
    }
}
