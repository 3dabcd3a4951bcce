use crate::geometry::Point;
use crate::layout::CANVAS_SIZE;
use crate::stroke::Stroke;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use thiserror::Error;

const SIDE: usize = CANVAS_SIZE as usize;

/// Colour of selected pixels in the rendered mask.
pub const SELECTED_RGB: [u8; 3] = [11, 198, 212];
pub const UNSELECTED_RGB: [u8; 3] = [255, 255, 255];

#[derive(Debug, Error)]
pub enum MaskError {
    #[error("Failed to encode mask: {0}")]
    Encode(#[from] image::ImageError),
}

/// Canvas-sized selection mask rasterized from a stroke.
#[derive(Clone, PartialEq, Eq)]
pub struct StrokeMask {
    bits: Vec<bool>,
}

impl std::fmt::Debug for StrokeMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrokeMask")
            .field("selected", &self.selected_count())
            .finish()
    }
}

impl StrokeMask {
    pub fn empty() -> Self {
        Self {
            bits: vec![false; SIDE * SIDE],
        }
    }

    /// Joins consecutive points with straight segments and stamps every
    /// covered pixel with a square pen of half-width `pen_radius`.
    pub fn rasterize(stroke: &Stroke, pen_radius: u32) -> Self {
        let mut mask = Self::empty();
        let radius = pen_radius.min(CANVAS_SIZE as u32) as i32;
        let points = stroke.points();

        if let [only] = points {
            mask.stamp(*only, radius);
        }
        for pair in points.windows(2) {
            for point in line(pair[0], pair[1]) {
                mask.stamp(point, radius);
            }
        }
        mask
    }

    fn stamp(&mut self, center: Point, radius: i32) {
        let max = CANVAS_SIZE - 1;
        let (x0, x1) = ((center.x - radius).max(0), (center.x + radius).min(max));
        let (y0, y1) = ((center.y - radius).max(0), (center.y + radius).min(max));
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.bits[y as usize * SIDE + x as usize] = true;
            }
        }
    }

    pub fn is_selected(&self, point: Point) -> bool {
        point.is_within_square(CANVAS_SIZE) && self.bits[point.y as usize * SIDE + point.x as usize]
    }

    pub fn selected_count(&self) -> usize {
        self.bits.iter().filter(|bit| **bit).count()
    }

    /// Row-major `'1'`/`'0'` string, one character per canvas pixel.
    pub fn bitstring(&self) -> String {
        self.bits.iter().map(|bit| if *bit { '1' } else { '0' }).collect()
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(CANVAS_SIZE as u32, CANVAS_SIZE as u32, |x, y| {
            if self.bits[y as usize * SIDE + x as usize] {
                Rgb(SELECTED_RGB)
            } else {
                Rgb(UNSELECTED_RGB)
            }
        })
    }

    pub fn to_png(&self) -> Result<Vec<u8>, MaskError> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(self.to_rgb_image())
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}

// Bresenham, inclusive of both ends
fn line(from: Point, to: Point) -> Vec<Point> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (from.x, from.y);
    let mut points = Vec::with_capacity((dx - dy) as usize + 1);

    loop {
        points.push(Point::new(x, y));
        if x == to.x && y == to.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    points
}
