//! The pixel surface strokes are drawn on and its encoding as a PNG data URI.

use base64::Engine as _;

use crate::Error;

/// Stroke colour (#2C3E50).
const STROKE_RGB: [u8; 3] = [0x2C, 0x3E, 0x50];

/// Stroke width in pixels. Ends and joints are round.
pub const STROKE_WIDTH: f32 = 2.0;

/// A position on the drawing surface in pixels, relative to its top-left
/// corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An RGBA pixel buffer, transparent where nothing has been drawn.
#[derive(Clone)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    /// The alpha value of the pixel at (`x`, `y`).
    #[cfg(test)]
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.pixels[self.index(x, y) + 3]
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Draw a line from `from` to `to` with round caps.
    ///
    /// Pixel coverage is anti-aliased over one pixel at the stroke edge.
    /// Parts of the line outside the surface are clipped.
    pub fn draw_segment(&mut self, from: Point, to: Point) {
        let radius = STROKE_WIDTH / 2.0;
        let reach = radius + 1.0;

        let min_x = (from.x.min(to.x) - reach).floor().max(0.0);
        let min_y = (from.y.min(to.y) - reach).floor().max(0.0);
        let max_x = (from.x.max(to.x) + reach).ceil().min(self.width as f32);
        let max_y = (from.y.max(to.y) + reach).ceil().min(self.height as f32);

        if min_x >= max_x || min_y >= max_y {
            return;
        }

        for y in min_y as u32..max_y as u32 {
            for x in min_x as u32..max_x as u32 {
                let centre = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                let distance = distance_to_segment(centre, from, to);
                let coverage = (radius + 0.5 - distance).clamp(0.0, 1.0);

                if coverage <= 0.0 {
                    continue;
                }

                let alpha = (coverage * 255.0).round() as u8;
                let index = self.index(x, y);
                self.pixels[index..index + 3].copy_from_slice(&STROKE_RGB);
                self.pixels[index + 3] = self.pixels[index + 3].max(alpha);
            }
        }
    }

    /// Encode the surface as a PNG and wrap it in a data URI.
    ///
    /// # Errors
    ///
    /// Returns [Error::SignatureEncoding] if the PNG encoder fails.
    pub fn to_data_uri(&self) -> Result<String, Error> {
        let mut bytes = Vec::new();

        {
            let mut encoder = png::Encoder::new(&mut bytes, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            let mut writer = encoder
                .write_header()
                .map_err(|error| Error::SignatureEncoding(error.to_string()))?;
            writer
                .write_image_data(&self.pixels)
                .map_err(|error| Error::SignatureEncoding(error.to_string()))?;
            writer
                .finish()
                .map_err(|error| Error::SignatureEncoding(error.to_string()))?;
        }

        let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);

        Ok(format!("data:image/png;base64,{encoded}"))
    }
}

fn distance_to_segment(point: Point, from: Point, to: Point) -> f32 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let length_squared = dx * dx + dy * dy;

    let t = if length_squared == 0.0 {
        0.0
    } else {
        (((point.x - from.x) * dx + (point.y - from.y) * dy) / length_squared).clamp(0.0, 1.0)
    };

    let closest_x = from.x + t * dx;
    let closest_y = from.y + t * dy;

    ((point.x - closest_x).powi(2) + (point.y - closest_y).powi(2)).sqrt()
}
