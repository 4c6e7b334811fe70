//! RGB565 software framebuffer
//!
//! A plain `u16` pixel buffer in the 5-6-5 color layout the target display
//! hardware speaks. Implements [`LineSink`] with Bresenham's algorithm so it
//! can stand in for the physical display in tests and demos, and converts to
//! an `image::RgbImage` for PNG export.

use crate::wire::LineSink;

/// Default display width
pub const WIDTH: usize = 320;

/// Default display height
pub const HEIGHT: usize = 240;

/// Pack 8-bit RGB into RGB565
#[inline]
pub const fn rgb565(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 & 0xf8) << 8) | ((g as u16 & 0xfc) << 3) | (b as u16 >> 3)
}

/// Unpack RGB565 to 8-bit RGB (low bits replicated from the high bits)
#[inline]
pub const fn rgb565_to_rgb8(c: u16) -> (u8, u8, u8) {
    let r = ((c >> 11) & 0x1f) as u8;
    let g = ((c >> 5) & 0x3f) as u8;
    let b = (c & 0x1f) as u8;
    ((r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2))
}

pub struct Framebuffer {
    pub width: usize,
    pub height: usize,
    pixels: Vec<u16>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    /// Fill the whole buffer with one color
    pub fn clear(&mut self, color: u16) {
        self.pixels.fill(color);
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: u16) {
        self.pixels[y * self.width + x] = color;
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u16 {
        self.pixels[y * self.width + x]
    }

    /// Count pixels that match `color` (test helper, cheap enough to keep)
    pub fn count_pixels(&self, color: u16) -> usize {
        self.pixels.iter().filter(|&&p| p == color).count()
    }

    /// Convert to an 8-bit RGB image for PNG export
    pub fn to_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let (r, g, b) = rgb565_to_rgb8(self.pixel(x as usize, y as usize));
            image::Rgb([r, g, b])
        })
    }
}

impl LineSink for Framebuffer {
    /// Draw a line from (x0, y0) to (x1, y1) using Bresenham's algorithm.
    /// Endpoints outside the buffer are clipped per pixel.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u16) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
                self.set_pixel(x as usize, y as usize, color);
            }

            if x == x1 && y == y1 {
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
    }
}
