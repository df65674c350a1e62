use crate::foundation::error::{MorphError, MorphResult};

pub use kurbo::{Point, Vec2};

/// Pixel dimensions of a drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Largest edge the CPU rasterizer can address.
    pub const MAX_EDGE: u32 = u16::MAX as u32;

    pub fn new(width: u32, height: u32) -> MorphResult<Self> {
        let vp = Self { width, height };
        vp.validate()?;
        Ok(vp)
    }

    pub fn validate(self) -> MorphResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MorphError::configuration(format!(
                "viewport must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > Self::MAX_EDGE || self.height > Self::MAX_EDGE {
            return Err(MorphError::configuration(format!(
                "viewport {}x{} exceeds {} px per edge",
                self.width,
                self.height,
                Self::MAX_EDGE
            )));
        }
        Ok(())
    }

    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const RED: Self = Self::new(255, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn premultiplied(self) -> [u8; 4] {
        let af = (self.a as u16) + 1;
        let premul = |c: u8| -> u8 { (((c as u16) * af) >> 8) as u8 };
        [premul(self.r), premul(self.g), premul(self.b), self.a]
    }
}

/// A rectangular block of premultiplied RGBA8 pixels, row-major.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameRGBA {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Whether the pixel carries any coverage.
    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        self.pixel(x, y).is_some_and(|px| px[3] != 0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
