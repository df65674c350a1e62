//! Drawing surfaces.
//!
//! The engine draws particles and the sampler rasterizes text through [`Surface`]. The CPU
//! implementation lives in [`cpu`]; anything that can fill circles, lay out a line of text,
//! and hand back pixels can stand in for it.

pub mod cpu;
pub mod text;

use crate::foundation::{
    core::{FrameRGBA, Point, Rgba8, Viewport},
    error::MorphResult,
};

pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn viewport(&self) -> Viewport {
        Viewport {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Resize and reset contents. Fill style and background survive.
    fn resize(&mut self, viewport: Viewport) -> MorphResult<()>;

    fn set_fill(&mut self, color: Rgba8);

    /// Clear the whole surface to its background.
    fn clear(&mut self);

    fn fill_circle(&mut self, center: Point, radius: f64);

    /// Advance width of `text` rendered at `font_px`.
    fn measure_text(&mut self, text: &str, font_px: f32) -> MorphResult<f64>;

    /// Draw `text` with its box centered on `center`.
    fn fill_text_centered(&mut self, text: &str, font_px: f32, center: Point) -> MorphResult<()>;

    /// Make pending draw calls visible to [`Surface::read_region`].
    fn flush(&mut self);

    fn read_region(&self, x: u32, y: u32, width: u32, height: u32) -> MorphResult<FrameRGBA>;

    fn read_all(&self) -> MorphResult<FrameRGBA> {
        self.read_region(0, 0, self.width(), self.height())
    }
}

/// Copy a sub-rectangle out of a row-major RGBA8 buffer of `src_width` pixels per row.
///
/// Shared by [`Surface::read_region`] implementations.
pub fn copy_region(
    src: &[u8],
    src_width: u32,
    src_height: u32,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> MorphResult<FrameRGBA> {
    if src.len() < src_width as usize * src_height as usize * 4 {
        return Err(crate::MorphError::surface(
            "pixel buffer is smaller than its declared size",
        ));
    }
    let fits = x.checked_add(width).is_some_and(|r| r <= src_width)
        && y.checked_add(height).is_some_and(|b| b <= src_height);
    if !fits {
        return Err(crate::MorphError::surface(format!(
            "region {width}x{height}+{x}+{y} outside {src_width}x{src_height} surface"
        )));
    }

    let row_bytes = width as usize * 4;
    let mut data = Vec::with_capacity(row_bytes * height as usize);
    for row in y..y + height {
        let start = (row as usize * src_width as usize + x as usize) * 4;
        data.extend_from_slice(&src[start..start + row_bytes]);
    }
    Ok(FrameRGBA {
        width,
        height,
        data,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/surface/region.rs"]
mod tests;
