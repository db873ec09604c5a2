//! Rasterisation of a glyph into an image.
//!
//! The renderer maps the pixel grid onto glyph-space sample points and asks
//! the oracle for each one. Pixel y grows downward while glyph y grows
//! upward, so rows are flipped. The loop has no shared mutable state beyond
//! the output buffer and may be parallelised across rows by the caller.

use crate::error::{RenderError, Result};
use crate::face::FontInfo;
use crate::glyph::Glyph;
use crate::image::{Color, Image};

const INSIDE: Color = Color::from_rgb_u32(0xFF_FF_FF);
const OUTSIDE: Color = Color::from_rgb_u32(0x00_00_00);

/// Renders `glyph` into a fresh image.
///
/// Exactly one of `width` and `height` must be positive; it is scaled by the
/// face-wide bounding box over the em size to obtain that pixel dimension,
/// and the other dimension follows from the glyph's aspect ratio. Pixels
/// whose sample point lies inside the filled region are white, all others
/// black; encoding and file I/O are the caller's responsibility.
pub fn render(font: &FontInfo, glyph: &Glyph, width: i32, height: i32) -> Result<Image> {
  if font.em_size <= 0 {
    return Err(RenderError::BadFontMetrics { em_size: font.em_size }.into());
  }
  let metrics = glyph.metrics();
  let max_font_width = font.bbox_max.x - font.bbox_min.x;
  let max_font_height = font.bbox_max.y - font.bbox_min.y;

  let (pixel_width, pixel_height) = if width <= 0 {
    if height <= 0 {
      return Err(RenderError::BadRenderSize { width, height }.into());
    }
    if metrics.height <= 0 || metrics.width <= 0 {
      return Err(
        RenderError::ZeroAspect {
          width: metrics.width,
          height: metrics.height,
        }
        .into(),
      );
    }
    let ph = (height * max_font_height / font.em_size).max(2);
    let pw = (ph * metrics.width / metrics.height).max(1);
    (pw, ph)
  } else {
    if metrics.height <= 0 || metrics.width <= 0 {
      return Err(
        RenderError::ZeroAspect {
          width: metrics.width,
          height: metrics.height,
        }
        .into(),
      );
    }
    let pw = (width * max_font_width / font.em_size).max(2);
    let ph = (pw * metrics.height / metrics.width).max(1);
    (pw, ph)
  };

  let mut image = Image::new(pixel_width as u32, pixel_height as u32)?;
  for py in 0..pixel_height {
    let sample_y = metrics.h_cursor_y - py * metrics.height / pixel_height;
    for px in 0..pixel_width {
      let sample_x = metrics.h_cursor_x + px * metrics.width / pixel_width;
      let color = if glyph.is_inside(sample_x, sample_y) {
        INSIDE
      } else {
        OUTSIDE
      };
      image.set_pixel(px as u32, py as u32, color);
    }
  }
  Ok(image)
}
