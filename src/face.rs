//! Font loading: reconstructing raw outlines and metrics with ttf-parser.
//!
//! The rasteriser core consumes the TrueType view of a glyph: contour end
//! indices, points and on/off-curve tags. ttf-parser exposes outlines as
//! drawing commands instead, so [`OutlineCollector`] implements
//! `ttf_parser::OutlineBuilder` and records the command stream back into
//! point arrays. Cubic commands are recorded with the third-order tag and
//! rejected downstream by ingestion.
//!
//! Faces lacking vertical metrics get them synthesised the way FreeType
//! does: the advance spans ascender to descender and the bearings centre
//! the bounding box.

use crate::error::{FontError, Result};
use crate::geometry::GridPoint;
use crate::outline::{GlyphMetrics, OutlineData, PointTag};
use std::path::Path;
use ttf_parser::GlyphId;

/// Face-wide metrics in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontInfo {
  /// Bottom-left of a box large enough to contain every glyph in the font.
  pub bbox_min: GridPoint,
  /// Top-right of that box.
  pub bbox_max: GridPoint,
  /// Size of the EM square.
  pub em_size: i32,
  /// Baseline to highest character coordinate. May not be reliable.
  pub ascender: i32,
  /// Baseline to lowest character coordinate, negative below the baseline.
  pub descender: i32,
  /// Default spacing between two lines.
  pub line_height: i32,
  pub max_advance_width: i32,
  pub max_advance_height: i32,
  /// Centre of the underline relative to the baseline, negative below.
  pub underline_position: i32,
  pub underline_thickness: i32,
}

/// A loaded font file, handing out raw outlines and metrics per glyph.
pub struct FontFace {
  data: Vec<u8>,
}

impl FontFace {
  /// Loads and validates a font file.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let data = std::fs::read(path)?;
    Self::from_bytes(data)
  }

  /// Validates font bytes and wraps them.
  pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
    let face = Self { data };
    face.face()?;
    Ok(face)
  }

  fn face(&self) -> Result<ttf_parser::Face<'_>> {
    ttf_parser::Face::parse(&self.data, 0).map_err(|e| {
      FontError::ParseFailed {
        reason: e.to_string(),
      }
      .into()
    })
  }

  /// Number of glyphs in the face.
  pub fn glyph_count(&self) -> Result<u16> {
    Ok(self.face()?.number_of_glyphs())
  }

  /// Face-wide metrics consumed by the renderer.
  pub fn font_info(&self) -> Result<FontInfo> {
    let face = self.face()?;
    let bbox = face.global_bounding_box();
    let ascender = i32::from(face.ascender());
    let descender = i32::from(face.descender());
    let line_height = i32::from(face.height());
    let underline = face.underline_metrics();
    Ok(FontInfo {
      bbox_min: GridPoint::new(i32::from(bbox.x_min), i32::from(bbox.y_min)),
      bbox_max: GridPoint::new(i32::from(bbox.x_max), i32::from(bbox.y_max)),
      em_size: i32::from(face.units_per_em()),
      ascender,
      descender,
      line_height,
      max_advance_width: i32::from(bbox.x_max) - i32::from(bbox.x_min),
      max_advance_height: line_height,
      underline_position: underline.map_or(0, |u| i32::from(u.position)),
      underline_thickness: underline.map_or(0, |u| i32::from(u.thickness)),
    })
  }

  /// Raw outline and metrics of one glyph, in unscaled grid units.
  ///
  /// Glyphs without an outline (spaces, empty slots) come back with zero
  /// contours; constructing a [`crate::Glyph`] from them surfaces
  /// `EMPTY_GLYPH`.
  pub fn glyph(&self, index: u16) -> Result<(OutlineData, GlyphMetrics)> {
    let face = self.face()?;
    let count = face.number_of_glyphs();
    if index >= count {
      return Err(FontError::BadGlyphIndex { index, count }.into());
    }
    let gid = GlyphId(index);

    let mut collector = OutlineCollector::default();
    let outline_bbox = face.outline_glyph(gid, &mut collector);
    let outline = collector.finish();

    let bbox = outline_bbox.or_else(|| face.glyph_bounding_box(gid));
    let (x_min, y_min, x_max, y_max) = match bbox {
      Some(r) => (
        i32::from(r.x_min),
        i32::from(r.y_min),
        i32::from(r.x_max),
        i32::from(r.y_max),
      ),
      None => (0, 0, 0, 0),
    };
    let width = x_max - x_min;
    let height = y_max - y_min;

    let x_advance = face.glyph_hor_advance(gid).map_or(0, i32::from);
    let y_advance = face
      .glyph_ver_advance(gid)
      .map_or(i32::from(face.ascender()) - i32::from(face.descender()), i32::from);

    let metrics = GlyphMetrics {
      width,
      height,
      h_cursor_x: x_min,
      h_cursor_y: y_max,
      x_advance,
      v_cursor_x: x_min - x_advance / 2,
      v_cursor_y: (y_advance - height) / 2,
      y_advance,
    };
    Ok((outline, metrics))
  }
}

/// Records ttf-parser outline commands back into raw point arrays.
#[derive(Debug, Default)]
pub struct OutlineCollector {
  contour_ends: Vec<u16>,
  points: Vec<GridPoint>,
  tags: Vec<PointTag>,
  contour_start: usize,
}

impl OutlineCollector {
  fn push(&mut self, x: f32, y: f32, tag: PointTag) {
    self.points.push(GridPoint::new(x.round() as i32, y.round() as i32));
    self.tags.push(tag);
  }

  fn end_contour(&mut self) {
    // Drop a duplicated closing point; the contour walk is cyclic and a
    // zero-length closing edge would only be filtered later anyway.
    if self.points.len() - self.contour_start >= 2 {
      let first = self.points[self.contour_start];
      let last = self.points[self.points.len() - 1];
      if first == last
        && self.tags[self.contour_start].is_on_curve()
        && self.tags[self.tags.len() - 1].is_on_curve()
      {
        self.points.pop();
        self.tags.pop();
      }
    }
    if self.points.len() > self.contour_start {
      debug_assert!(self.points.len() <= usize::from(u16::MAX));
      self.contour_ends.push(self.points.len() as u16);
      self.contour_start = self.points.len();
    }
  }

  /// Finishes the command stream and returns the collected outline.
  pub fn finish(mut self) -> OutlineData {
    self.end_contour();
    OutlineData {
      contour_ends: self.contour_ends,
      points: self.points,
      tags: self.tags,
    }
  }
}

impl ttf_parser::OutlineBuilder for OutlineCollector {
  fn move_to(&mut self, x: f32, y: f32) {
    self.end_contour();
    self.push(x, y, PointTag::on_curve());
  }

  fn line_to(&mut self, x: f32, y: f32) {
    self.push(x, y, PointTag::on_curve());
  }

  fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
    self.push(x1, y1, PointTag::control());
    self.push(x, y, PointTag::on_curve());
  }

  fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
    self.push(x1, y1, PointTag::third_order());
    self.push(x2, y2, PointTag::third_order());
    self.push(x, y, PointTag::on_curve());
  }

  fn close(&mut self) {
    self.end_contour();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use ttf_parser::OutlineBuilder;

  #[test]
  fn collector_records_contours_and_tags() {
    let mut collector = OutlineCollector::default();
    OutlineBuilder::move_to(&mut collector, 0.0, 0.0);
    OutlineBuilder::line_to(&mut collector, 0.0, 10.0);
    OutlineBuilder::quad_to(&mut collector, 5.0, 15.0, 10.0, 10.0);
    OutlineBuilder::line_to(&mut collector, 10.0, 0.0);
    OutlineBuilder::close(&mut collector);

    let outline = collector.finish();
    assert_eq!(outline.contour_ends, vec![5]);
    assert_eq!(outline.points.len(), 5);
    assert!(outline.tags[0].is_on_curve());
    assert!(!outline.tags[2].is_on_curve());
    assert_eq!(outline.points[2], GridPoint::new(5, 15));
  }

  #[test]
  fn collector_separates_contours() {
    let mut collector = OutlineCollector::default();
    OutlineBuilder::move_to(&mut collector, 0.0, 0.0);
    OutlineBuilder::line_to(&mut collector, 0.0, 10.0);
    OutlineBuilder::line_to(&mut collector, 10.0, 10.0);
    OutlineBuilder::close(&mut collector);
    OutlineBuilder::move_to(&mut collector, 20.0, 0.0);
    OutlineBuilder::line_to(&mut collector, 20.0, 5.0);
    OutlineBuilder::line_to(&mut collector, 25.0, 5.0);
    OutlineBuilder::close(&mut collector);

    let outline = collector.finish();
    assert_eq!(outline.contour_ends, vec![3, 6]);
  }

  #[test]
  fn duplicated_closing_point_is_dropped() {
    let mut collector = OutlineCollector::default();
    OutlineBuilder::move_to(&mut collector, 0.0, 0.0);
    OutlineBuilder::line_to(&mut collector, 0.0, 10.0);
    OutlineBuilder::line_to(&mut collector, 10.0, 10.0);
    OutlineBuilder::line_to(&mut collector, 0.0, 0.0);
    OutlineBuilder::close(&mut collector);

    let outline = collector.finish();
    assert_eq!(outline.contour_ends, vec![3]);
    assert_eq!(outline.points.len(), 3);
  }

  #[test]
  fn cubic_commands_are_tagged_third_order() {
    let mut collector = OutlineCollector::default();
    OutlineBuilder::move_to(&mut collector, 0.0, 0.0);
    OutlineBuilder::curve_to(&mut collector, 1.0, 1.0, 2.0, 1.0, 3.0, 0.0);
    OutlineBuilder::close(&mut collector);

    let outline = collector.finish();
    assert!(outline.tags.iter().any(|t| t.is_third_order()));
  }

  #[test]
  fn unterminated_contour_is_closed_by_finish() {
    let mut collector = OutlineCollector::default();
    OutlineBuilder::move_to(&mut collector, 0.0, 0.0);
    OutlineBuilder::line_to(&mut collector, 4.0, 4.0);
    OutlineBuilder::line_to(&mut collector, 8.0, 0.0);

    let outline = collector.finish();
    assert_eq!(outline.contour_ends, vec![3]);
  }

  #[test]
  fn garbage_bytes_are_rejected() {
    let result = FontFace::from_bytes(vec![0u8; 64]);
    assert!(result.is_err());
  }
}
