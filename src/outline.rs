//! Outline ingestion: raw contour/point/tag arrays into packed curves.
//!
//! The upstream outline source hands over the TrueType view of a glyph:
//! contour end indices, integer point coordinates, and per-point tags
//! (on-curve vs. control, plus a third-order flag that is always rejected).
//! Ingestion walks the contours, synthesises the implicit on-curve midpoints
//! between consecutive control points, emits one quadratic per control point
//! and one degenerate quadratic per straight edge, translates everything
//! into the strictly positive packed coordinate frame, and drops curves that
//! cannot affect a horizontal ray cast.

use crate::curve::{PackedBezier, COORD_MAX, COORD_MIN};
use crate::error::OutlineError;
use crate::geometry::GridPoint;

/// Two flag bits describing one outline point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointTag(u8);

impl PointTag {
  const ON_CURVE: u8 = 0b01;
  const THIRD_ORDER: u8 = 0b10;

  /// A point lying on the outline.
  pub const fn on_curve() -> Self {
    Self(Self::ON_CURVE)
  }

  /// An off-curve quadratic control point.
  pub const fn control() -> Self {
    Self(0)
  }

  /// An off-curve cubic control point. Ingestion rejects outlines carrying
  /// these.
  pub const fn third_order() -> Self {
    Self(Self::THIRD_ORDER)
  }

  /// Reconstructs a tag from its raw two-bit representation.
  pub const fn from_bits(bits: u8) -> Self {
    Self(bits & (Self::ON_CURVE | Self::THIRD_ORDER))
  }

  pub const fn is_on_curve(self) -> bool {
    self.0 & Self::ON_CURVE != 0
  }

  pub const fn is_third_order(self) -> bool {
    self.0 & Self::THIRD_ORDER != 0
  }
}

/// A raw glyph outline as supplied by the font loader.
///
/// `contour_ends[i]` is the index one past the last point of contour `i`;
/// the entries are strictly increasing and the last equals `points.len()`.
#[derive(Debug, Clone, Default)]
pub struct OutlineData {
  pub contour_ends: Vec<u16>,
  pub points: Vec<GridPoint>,
  pub tags: Vec<PointTag>,
}

/// Glyph metrics in integer grid units, immutable after construction.
///
/// The cursor fields are coordinates (translated together with the outline);
/// the advances are distances and stay untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphMetrics {
  /// Bounding box width.
  pub width: i32,
  /// Bounding box height.
  pub height: i32,
  /// Horizontal layout: cursor to leftmost border of the bounding box.
  pub h_cursor_x: i32,
  /// Horizontal layout: baseline to topmost border of the bounding box.
  pub h_cursor_y: i32,
  /// Horizontal layout: cursor advance after drawing.
  pub x_advance: i32,
  /// Vertical layout: cursor to leftmost border of the bounding box.
  pub v_cursor_x: i32,
  /// Vertical layout: baseline to topmost border of the bounding box.
  pub v_cursor_y: i32,
  /// Vertical layout: cursor advance after drawing.
  pub y_advance: i32,
}

impl GlyphMetrics {
  /// Shifts the cursor coordinates by the ingestion offset.
  pub(crate) fn translate(&mut self, offset: GridPoint) {
    self.h_cursor_x += offset.x;
    self.h_cursor_y += offset.y;
    self.v_cursor_x += offset.x;
    self.v_cursor_y += offset.y;
  }
}

/// A fully-horizontal outline edge, dropped from the curve array (it cannot
/// affect a horizontal ray cast) but still needed by the coarse bitmap: the
/// fill flips between the rows just below and just above it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HorizontalEdge {
  pub y: i32,
  pub x_min: i32,
  pub x_max: i32,
}

/// Result of ingesting an outline: unsorted packed curves, the horizontal
/// edges the degeneracy filter removed, and the translation that was applied
/// to reach the positive coordinate frame.
#[derive(Debug)]
pub(crate) struct IngestedOutline {
  pub curves: Vec<PackedBezier>,
  pub horizontals: Vec<HorizontalEdge>,
  pub offset: GridPoint,
}

/// Converts a raw outline into packed curves.
///
/// See the module docs for the pipeline. Degenerate contours (fewer than
/// three points) and y-degenerate curves are filtered silently; structural
/// inconsistencies surface as errors.
pub(crate) fn extract_curves(outline: &OutlineData) -> Result<IngestedOutline, OutlineError> {
  validate(outline)?;

  let (points, on_curve, ends) = insert_implicit_points(outline);

  // Emit curves contour by contour, tracking the minimum coordinate over
  // every emitted control point for the translation step.
  let mut raw: Vec<[GridPoint; 3]> = Vec::new();
  let mut min = GridPoint::new(i32::MAX, i32::MAX);
  let mut begin = 0usize;
  for &end in &ends {
    let len = end - begin;
    if len >= 3 {
      emit_contour(&points[begin..end], &on_curve[begin..end], &mut raw, &mut min);
    }
    begin = end;
  }

  if raw.is_empty() {
    return Ok(IngestedOutline {
      curves: Vec::new(),
      horizontals: Vec::new(),
      offset: GridPoint::ZERO,
    });
  }

  let offset = GridPoint::new(COORD_MIN - min.x, COORD_MIN - min.y);
  let mut curves = Vec::with_capacity(raw.len());
  let mut horizontals = Vec::new();
  for [p0, p1, p2] in raw {
    let p0 = p0 + offset;
    let p1 = p1 + offset;
    let p2 = p2 + offset;
    // Curves with three equal y-coordinates cannot affect a horizontal ray
    // cast; x-degenerate curves are retained because vertical edges matter.
    if p0.y == p1.y && p1.y == p2.y {
      horizontals.push(HorizontalEdge {
        y: p0.y,
        x_min: p0.x.min(p1.x).min(p2.x),
        x_max: p0.x.max(p1.x).max(p2.x),
      });
      continue;
    }
    for p in [p0, p1, p2] {
      if p.x > COORD_MAX || p.y > COORD_MAX {
        return Err(OutlineError::MalformedOutline {
          reason: format!("coordinate {p} out of packed range after translation"),
        });
      }
    }
    curves.push(PackedBezier::new(p0, p1, p2));
  }

  Ok(IngestedOutline {
    curves,
    horizontals,
    offset,
  })
}

fn validate(outline: &OutlineData) -> Result<(), OutlineError> {
  if outline.contour_ends.is_empty() || outline.points.is_empty() {
    return Err(OutlineError::EmptyGlyph);
  }
  if outline.tags.len() != outline.points.len() {
    return Err(OutlineError::MalformedOutline {
      reason: format!(
        "{} tags for {} points",
        outline.tags.len(),
        outline.points.len()
      ),
    });
  }
  if outline.tags.iter().any(|tag| tag.is_third_order()) {
    return Err(OutlineError::UnsupportedCurveOrder);
  }
  let n_points = outline.points.len();
  let mut previous = 0usize;
  for (i, &end) in outline.contour_ends.iter().enumerate() {
    let end = usize::from(end);
    if end <= previous {
      return Err(OutlineError::MalformedOutline {
        reason: format!("contour ends not strictly increasing at contour {i}"),
      });
    }
    if end > n_points {
      return Err(OutlineError::MalformedOutline {
        reason: format!("contour end {end} exceeds point count {n_points}"),
      });
    }
    previous = end;
  }
  if previous != n_points {
    return Err(OutlineError::MalformedOutline {
      reason: format!("last contour ends at {previous}, expected {n_points}"),
    });
  }
  Ok(())
}

/// Synthesises the implicit on-curve midpoint between every pair of
/// consecutive control points, including the cyclic pair closing each
/// contour. Returns the expanded point/flag arrays and contour ends.
fn insert_implicit_points(outline: &OutlineData) -> (Vec<GridPoint>, Vec<bool>, Vec<usize>) {
  let mut points = Vec::with_capacity(outline.points.len() * 2);
  let mut on_curve = Vec::with_capacity(outline.points.len() * 2);
  let mut ends = Vec::with_capacity(outline.contour_ends.len());

  let mut begin = 0usize;
  for &end in &outline.contour_ends {
    let end = usize::from(end);
    for i in begin..end {
      let next = if i + 1 == end { begin } else { i + 1 };
      points.push(outline.points[i]);
      on_curve.push(outline.tags[i].is_on_curve());
      if !outline.tags[i].is_on_curve() && !outline.tags[next].is_on_curve() {
        points.push(outline.points[i].midpoint(outline.points[next]));
        on_curve.push(true);
      }
    }
    ends.push(points.len());
    begin = end;
  }

  (points, on_curve, ends)
}

/// Walks one expanded contour cyclically and emits its curves.
///
/// A control point emits the quadratic `(prev, control, next)`; an on-curve
/// point following another on-curve point emits the straight edge as the
/// degenerate quadratic `(prev, prev, current)`. The closing edge falls out
/// of starting the walk with `prev` set to the contour's last point.
fn emit_contour(
  points: &[GridPoint],
  on_curve: &[bool],
  raw: &mut Vec<[GridPoint; 3]>,
  min: &mut GridPoint,
) {
  let len = points.len();
  let mut prev = points[len - 1];
  let mut prev_on = on_curve[len - 1];
  for i in 0..len {
    let current = points[i];
    if !on_curve[i] {
      let next = points[(i + 1) % len];
      raw.push([prev, current, next]);
      *min = min.component_min(prev).component_min(current).component_min(next);
    } else if prev_on {
      raw.push([prev, prev, current]);
      *min = min.component_min(prev).component_min(current);
    }
    prev = current;
    prev_on = on_curve[i];
  }
}
