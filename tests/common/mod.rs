//! Shared synthetic-outline builders for the integration tests.
//!
//! All outer contours wind clockwise in y-up space (the TrueType
//! orientation); holes wind counterclockwise.
#![allow(dead_code)]

use fastglyph::{FontInfo, GlyphMetrics, GridPoint, OutlineData, PointTag};

pub fn font_info() -> FontInfo {
  FontInfo {
    bbox_min: GridPoint::new(0, 0),
    bbox_max: GridPoint::new(1000, 1000),
    em_size: 1000,
    ascender: 800,
    descender: -200,
    line_height: 1200,
    max_advance_width: 1000,
    max_advance_height: 1200,
    underline_position: -100,
    underline_thickness: 50,
  }
}

/// Metrics derived from the outline's own bounding box.
pub fn metrics_for(outline: &OutlineData) -> GlyphMetrics {
  let mut min = GridPoint::new(i32::MAX, i32::MAX);
  let mut max = GridPoint::new(i32::MIN, i32::MIN);
  for p in &outline.points {
    min = min.component_min(*p);
    max = max.component_max(*p);
  }
  GlyphMetrics {
    width: max.x - min.x,
    height: max.y - min.y,
    h_cursor_x: min.x,
    h_cursor_y: max.y,
    x_advance: max.x - min.x + 20,
    v_cursor_x: -(max.x - min.x) / 2,
    v_cursor_y: 20,
    y_advance: max.y - min.y + 40,
  }
}

fn on_points(points: &[(i32, i32)]) -> (Vec<GridPoint>, Vec<PointTag>) {
  (
    points.iter().map(|&(x, y)| GridPoint::new(x, y)).collect(),
    vec![PointTag::on_curve(); points.len()],
  )
}

/// An axis-aligned square, clockwise.
pub fn square(x0: i32, y0: i32, size: i32) -> OutlineData {
  let (points, tags) = on_points(&[
    (x0, y0),
    (x0, y0 + size),
    (x0 + size, y0 + size),
    (x0 + size, y0),
  ]);
  OutlineData {
    contour_ends: vec![4],
    points,
    tags,
  }
}

/// A diamond (rotated square), clockwise.
pub fn diamond(cx: i32, cy: i32, r: i32) -> OutlineData {
  let (points, tags) = on_points(&[(cx - r, cy), (cx, cy + r), (cx + r, cy), (cx, cy - r)]);
  OutlineData {
    contour_ends: vec![4],
    points,
    tags,
  }
}

/// A square ring: clockwise outer contour, counterclockwise inner hole.
pub fn square_ring(x0: i32, y0: i32, outer: i32, inset: i32) -> OutlineData {
  let i0 = x0 + inset;
  let j0 = y0 + inset;
  let inner = outer - 2 * inset;
  let (mut points, mut tags) = on_points(&[
    (x0, y0),
    (x0, y0 + outer),
    (x0 + outer, y0 + outer),
    (x0 + outer, y0),
  ]);
  let (inner_points, inner_tags) = on_points(&[
    (i0, j0),
    (i0 + inner, j0),
    (i0 + inner, j0 + inner),
    (i0, j0 + inner),
  ]);
  points.extend(inner_points);
  tags.extend(inner_tags);
  OutlineData {
    contour_ends: vec![4, 8],
    points,
    tags,
  }
}

/// Two overlapping clockwise squares: a self-intersecting outline whose
/// overlap region carries winding 2.
pub fn overlapping_squares() -> OutlineData {
  let mut a = square(0, 0, 400);
  let b = square(250, 100, 400);
  a.points.extend(b.points);
  a.tags.extend(b.tags);
  a.contour_ends = vec![4, 8];
  a
}

/// A rounded blob built from four quadratics (an "o" without its hole),
/// clockwise.
pub fn rounded_blob(cx: i32, cy: i32, r: i32) -> OutlineData {
  let on = PointTag::on_curve();
  let ctl = PointTag::control();
  let raw = [
    ((cx - r, cy), on),
    ((cx - r, cy + r), ctl),
    ((cx, cy + r), on),
    ((cx + r, cy + r), ctl),
    ((cx + r, cy), on),
    ((cx + r, cy - r), ctl),
    ((cx, cy - r), on),
    ((cx - r, cy - r), ctl),
  ];
  OutlineData {
    contour_ends: vec![8],
    points: raw.iter().map(|&((x, y), _)| GridPoint::new(x, y)).collect(),
    tags: raw.iter().map(|&(_, t)| t).collect(),
  }
}

/// A rounded ring: the blob with a counterclockwise rounded hole.
pub fn rounded_ring(cx: i32, cy: i32, outer: i32, inner: i32) -> OutlineData {
  let on = PointTag::on_curve();
  let ctl = PointTag::control();
  let mut outline = rounded_blob(cx, cy, outer);
  let raw = [
    ((cx + inner, cy), on),
    ((cx + inner, cy + inner), ctl),
    ((cx, cy + inner), on),
    ((cx - inner, cy + inner), ctl),
    ((cx - inner, cy), on),
    ((cx - inner, cy - inner), ctl),
    ((cx, cy - inner), on),
    ((cx + inner, cy - inner), ctl),
  ];
  outline
    .points
    .extend(raw.iter().map(|&((x, y), _)| GridPoint::new(x, y)));
  outline.tags.extend(raw.iter().map(|&(_, t)| t));
  outline.contour_ends = vec![8, 16];
  outline
}
