//! The glyph object: packed curves, row index, coarse bitmap, and the
//! point-in-glyph oracle.
//!
//! A [`Glyph`] is built once from a raw outline and is read-only afterwards;
//! concurrent queries need no synchronisation. Construction sorts the curves
//! by minimum y, builds the per-row start index for vertical culling, and
//! fills the coarse bitmap in two passes: first every cell the outline
//! passes through is marked mixed, then the remaining cells are resolved in
//! row runs from exact centre samples.

use crate::coarse::{CellState, CoarseBitmap, MAX_LOG_LENGTH};
use crate::curve::PackedBezier;
use crate::error::Result;
use crate::outline::{extract_curves, GlyphMetrics, HorizontalEdge, OutlineData};
use std::fmt::Write as _;

/// A glyph prepared for point-in-glyph queries.
#[derive(Debug, Clone)]
pub struct Glyph {
  curves: Vec<PackedBezier>,
  row_index: Vec<u32>,
  bitmap: CoarseBitmap,
  box_length: i32,
  metrics: GlyphMetrics,
}

impl Glyph {
  /// Builds a glyph from a raw outline and its metrics.
  ///
  /// The metrics cursors are translated together with the outline so that
  /// `h_cursor_x` keeps pointing at the left border of the bounding box in
  /// the packed coordinate frame.
  pub fn new(outline: &OutlineData, metrics: GlyphMetrics) -> Result<Self> {
    let ingested = extract_curves(outline)?;
    let mut metrics = metrics;
    metrics.translate(ingested.offset);

    let mut curves = ingested.curves;
    curves.sort_by_key(|curve| curve.min_y());

    let (log_length, box_length) = resolution_for(metrics.width, metrics.height);
    let row_index = build_row_index(&curves, log_length, box_length);
    let bitmap = build_bitmap(
      &curves,
      &ingested.horizontals,
      &row_index,
      log_length,
      box_length,
      metrics.h_cursor_x,
    );

    Ok(Self {
      curves,
      row_index,
      bitmap,
      box_length,
      metrics,
    })
  }

  /// Glyph metrics in the packed (post-translation) coordinate frame.
  pub fn metrics(&self) -> &GlyphMetrics {
    &self.metrics
  }

  /// The packed curves, sorted by minimum y.
  pub fn curves(&self) -> &[PackedBezier] {
    &self.curves
  }

  /// Per-row start indices into the curve array, one entry per coarse row
  /// plus a trailing sentinel.
  pub fn row_index(&self) -> &[u32] {
    &self.row_index
  }

  /// Side length of one coarse cell in grid units.
  pub fn box_length(&self) -> i32 {
    self.box_length
  }

  /// Side length of the coarse grid in cells.
  pub fn grid_length(&self) -> usize {
    self.bitmap.length()
  }

  /// Classification of the coarse cell at `(cx, cy)`.
  pub fn cell_state(&self, cx: usize, cy: usize) -> CellState {
    self.bitmap.get(cx, cy)
  }

  /// Whether the query point lies inside the filled region, under the
  /// non-zero fill rule.
  pub fn is_inside(&self, x: i32, y: i32) -> bool {
    self.coverage(x, y) != 0
  }

  /// Signed winding count at the query point, short-circuited through the
  /// coarse bitmap where a cell is decisively inside or outside.
  fn coverage(&self, x: i32, y: i32) -> i32 {
    let n = self.bitmap.length() as i32;
    let dx = x - self.metrics.h_cursor_x;
    if dx >= 0 && y >= 0 {
      let cx = dx / self.box_length;
      let cy = y / self.box_length;
      if cx < n && cy < n {
        match self.bitmap.get(cx as usize, cy as usize) {
          CellState::Outside => return 0,
          CellState::Inside => return 1,
          CellState::Mixed => {}
        }
      }
    }
    signed_crossings(&self.curves, &self.row_index, self.box_length, x, y)
  }

  /// Human-readable summary of the glyph, for diagnostics.
  pub fn describe(&self) -> String {
    let m = &self.metrics;
    let mut out = String::new();
    let _ = writeln!(out, "=== Glyph outline ===");
    let _ = writeln!(out, "BBox: {}x{}", m.width, m.height);
    let _ = writeln!(out, "Horizontal mode offset: ({}, {})", m.h_cursor_x, m.h_cursor_y);
    let _ = writeln!(out, "Horizontal mode advance: {}", m.x_advance);
    let _ = writeln!(out, "Vertical mode offset: ({}, {})", m.v_cursor_x, m.v_cursor_y);
    let _ = writeln!(out, "Vertical mode advance: {}", m.y_advance);
    let _ = writeln!(out, "Curves: {}", self.curves.len());
    let _ = writeln!(
      out,
      "Coarse grid: {0}x{0} cells of {1} units",
      self.bitmap.length(),
      self.box_length
    );
    out
  }
}

/// Sums the signed ray crossings over the curves that can reach `(x, y)`.
///
/// The scan starts at the row-index entry for the query's coarse row (every
/// earlier curve tops out below the row) and stops at the first curve whose
/// minimum y exceeds the ray height. Curves entirely left of the ray origin
/// are culled; the per-root hit test makes that purely an optimisation.
fn signed_crossings(
  curves: &[PackedBezier],
  row_index: &[u32],
  box_length: i32,
  x: i32,
  y: i32,
) -> i32 {
  let start = if y >= 0 {
    let cy = (y / box_length) as usize;
    row_index[cy.min(row_index.len() - 1)] as usize
  } else {
    0
  };
  let mut count = 0;
  for curve in &curves[start..] {
    if curve.min_y() > y {
      break;
    }
    if curve.max_y() < y {
      continue;
    }
    if curve.max_x() < x {
      continue;
    }
    count += curve.intersect(x, y);
  }
  count
}

/// Picks the grid exponent and cell side for a glyph box.
///
/// The exponent is the largest `L` in `[1, MAX_LOG_LENGTH]` keeping cells at
/// least three grid units on the shorter axis; the cell side then covers the
/// longer axis, rounded up.
fn resolution_for(width: i32, height: i32) -> (u32, i32) {
  let side = width.min(height).max(0);
  let mut log_length = 1;
  for l in (1..=MAX_LOG_LENGTH).rev() {
    if side >> l >= 3 {
      log_length = l;
      break;
    }
  }
  let cells = 1i32 << log_length;
  let span = width.max(height).max(0) + 1;
  let box_length = ((span + cells - 1) / cells).max(1);
  (log_length, box_length)
}

/// Builds `row_index[r]` = smallest curve index whose maximum y reaches row
/// `r`'s lower edge. Monotone because the curve array is sorted by minimum y
/// and thresholds only grow.
fn build_row_index(curves: &[PackedBezier], log_length: u32, box_length: i32) -> Vec<u32> {
  let rows = 1usize << log_length;
  let mut index = Vec::with_capacity(rows + 1);
  let mut i = 0usize;
  for r in 0..=rows {
    let floor = r as i32 * box_length;
    while i < curves.len() && curves[i].max_y() < floor {
      i += 1;
    }
    index.push(i as u32);
  }
  index
}

fn mark_mixed(bitmap: &mut CoarseBitmap, cx: i32, cy: i32) {
  let n = bitmap.length() as i32;
  if (0..n).contains(&cx) && (0..n).contains(&cy) {
    bitmap.set(cx as usize, cy as usize, CellState::Mixed);
  }
}

/// Ceiling division for positive divisors.
fn div_ceil(a: i32, b: i32) -> i32 {
  (a + b - 1).div_euclid(b)
}

/// Fills the coarse bitmap.
///
/// Pass 1 marks every cell the outline passes through as mixed: the cells
/// around each curve's start point (shifted one unit down-left for the
/// half-open convention), for every grid boundary line a curve's span
/// touches the cells on both sides of each root, and the one-unit strip
/// along every horizontal edge, where the fill flips between adjacent rows
/// without any stored curve crossing them. Pass 2 resolves the remaining
/// cells row by row, sampling one exact centre per run of cells
/// uninterrupted by mixed ones.
fn build_bitmap(
  curves: &[PackedBezier],
  horizontals: &[HorizontalEdge],
  row_index: &[u32],
  log_length: u32,
  box_length: i32,
  h_cursor_x: i32,
) -> CoarseBitmap {
  let n = 1usize << log_length;
  let mut bitmap = CoarseBitmap::with_resolution(log_length);

  for edge in horizontals {
    let r0 = (edge.y - 1).div_euclid(box_length);
    let r1 = (edge.y + 1).div_euclid(box_length);
    let c0 = (edge.x_min - 1 - h_cursor_x).div_euclid(box_length);
    let c1 = (edge.x_max + 1 - h_cursor_x).div_euclid(box_length);
    for cy in r0..=r1 {
      for cx in c0..=c1 {
        mark_mixed(&mut bitmap, cx, cy);
      }
    }
  }

  for curve in curves {
    let px = i32::from(curve.p0x);
    let py = i32::from(curve.p0y);
    for sy in [py - 1, py] {
      for sx in [px - 1, px] {
        mark_mixed(
          &mut bitmap,
          (sx - h_cursor_x).div_euclid(box_length),
          sy.div_euclid(box_length),
        );
      }
    }

    // Row sweep: horizontal boundaries at r * box_length within the curve's
    // y-span.
    let r_lo = div_ceil(curve.min_y(), box_length);
    let r_hi = curve.max_y() / box_length;
    for r in r_lo..=r_hi {
      let roots = curve.boundary_roots(r * box_length);
      for x in [roots.minus_x, roots.plus_x].into_iter().flatten() {
        let xi = x.floor() as i32;
        let c0 = (xi - 1 - h_cursor_x).div_euclid(box_length);
        let c1 = (xi + 1 - h_cursor_x).div_euclid(box_length);
        for cx in c0..=c1 {
          mark_mixed(&mut bitmap, cx, r - 1);
          mark_mixed(&mut bitmap, cx, r);
        }
      }
    }

    // Column sweep with the axes swapped. A vertical curve never crosses a
    // vertical boundary transversally, and one lying exactly on a boundary
    // line does not partition any cell.
    if curve.is_x_degenerate() {
      continue;
    }
    let swapped = curve.swapped();
    let c_lo = div_ceil(curve.min_x() - h_cursor_x, box_length);
    let c_hi = (curve.max_x() - h_cursor_x).div_euclid(box_length);
    for c in c_lo..=c_hi {
      let roots = swapped.boundary_roots(h_cursor_x + c * box_length);
      for y in [roots.minus_x, roots.plus_x].into_iter().flatten() {
        let yi = y.floor() as i32;
        let r0 = (yi - 1).div_euclid(box_length);
        let r1 = (yi + 1).div_euclid(box_length);
        for cy in r0..=r1 {
          mark_mixed(&mut bitmap, c - 1, cy);
          mark_mixed(&mut bitmap, c, cy);
        }
      }
    }
  }

  // Pass 2: flood-resolve the untouched cells. Between two cells of a row
  // with no mixed cell between them no curve intervenes, so one exact
  // sample answers the whole run. A centre whose winding count is outside
  // {0, 1} sits in overlapping or reversed winding; such cells stay on the
  // exact path.
  for cy in 0..n {
    let mut run: Option<CellState> = None;
    for cx in 0..n {
      if bitmap.get(cx, cy) == CellState::Mixed {
        run = None;
        continue;
      }
      let state = match run {
        Some(state) => state,
        None => {
          let sx = h_cursor_x + cx as i32 * box_length + box_length / 2;
          let sy = cy as i32 * box_length + box_length / 2;
          match signed_crossings(curves, row_index, box_length, sx, sy) {
            0 => CellState::Outside,
            1 => CellState::Inside,
            _ => {
              bitmap.set(cx, cy, CellState::Mixed);
              continue;
            }
          }
        }
      };
      run = Some(state);
      if state == CellState::Inside {
        bitmap.set(cx, cy, CellState::Inside);
      }
    }
  }

  bitmap
}
