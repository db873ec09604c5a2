//! Error types for fastglyph.
//!
//! All errors use the `thiserror` crate for minimal boilerplate and proper
//! error trait implementations. Outline errors are raised during glyph
//! construction, render errors during rasterisation; both are atomic, so a
//! failed `Glyph` or `Image` is never partially constructed.

use thiserror::Error;

/// Result type alias for fastglyph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for fastglyph.
///
/// Each variant wraps a more specific error type for that subsystem.
#[derive(Error, Debug)]
pub enum Error {
  /// Outline ingestion error
  #[error("Outline error: {0}")]
  Outline(#[from] OutlineError),

  /// Rendering or image allocation error
  #[error("Render error: {0}")]
  Render(#[from] RenderError),

  /// Font file loading error
  #[error("Font error: {0}")]
  Font(#[from] FontError),

  /// I/O error (image or checksum file writing)
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),
}

/// Errors raised while converting a raw outline into curves.
///
/// These correspond to inputs no glyph can be built from. Lesser anomalies
/// (degenerate curves, zero-length segments, contours of fewer than three
/// points) are filtered silently during ingestion instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OutlineError {
  /// The outline has no contours or no points.
  #[error("glyph outline has no contours or no points")]
  EmptyGlyph,

  /// A third-order (cubic) control point was encountered.
  #[error("third-order B\u{e9}zier curves are unsupported")]
  UnsupportedCurveOrder,

  /// Contour indices are inconsistent with the point array.
  #[error("malformed outline: {reason}")]
  MalformedOutline { reason: String },
}

/// Errors raised while rasterising a glyph into an image.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
  /// Both target dimensions were non-positive.
  #[error("bad render size: {width}x{height}")]
  BadRenderSize { width: i32, height: i32 },

  /// The glyph's metrics box is degenerate, so the missing pixel dimension
  /// cannot be derived from its aspect ratio.
  #[error("cannot derive pixel size from a {width}x{height} glyph box")]
  ZeroAspect { width: i32, height: i32 },

  /// The face metrics cannot scale a pixel size.
  #[error("face has unusable metrics (em size {em_size})")]
  BadFontMetrics { em_size: i32 },

  /// The image buffer would exceed the allocation limit.
  #[error("image {width}x{height} would allocate {bytes} bytes (limit {limit})")]
  ImageTooLarge {
    width: u32,
    height: u32,
    bytes: u64,
    limit: u64,
  },

  /// Image encoding failed.
  #[error("failed to encode image as {format}: {reason}")]
  Encode { format: String, reason: String },
}

/// Errors raised while loading a font file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FontError {
  /// The font file could not be parsed.
  #[error("failed to parse font file: {reason}")]
  ParseFailed { reason: String },

  /// A glyph index past the end of the face was requested.
  #[error("glyph index {index} out of range ({count} glyphs in face)")]
  BadGlyphIndex { index: u16, count: u16 },
}
