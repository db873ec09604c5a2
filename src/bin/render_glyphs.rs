use clap::Parser;
use fastglyph::{checksum, render, FontFace, FontInfo, Glyph};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Render every glyph of the given fonts into a directory of PNM images,
/// validating each render against the font's stored CRC-32 file when one
/// exists.
#[derive(Parser, Debug)]
#[command(name = "render_glyphs", version, about)]
struct Args {
  /// Font files to render; defaults to the five fixture faces under
  /// `fonts/`.
  #[arg(value_name = "FONT")]
  fonts: Vec<PathBuf>,

  /// Output directory for the images.
  #[arg(long, default_value = "output", value_name = "DIR")]
  out: PathBuf,

  /// Target pixel height, scaled by the face bounding box over the em size.
  #[arg(long, default_value_t = 64)]
  size: i32,

  /// Render and checksum only, without writing image files.
  #[arg(long)]
  skip_images: bool,

  /// Rewrite each font's .crc32 file with the freshly computed checksums.
  #[arg(long)]
  update_checksums: bool,
}

const FIXTURE_FACES: [&str; 5] = ["decorative", "special", "sans", "serif", "complex"];

fn main() {
  if let Err(err) = run() {
    eprintln!("error: {err}");
    std::process::exit(1);
  }
}

fn run() -> Result<(), String> {
  let args = Args::parse();

  if args.size <= 0 {
    return Err(format!("--size must be positive, got {}", args.size));
  }

  let fonts: Vec<PathBuf> = if args.fonts.is_empty() {
    FIXTURE_FACES
      .iter()
      .map(|name| PathBuf::from(format!("fonts/{name}.ttf")))
      .collect()
  } else {
    args.fonts.clone()
  };

  fs::create_dir_all(&args.out)
    .map_err(|e| format!("failed to create output dir {}: {e}", args.out.display()))?;

  for font_path in &fonts {
    render_face(&args, font_path)?;
  }
  Ok(())
}

fn render_face(args: &Args, font_path: &Path) -> Result<(), String> {
  let face =
    FontFace::from_file(font_path).map_err(|e| format!("{}: {e}", font_path.display()))?;
  let info = face.font_info().map_err(|e| e.to_string())?;
  let count = face.glyph_count().map_err(|e| e.to_string())?;
  let stem = font_path
    .file_stem()
    .and_then(|s| s.to_str())
    .unwrap_or("font")
    .to_string();
  let crc_path = font_path.with_extension("crc32");
  let known = checksum::read_checksums(&crc_path).map_err(|e| e.to_string())?;

  eprintln!("Rendering font '{stem}' [{count} glyphs].");
  let started = Instant::now();

  // Glyphs are independent; the face and its info are read-only.
  let results: Vec<(u16, Result<u32, String>)> = (0..count)
    .into_par_iter()
    .map(|idx| (idx, render_one(&face, &info, args, &stem, idx)))
    .collect();

  let mut computed = BTreeMap::new();
  for (idx, result) in &results {
    match result {
      Ok(sum) => {
        computed.insert(u32::from(*idx), *sum);
        match known.get(&u32::from(*idx)) {
          Some(expected) if expected == sum => eprintln!("Rendering glyph #{idx}... good."),
          Some(_) => eprintln!("Rendering glyph #{idx}... BAD!"),
          None => eprintln!("Rendering glyph #{idx}... done, but unvalidated!"),
        }
      }
      Err(err) => eprintln!("Rendering glyph #{idx}... FAILED: {err}"),
    }
  }
  eprintln!("Total time: {:?}", started.elapsed());

  if args.update_checksums {
    let mut merged = known;
    merged.extend(computed);
    checksum::write_checksums(&crc_path, &merged)
      .map_err(|e| format!("failed to write {}: {e}", crc_path.display()))?;
  }
  Ok(())
}

fn render_one(
  face: &FontFace,
  info: &FontInfo,
  args: &Args,
  stem: &str,
  idx: u16,
) -> Result<u32, String> {
  let (outline, metrics) = face.glyph(idx).map_err(|e| e.to_string())?;
  let glyph = Glyph::new(&outline, metrics).map_err(|e| e.to_string())?;
  let mut image = render(info, &glyph, 0, args.size).map_err(|e| e.to_string())?;
  let sum = checksum::crc32(image.data());
  if !args.skip_images {
    image.name = args
      .out
      .join(format!("{stem}_{idx}.pnm"))
      .to_string_lossy()
      .into_owned();
    image.write_pnm().map_err(|e| e.to_string())?;
  }
  Ok(sum)
}
