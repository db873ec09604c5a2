//! CRC-32 checksums of rendered images and their on-disk files.
//!
//! Checksums use the IEEE polynomial (`0xEDB88320` reflected), initial value
//! `0xFFFFFFFF` and final xor `0xFFFFFFFF`, computed over the raw RGBA bytes
//! before any encoding. A `<font>.crc32` file holds one
//! `<glyph_index> <checksum>` line per glyph, sorted by index.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

const fn build_table() -> [u32; 256] {
  let mut table = [0u32; 256];
  let mut i = 0;
  while i < 256 {
    let mut b = i as u32;
    let mut j = 0;
    while j < 8 {
      b = if b & 1 != 0 { 0xedb8_8320 ^ (b >> 1) } else { b >> 1 };
      j += 1;
    }
    table[i] = b;
    i += 1;
  }
  table
}

static CRC_TABLE: [u32; 256] = build_table();

/// CRC-32 (IEEE) of `data`.
pub fn crc32(data: &[u8]) -> u32 {
  let mut crc = 0xffff_ffffu32;
  for &byte in data {
    crc = CRC_TABLE[((crc ^ u32::from(byte)) & 0xff) as usize] ^ (crc >> 8);
  }
  crc ^ 0xffff_ffff
}

/// Reads a checksum file into an index-to-checksum map.
///
/// A missing file yields an empty map (the driver then reports every glyph
/// as unvalidated); lines that do not parse as two integers are skipped.
pub fn read_checksums(path: &Path) -> io::Result<BTreeMap<u32, u32>> {
  let mut checksums = BTreeMap::new();
  let contents = match fs::read_to_string(path) {
    Ok(contents) => contents,
    Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(checksums),
    Err(err) => return Err(err),
  };
  for line in contents.lines() {
    let mut fields = line.split_whitespace();
    let (Some(index), Some(sum)) = (fields.next(), fields.next()) else {
      continue;
    };
    let (Ok(index), Ok(sum)) = (index.parse::<u32>(), sum.parse::<u32>()) else {
      continue;
    };
    checksums.insert(index, sum);
  }
  Ok(checksums)
}

/// Writes a checksum map as one `<glyph_index> <checksum>` line per entry.
pub fn write_checksums(path: &Path, checksums: &BTreeMap<u32, u32>) -> io::Result<()> {
  let mut out = String::new();
  for (index, sum) in checksums {
    out.push_str(&format!("{index} {sum}\n"));
  }
  fs::write(path, out)
}
