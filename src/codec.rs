//! Conversion between image files and [`PixelGrid`]s.
//!
//! Colour sources are reduced to luminance with the ITU-R 601 weights on 8-bit
//! samples. Sources that are already single-channel are read as-is, so a grid
//! written by [`encode`] decodes back to the same whole-number values.

use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, ImageError, ImageReader};
use tracing::debug;

use crate::error::{Error, Result};
use crate::grid::{PixelGrid, MAX_INTENSITY};

/// Appended to the file stem of every derived image.
pub const FILTERED_SUFFIX: &str = "_filtered";

const RED_WEIGHT: f64 = 0.2989;
const GREEN_WEIGHT: f64 = 0.5870;
const BLUE_WEIGHT: f64 = 0.1140;

pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
  RED_WEIGHT * r as f64 + GREEN_WEIGHT * g as f64 + BLUE_WEIGHT * b as f64
}

pub fn decode(path: &Path) -> Result<PixelGrid> {
  let img = ImageReader::open(path)
    .map_err(|e| io_error(path, ImageError::IoError(e)))?
    .with_guessed_format()
    .map_err(|e| io_error(path, ImageError::IoError(e)))?
    .decode()
    .map_err(|e| decode_error(path, e))?;

  debug!(
    "decoded {} ({}x{}, {:?})",
    path.display(),
    img.width(),
    img.height(),
    img.color()
  );

  to_grid(&img)
}

fn to_grid(img: &DynamicImage) -> Result<PixelGrid> {
  let width = img.width() as usize;
  let height = img.height() as usize;

  let data = if img.color().has_color() {
    img
      .to_rgb8()
      .pixels()
      .map(|p| luminance(p.0[0], p.0[1], p.0[2]))
      .collect()
  } else {
    img.to_luma8().into_raw().into_iter().map(f64::from).collect()
  };

  PixelGrid::new(width, height, data)
}

/// Write `grid` as 8-bit grayscale; values are clamped into the display range
/// and rounded. The format follows the extension of `path`.
pub fn encode(grid: &PixelGrid, path: &Path) -> Result<()> {
  if grid.is_empty() {
    return Err(Error::Precondition(format!(
      "cannot encode an empty {}x{} grid",
      grid.width(),
      grid.height()
    )));
  }

  let raw: Vec<u8> = grid
    .as_slice()
    .iter()
    .map(|v| v.clamp(0.0, MAX_INTENSITY).round() as u8)
    .collect();

  let out = GrayImage::from_raw(grid.width() as u32, grid.height() as u32, raw).ok_or_else(|| {
    Error::Precondition(format!(
      "grid of {}x{} does not fit an image buffer",
      grid.width(),
      grid.height()
    ))
  })?;

  out.save(path).map_err(|e| io_error(path, e))?;
  debug!("encoded {}x{} grid to {}", grid.width(), grid.height(), path.display());

  Ok(())
}

/// `{stem}_filtered{ext}` next to the source file.
pub fn output_path(path: &Path) -> PathBuf {
  let stem = path
    .file_stem()
    .map(|s| s.to_string_lossy().into_owned())
    .unwrap_or_default();
  let name = match path.extension() {
    Some(ext) => format!("{}{}.{}", stem, FILTERED_SUFFIX, ext.to_string_lossy()),
    None => format!("{}{}", stem, FILTERED_SUFFIX),
  };

  path.with_file_name(name)
}

fn decode_error(path: &Path, err: ImageError) -> Error {
  match err {
    ImageError::Decoding(_) | ImageError::Unsupported(_) => {
      Error::UnsupportedMedia(format!("{}: {}", path.display(), err))
    }
    other => io_error(path, other),
  }
}

fn io_error(path: &Path, source: ImageError) -> Error {
  Error::Io {
    path: path.to_path_buf(),
    source,
  }
}
