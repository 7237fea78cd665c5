use std::path::{Path, PathBuf};

use rand::Rng;

use crate::codec;
use crate::error::Result;
use crate::grid::{Direction, PixelGrid};

/// One decoded image and the file it came from.
///
/// A handle owns its grid exclusively. It is opened per inbound photo,
/// mutated by one filter (or consumes a second handle in [`concat`]) and
/// then saved next to its source.
///
/// [`concat`]: ImageHandle::concat
#[derive(Debug, Clone)]
pub struct ImageHandle {
  path: PathBuf,
  grid: PixelGrid,
}

impl ImageHandle {
  pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
    let path = path.into();
    let grid = codec::decode(&path)?;
    Ok(Self { path, grid })
  }

  pub fn from_grid(path: impl Into<PathBuf>, grid: PixelGrid) -> Self {
    Self {
      path: path.into(),
      grid,
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn grid(&self) -> &PixelGrid {
    &self.grid
  }

  pub fn grid_mut(&mut self) -> &mut PixelGrid {
    &mut self.grid
  }

  pub fn into_grid(self) -> PixelGrid {
    self.grid
  }

  pub fn output_path(&self) -> PathBuf {
    codec::output_path(&self.path)
  }

  /// Encode the grid to [`output_path`](Self::output_path) and return it.
  pub fn save(&self) -> Result<PathBuf> {
    let out = self.output_path();
    codec::encode(&self.grid, &out)?;
    Ok(out)
  }

  pub fn blur(&mut self, kernel_size: usize) -> Result<()> {
    self.grid.blur(kernel_size)
  }

  pub fn contour(&mut self) -> Result<()> {
    self.grid.contour()
  }

  pub fn rotate(&mut self) -> Result<()> {
    self.grid.rotate()
  }

  pub fn rotate2(&mut self) -> Result<()> {
    self.grid.rotate2()
  }

  pub fn salt_n_pepper<R: Rng + ?Sized>(&mut self, rng: &mut R, ratio: f64) {
    self.grid.salt_n_pepper(rng, ratio)
  }

  pub fn segment(&mut self, threshold: f64) {
    self.grid.segment(threshold)
  }

  pub fn brighten(&mut self, amount: f64) {
    self.grid.brighten(amount)
  }

  pub fn darken(&mut self, amount: f64) {
    self.grid.darken(amount)
  }

  pub fn invert(&mut self) {
    self.grid.invert()
  }

  /// Join `other` onto this image; the result keeps this handle's path.
  pub fn concat(&mut self, other: ImageHandle, direction: Direction) -> Result<()> {
    self.grid.concat(other.grid, direction)
  }
}
