use super::PixelGrid;
use crate::error::{Error, Result};

impl PixelGrid {
  /// Rotate 90° clockwise: transpose in place, then mirror every row.
  ///
  /// Only square grids can be transposed in place.
  pub fn rotate(&mut self) -> Result<()> {
    self.ensure_square()?;

    let n = self.width;
    for i in 0..n {
      for j in i + 1..n {
        self.data.swap(i * n + j, j * n + i);
      }
    }
    for y in 0..self.height {
      self.row_mut(y).reverse();
    }

    Ok(())
  }

  /// Rotate 180°.
  pub fn rotate2(&mut self) -> Result<()> {
    self.ensure_square()?;
    self.rotate()?;
    self.rotate()
  }

  fn ensure_square(&self) -> Result<()> {
    if !self.is_square() {
      return Err(Error::Precondition(format!(
        "rotation needs a square grid, got {}x{}",
        self.width, self.height
      )));
    }
    Ok(())
  }
}
