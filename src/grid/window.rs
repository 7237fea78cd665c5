use super::PixelGrid;
use crate::error::{Error, Result};

impl PixelGrid {
  /// Unpadded box blur.
  ///
  /// Every `kernel_size x kernel_size` window that fits inside the grid
  /// becomes one output value: the window sum floor-divided by
  /// `kernel_size²`. The grid shrinks to
  /// `(height - kernel_size + 1) x (width - kernel_size + 1)`.
  pub fn blur(&mut self, kernel_size: usize) -> Result<()> {
    if kernel_size == 0 {
      return Err(Error::Precondition("blur kernel must not be empty".to_owned()));
    }
    if kernel_size > self.width || kernel_size > self.height {
      return Err(Error::Precondition(format!(
        "blur kernel {} does not fit a {}x{} grid",
        kernel_size, self.width, self.height
      )));
    }

    let out_width = self.width - kernel_size + 1;
    let out_height = self.height - kernel_size + 1;
    let area = (kernel_size * kernel_size) as f64;

    // Horizontal window sums per source row, then summed down each column
    // window, in the same order a row-by-row window walk would add them.
    let mut row_sums = Vec::with_capacity(self.height * out_width);
    for row in self.rows() {
      for j in 0..out_width {
        row_sums.push(row[j..j + kernel_size].iter().sum::<f64>());
      }
    }

    let mut out = Vec::with_capacity(out_width * out_height);
    for i in 0..out_height {
      for j in 0..out_width {
        let sum: f64 = (i..i + kernel_size)
          .map(|y| row_sums[y * out_width + j])
          .sum();
        out.push((sum / area).floor());
      }
    }

    self.replace(out_width, out_height, out);
    Ok(())
  }

  /// Horizontal edge magnitude: each row becomes the absolute differences of
  /// its neighbouring values, one column shorter.
  pub fn contour(&mut self) -> Result<()> {
    if self.width < 2 {
      return Err(Error::Precondition(format!(
        "contour needs at least 2 columns, grid has {}",
        self.width
      )));
    }

    let out_width = self.width - 1;
    let mut out = Vec::with_capacity(out_width * self.height);
    for row in self.rows() {
      out.extend(row.windows(2).map(|pair| (pair[0] - pair[1]).abs()));
    }

    self.replace(out_width, self.height, out);
    Ok(())
  }
}
