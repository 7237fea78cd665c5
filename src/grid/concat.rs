use super::{Direction, PixelGrid};
use crate::error::{Error, Result};

impl PixelGrid {
  /// Join `other` onto this grid, consuming it.
  ///
  /// Horizontal puts each row of `other` after the matching row of `self`;
  /// vertical appends the rows of `other` below.
  pub fn concat(&mut self, other: PixelGrid, direction: Direction) -> Result<()> {
    match direction {
      Direction::Horizontal => {
        if self.height != other.height {
          return Err(Error::ShapeMismatch(format!(
            "images must have the same height ({} != {})",
            self.height, other.height
          )));
        }

        let width = self.width + other.width;
        let mut data = Vec::with_capacity(width * self.height);
        for (left, right) in self.rows().zip(other.rows()) {
          data.extend_from_slice(left);
          data.extend_from_slice(right);
        }
        self.replace(width, self.height, data);
      }
      Direction::Vertical => {
        if self.width != other.width {
          return Err(Error::ShapeMismatch(format!(
            "images must have the same width ({} != {})",
            self.width, other.width
          )));
        }

        let height = self.height + other.height;
        let mut data = std::mem::take(&mut self.data);
        data.extend(other.data);
        self.replace(self.width, height, data);
      }
    }

    Ok(())
  }
}
