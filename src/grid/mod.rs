//! Owned single-channel pixel grids and the in-place operations on them.
//!
//! A [`PixelGrid`] is stored row-major in one contiguous buffer. Every row has
//! the same length at all times; operations that shrink the grid (blur,
//! contour) rebuild the buffer with the new dimensions in one step.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

mod concat;
mod point;
mod rotate;
mod window;

pub use self::point::DEFAULT_NOISE_RATIO;

/// Upper end of the nominal intensity range.
pub const MAX_INTENSITY: f64 = 255.0;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PixelGrid {
  width: usize,
  height: usize,
  data: Vec<f64>,
}

impl PixelGrid {
  /// Build a grid from a row-major buffer of `width * height` values.
  pub fn new(width: usize, height: usize, data: Vec<f64>) -> Result<Self> {
    if data.len() != width * height {
      return Err(Error::ShapeMismatch(format!(
        "buffer of {} values cannot form a {}x{} grid",
        data.len(),
        width,
        height
      )));
    }

    Ok(Self {
      width,
      height,
      data,
    })
  }

  pub fn filled(width: usize, height: usize, value: f64) -> Self {
    Self {
      width,
      height,
      data: vec![value; width * height],
    }
  }

  /// Build a grid from nested rows, rejecting ragged input.
  pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
    let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
    let mut data = Vec::with_capacity(width * rows.len());

    for (y, row) in rows.iter().enumerate() {
      let row = row.as_ref();
      if row.len() != width {
        return Err(Error::ShapeMismatch(format!(
          "row {} has {} values, expected {}",
          y,
          row.len(),
          width
        )));
      }
      data.extend_from_slice(row);
    }

    Self::new(width, rows.len(), data)
  }

  pub fn width(&self) -> usize {
    self.width
  }

  pub fn height(&self) -> usize {
    self.height
  }

  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  pub fn is_square(&self) -> bool {
    self.width == self.height
  }

  pub fn get(&self, x: usize, y: usize) -> Option<f64> {
    if x < self.width && y < self.height {
      Some(self.data[y * self.width + x])
    } else {
      None
    }
  }

  pub fn row(&self, y: usize) -> &[f64] {
    &self.data[y * self.width..(y + 1) * self.width]
  }

  pub fn row_mut(&mut self, y: usize) -> &mut [f64] {
    &mut self.data[y * self.width..(y + 1) * self.width]
  }

  pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
    (0..self.height).map(move |y| self.row(y))
  }

  pub fn to_rows(&self) -> Vec<Vec<f64>> {
    self.rows().map(<[f64]>::to_vec).collect()
  }

  pub fn as_slice(&self) -> &[f64] {
    &self.data
  }

  /// Replace the contents and shape in one step so rectangularity never lapses.
  fn replace(&mut self, width: usize, height: usize, data: Vec<f64>) {
    debug_assert_eq!(data.len(), width * height);
    self.width = width;
    self.height = height;
    self.data = data;
  }
}

/// How two grids are joined by [`PixelGrid::concat`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
  /// Side by side; heights must match.
  #[default]
  Horizontal,
  /// Stacked; widths must match.
  Vertical,
}

impl FromStr for Direction {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "horizontal" => Ok(Direction::Horizontal),
      "vertical" => Ok(Direction::Vertical),
      _ => Err(Error::ShapeMismatch(
        "direction must be either 'horizontal' or 'vertical'".to_owned(),
      )),
    }
  }
}

impl fmt::Display for Direction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Direction::Horizontal => f.write_str("horizontal"),
      Direction::Vertical => f.write_str("vertical"),
    }
  }
}
