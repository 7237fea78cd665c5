use rand::Rng;

use super::{PixelGrid, MAX_INTENSITY};

/// Share of cells forced white (and, separately, black) by the default noise.
pub const DEFAULT_NOISE_RATIO: f64 = 0.2;

impl PixelGrid {
  /// Salt-and-pepper noise. One uniform draw per cell in row-major order:
  /// below `ratio` the cell turns white, above `1 - ratio` it turns black.
  pub fn salt_n_pepper<R: Rng + ?Sized>(&mut self, rng: &mut R, ratio: f64) {
    for value in self.data.iter_mut() {
      let draw: f64 = rng.gen();
      if draw < ratio {
        *value = MAX_INTENSITY;
      } else if draw > 1.0 - ratio {
        *value = 0.0;
      }
    }
  }

  /// Binary threshold: strictly above `threshold` becomes white, the rest black.
  pub fn segment(&mut self, threshold: f64) {
    for value in self.data.iter_mut() {
      *value = if *value > threshold { MAX_INTENSITY } else { 0.0 };
    }
  }

  pub fn brighten(&mut self, amount: f64) {
    for value in self.data.iter_mut() {
      *value = MAX_INTENSITY.min(*value + amount);
    }
  }

  pub fn darken(&mut self, amount: f64) {
    for value in self.data.iter_mut() {
      *value = 0.0f64.max(*value - amount);
    }
  }

  pub fn invert(&mut self) {
    for value in self.data.iter_mut() {
      *value = MAX_INTENSITY - *value;
    }
  }
}
