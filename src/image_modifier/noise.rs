use rand::rngs::StdRng;
use rand::SeedableRng;

use super::ImageModifier;
use crate::config::FilterConfig;
use crate::error::Result;
use crate::grid::PixelGrid;

#[derive(Debug)]
pub struct NoiseModifier {
  ratio: f64,
  seed: Option<u64>,
}

impl NoiseModifier {
  pub fn new(ratio: f64, seed: Option<u64>) -> NoiseModifier {
    NoiseModifier { ratio, seed }
  }

  pub fn evaluate(opt: &str, cfg: &FilterConfig) -> Option<Box<dyn ImageModifier>> {
    if opt == "salt and pepper" {
      Some(Box::new(NoiseModifier {
        ratio: cfg.noise_ratio,
        seed: cfg.noise_seed,
      }))
    } else {
      None
    }
  }
}

impl ImageModifier for NoiseModifier {
  fn name(&self) -> &'static str {
    "salt and pepper"
  }

  fn apply(&self, grid: &mut PixelGrid) -> Result<()> {
    let mut rng = match self.seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_entropy(),
    };
    grid.salt_n_pepper(&mut rng, self.ratio);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn seeded_noise_is_reproducible() {
    let modifier = NoiseModifier::new(0.2, Some(42));
    let mut a = PixelGrid::filled(16, 16, 128.0);
    let mut b = a.clone();

    modifier.apply(&mut a).unwrap();
    modifier.apply(&mut b).unwrap();

    assert_eq!(a, b);
    assert!(a.as_slice().iter().any(|&v| v != 128.0));
  }
}
