use super::ImageModifier;
use crate::config::FilterConfig;
use crate::error::Result;
use crate::grid::PixelGrid;

#[derive(Debug)]
pub struct RotateModifier {
  pub half_turn: bool,
}

impl RotateModifier {
  pub fn evaluate(opt: &str, _cfg: &FilterConfig) -> Option<Box<dyn ImageModifier>> {
    if opt == "rotate" || opt == "rotate2" {
      return Some(Box::new(RotateModifier {
        half_turn: opt == "rotate2",
      }));
    }

    None
  }
}

impl ImageModifier for RotateModifier {
  fn name(&self) -> &'static str {
    if self.half_turn {
      "rotate2"
    } else {
      "rotate"
    }
  }

  fn apply(&self, grid: &mut PixelGrid) -> Result<()> {
    if self.half_turn {
      grid.rotate2()
    } else {
      grid.rotate()
    }
  }
}
