use super::util;
use super::ImageModifier;
use crate::config::FilterConfig;
use crate::error::Result;
use crate::grid::PixelGrid;

/// Shifts every value up (brighten) or down (darken), clamped to the display range.
#[derive(Debug)]
pub struct BrightnessModifier {
  amount: f64,
  darken: bool,
}

impl BrightnessModifier {
  pub fn evaluate(opt: &str, cfg: &FilterConfig) -> Option<Box<dyn ImageModifier>> {
    let (name, arg) = util::split_argument(opt);
    if name != "brighten" && name != "darken" {
      return None;
    }

    let amount = match arg {
      Some(arg) => arg.parse().ok()?,
      None => cfg.brightness_step,
    };

    Some(Box::new(BrightnessModifier {
      amount,
      darken: name == "darken",
    }))
  }
}

impl ImageModifier for BrightnessModifier {
  fn name(&self) -> &'static str {
    if self.darken {
      "darken"
    } else {
      "brighten"
    }
  }

  fn apply(&self, grid: &mut PixelGrid) -> Result<()> {
    if self.darken {
      grid.darken(self.amount);
    } else {
      grid.brighten(self.amount);
    }
    Ok(())
  }
}
