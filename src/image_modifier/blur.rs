use super::util;
use super::ImageModifier;
use crate::config::FilterConfig;
use crate::error::Result;
use crate::grid::PixelGrid;

#[derive(Debug)]
pub struct BlurModifier {
  kernel_size: usize,
}

impl BlurModifier {
  pub fn evaluate(opt: &str, cfg: &FilterConfig) -> Option<Box<dyn ImageModifier>> {
    let (name, arg) = util::split_argument(opt);
    if name != "blur" {
      return None;
    }

    let kernel_size = match arg {
      Some(arg) => arg.parse().ok()?,
      None => cfg.blur_level,
    };

    Some(Box::new(BlurModifier { kernel_size }))
  }
}

impl ImageModifier for BlurModifier {
  fn name(&self) -> &'static str {
    "blur"
  }

  fn apply(&self, grid: &mut PixelGrid) -> Result<()> {
    grid.blur(self.kernel_size)
  }
}
