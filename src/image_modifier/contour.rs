use super::ImageModifier;
use crate::config::FilterConfig;
use crate::error::Result;
use crate::grid::PixelGrid;

#[derive(Debug)]
pub struct ContourModifier;

impl ContourModifier {
  pub fn evaluate(opt: &str, _cfg: &FilterConfig) -> Option<Box<dyn ImageModifier>> {
    if opt == "contour" {
      Some(Box::new(ContourModifier))
    } else {
      None
    }
  }
}

impl ImageModifier for ContourModifier {
  fn name(&self) -> &'static str {
    "contour"
  }

  fn apply(&self, grid: &mut PixelGrid) -> Result<()> {
    grid.contour()
  }
}
