use super::ImageModifier;
use crate::config::FilterConfig;
use crate::error::Result;
use crate::grid::PixelGrid;

#[derive(Debug)]
pub struct InvertModifier;

impl InvertModifier {
  pub fn evaluate(opt: &str, _cfg: &FilterConfig) -> Option<Box<dyn ImageModifier>> {
    if opt == "invert" {
      Some(Box::new(InvertModifier))
    } else {
      None
    }
  }
}

impl ImageModifier for InvertModifier {
  fn name(&self) -> &'static str {
    "invert"
  }

  fn apply(&self, grid: &mut PixelGrid) -> Result<()> {
    grid.invert();
    Ok(())
  }
}
