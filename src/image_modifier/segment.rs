use super::util;
use super::ImageModifier;
use crate::config::FilterConfig;
use crate::error::Result;
use crate::grid::PixelGrid;

#[derive(Debug)]
pub struct SegmentModifier {
  threshold: f64,
}

impl SegmentModifier {
  pub fn evaluate(opt: &str, cfg: &FilterConfig) -> Option<Box<dyn ImageModifier>> {
    let (name, arg) = util::split_argument(opt);
    if name != "segment" {
      return None;
    }

    let threshold = match arg {
      Some(arg) => arg.parse().ok()?,
      None => cfg.segment_threshold,
    };

    Some(Box::new(SegmentModifier { threshold }))
  }
}

impl ImageModifier for SegmentModifier {
  fn name(&self) -> &'static str {
    "segment"
  }

  fn apply(&self, grid: &mut PixelGrid) -> Result<()> {
    grid.segment(self.threshold);
    Ok(())
  }
}
