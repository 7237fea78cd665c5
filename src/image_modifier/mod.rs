//! Single-image filters, selected by the caption token that names them.

use std::fmt;

use crate::config::FilterConfig;
use crate::error::Result;
use crate::grid::PixelGrid;

mod util;

pub mod blur;
pub mod brightness;
pub mod contour;
pub mod invert;
pub mod noise;
pub mod rotate;
pub mod segment;

pub trait ImageModifier: fmt::Debug + Send + Sync {
  /// Caption token this modifier answers to.
  fn name(&self) -> &'static str;

  fn apply(&self, grid: &mut PixelGrid) -> Result<()>;
}

pub type ImageModifierEvaluator = fn(&str, &FilterConfig) -> Option<Box<dyn ImageModifier>>;

/// Find the modifier for `token`, trying every known filter in turn.
pub fn parse_modifier(token: &str, cfg: &FilterConfig) -> Option<Box<dyn ImageModifier>> {
  let eval_options: Vec<ImageModifierEvaluator> = vec![
    blur::BlurModifier::evaluate,
    contour::ContourModifier::evaluate,
    rotate::RotateModifier::evaluate,
    noise::NoiseModifier::evaluate,
    segment::SegmentModifier::evaluate,
    brightness::BrightnessModifier::evaluate,
    invert::InvertModifier::evaluate,
  ];

  eval_options.iter().find_map(|eval| eval(token, cfg))
}
