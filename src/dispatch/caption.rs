use std::fmt;

use thiserror::Error;

use crate::config::FilterConfig;
use crate::grid::Direction;
use crate::image_modifier::{self, ImageModifier};

/// Filter names offered to the user when a caption is not recognised.
pub const FILTER_NAMES: &str = "Blur, Contour, Rotate, Rotate2, Segment, Salt and pepper, Concat, Concat Horizontal, Concat Vertical, Brighten, Darken, Invert, Detect";

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown filter '{0}'")]
pub struct UnknownFilter(pub String);

/// What a photo caption asks for.
pub enum Caption {
  Filter(Box<dyn ImageModifier>),
  Concat(Direction),
  /// Handled by the external object detector, never by the pixel engine.
  Detect,
}

impl Caption {
  pub fn parse(text: &str, cfg: &FilterConfig) -> Result<Caption, UnknownFilter> {
    let token = normalize(text);

    match token.as_str() {
      "concat" | "concat horizontal" => return Ok(Caption::Concat(Direction::Horizontal)),
      "concat vertical" => return Ok(Caption::Concat(Direction::Vertical)),
      "detect" => return Ok(Caption::Detect),
      _ => {}
    }

    image_modifier::parse_modifier(&token, cfg)
      .map(Caption::Filter)
      .ok_or(UnknownFilter(token))
  }
}

impl fmt::Debug for Caption {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Caption::Filter(modifier) => f.debug_tuple("Filter").field(modifier).finish(),
      Caption::Concat(direction) => f.debug_tuple("Concat").field(direction).finish(),
      Caption::Detect => f.write_str("Detect"),
    }
  }
}

/// Lowercase, trim and collapse inner whitespace.
pub fn normalize(text: &str) -> String {
  text
    .split_whitespace()
    .collect::<Vec<_>>()
    .join(" ")
    .to_lowercase()
}
