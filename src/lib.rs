pub mod codec;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod grid;
pub mod image_modifier;
pub mod image_processing;

pub use error::{Error, Result};
pub use grid::{Direction, PixelGrid};
pub use image_processing::ImageHandle;
