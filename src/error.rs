use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
  #[error("unsupported media {0}")]
  UnsupportedMedia(String),
  #[error("shape mismatch: {0}")]
  ShapeMismatch(String),
  #[error("precondition failed: {0}")]
  Precondition(String),
  #[error("i/o error on {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: image::ImageError,
  },
}
