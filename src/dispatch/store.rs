use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A photo waiting for the other half of its media group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingImage {
  pub path: PathBuf,
  pub caption: Option<String>,
}

/// Where a pushed image landed in its media group.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupSlot {
  /// First image of the group; it is now buffered.
  First,
  /// Second image; the group is complete and no longer buffered.
  Paired {
    first: PendingImage,
    second: PendingImage,
  },
  /// The group already completed. Carries the caption the group started with.
  Overflow { caption: Option<String> },
}

/// Buffer for media groups keyed by the external grouping id.
///
/// Each `push` must be atomic for its key: two images of the same group can
/// never both observe [`GroupSlot::First`].
#[async_trait]
pub trait MediaGroupStore: Send + Sync {
  async fn push(&self, group_id: &str, image: PendingImage) -> Result<GroupSlot>;
}
