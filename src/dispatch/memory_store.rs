use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::mem;
use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::dispatch::store::{GroupSlot, MediaGroupStore, PendingImage};

enum State {
  Waiting(PendingImage),
  Completed { caption: Option<String> },
}

struct Group {
  created: Instant,
  state: State,
}

/// In-process [`MediaGroupStore`]. Groups, finished or not, are forgotten
/// once they are older than `ttl`.
pub struct MemoryStore {
  ttl: Duration,
  groups: Mutex<HashMap<String, Group>>,
}

impl MemoryStore {
  pub fn new(ttl: Duration) -> Self {
    Self {
      ttl,
      groups: Mutex::new(HashMap::new()),
    }
  }

  pub async fn len(&self) -> usize {
    self.groups.lock().await.len()
  }

  pub async fn is_empty(&self) -> bool {
    self.len().await == 0
  }
}

#[async_trait]
impl MediaGroupStore for MemoryStore {
  async fn push(&self, group_id: &str, image: PendingImage) -> Result<GroupSlot> {
    let mut groups = self.groups.lock().await;

    let ttl = self.ttl;
    let before = groups.len();
    groups.retain(|_, group| group.created.elapsed() < ttl);
    if groups.len() != before {
      debug!("evicted {} expired media groups", before - groups.len());
    }

    let group = match groups.entry(group_id.to_owned()) {
      Entry::Vacant(vacant) => {
        vacant.insert(Group {
          created: Instant::now(),
          state: State::Waiting(image),
        });
        return Ok(GroupSlot::First);
      }
      Entry::Occupied(occupied) => occupied.into_mut(),
    };

    let slot = match mem::replace(&mut group.state, State::Completed { caption: None }) {
      State::Waiting(first) => {
        group.state = State::Completed {
          caption: first.caption.clone(),
        };
        GroupSlot::Paired {
          first,
          second: image,
        }
      }
      State::Completed { caption } => {
        group.state = State::Completed {
          caption: caption.clone(),
        };
        GroupSlot::Overflow { caption }
      }
    };

    Ok(slot)
  }
}
