//! Routes inbound photos to the pixel engine.
//!
//! Single photos are filtered straight away. Photos that arrive as a media
//! group are buffered in a [`MediaGroupStore`] until the pair is complete,
//! which is the only way a concat runs.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::FilterConfig;
use crate::grid::Direction;
use crate::image_modifier::ImageModifier;
use crate::image_processing::ImageHandle;

pub mod caption;
pub mod memory_store;
pub mod store;

use self::caption::{Caption, UnknownFilter, FILTER_NAMES};
use self::store::{GroupSlot, MediaGroupStore, PendingImage};

pub const GREETING: &str = "Hiii! How can I help you?";
pub const SEND_PHOTO: &str = "Please send a photo with a caption to apply a filter";
pub const SEND_CAPTION: &str = "Please send a filter name as a caption";
pub const ONLY_TWO_IMAGES: &str = "Only two images are allowed for concat filter";
pub const FALLBACK: &str = "Something went wrong please try again";

/// One inbound message, already downloaded to a local path by the transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inbound {
  pub chat_id: i64,
  #[serde(default)]
  pub photo: Option<PathBuf>,
  #[serde(default)]
  pub caption: Option<String>,
  #[serde(default)]
  pub media_group_id: Option<String>,
}

/// Work order for the external object detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionTicket {
  pub prediction_id: Uuid,
  pub chat_id: i64,
  /// Running count of detect requests in this chat, starting at 1.
  pub image_number: u32,
  pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Reply {
  Text(String),
  Photo(PathBuf),
  Detect(DetectionTicket),
  Nothing,
}

pub struct Dispatcher {
  filters: FilterConfig,
  store: Arc<dyn MediaGroupStore>,
  // Both live as long as the dispatcher: one entry per chat, never evicted.
  // Detect numbering is per chat for the whole process lifetime.
  greeted: Mutex<HashSet<i64>>,
  detections: Mutex<HashMap<i64, u32>>,
}

impl Dispatcher {
  pub fn new(filters: FilterConfig, store: Arc<dyn MediaGroupStore>) -> Self {
    Self {
      filters,
      store,
      greeted: Mutex::new(HashSet::new()),
      detections: Mutex::new(HashMap::new()),
    }
  }

  /// Handle one message. Failures are logged and turned into [`FALLBACK`]
  /// so one bad photo never stops the caller's loop.
  pub async fn handle(&self, msg: Inbound) -> Reply {
    let chat_id = msg.chat_id;
    info!(
      chat_id,
      caption = ?msg.caption,
      media_group_id = ?msg.media_group_id,
      "incoming message"
    );

    match self.dispatch(msg).await {
      Ok(reply) => reply,
      Err(e) => {
        error!(chat_id, "error while handling message: {:#}", e);
        metrics::counter!("filter_failures_total").increment(1);
        Reply::Text(FALLBACK.to_owned())
      }
    }
  }

  pub async fn dispatch(&self, msg: Inbound) -> Result<Reply> {
    let first_contact = self.greeted.lock().await.insert(msg.chat_id);
    if first_contact && msg.photo.is_none() {
      return Ok(Reply::Text(GREETING.to_owned()));
    }

    let photo = match msg.photo {
      Some(photo) => photo,
      None => return Ok(Reply::Text(SEND_PHOTO.to_owned())),
    };

    let caption_text = msg
      .caption
      .as_deref()
      .map(caption::normalize)
      .filter(|c| !c.is_empty());

    let caption = match caption_text.as_deref() {
      Some(text) => match Caption::parse(text, &self.filters) {
        Ok(caption) => Some(caption),
        Err(UnknownFilter(name)) => {
          return Ok(Reply::Text(format!(
            "Unknown filter '{}'. Please use one of: {}.",
            name, FILTER_NAMES
          )))
        }
      },
      None => None,
    };

    match (msg.media_group_id, caption) {
      (_, Some(Caption::Detect)) => Ok(Reply::Detect(self.detection_ticket(msg.chat_id, photo).await)),
      (Some(group_id), caption) => {
        self
          .dispatch_group(&group_id, photo, caption_text, caption)
          .await
      }
      (None, None) => Ok(Reply::Text(SEND_CAPTION.to_owned())),
      (None, Some(Caption::Concat(_))) => Ok(Reply::Text(ONLY_TWO_IMAGES.to_owned())),
      (None, Some(Caption::Filter(modifier))) => {
        let out = apply_filter(photo, modifier).await?;
        Ok(Reply::Photo(out))
      }
    }
  }

  /// The first captioned image of a pair decides the group's filter, so an
  /// uncaptioned first image followed by a `concat` second one still joins.
  async fn dispatch_group(
    &self,
    group_id: &str,
    photo: PathBuf,
    caption_text: Option<String>,
    caption: Option<Caption>,
  ) -> Result<Reply> {
    let pending = PendingImage {
      path: photo,
      caption: caption_text.clone(),
    };

    match self.store.push(group_id, pending).await? {
      GroupSlot::First => match caption {
        Some(Caption::Filter(_)) => Ok(Reply::Text(format!(
          "The filter '{}' does not support multiple images.",
          caption_text.unwrap_or_default()
        ))),
        _ => {
          debug!(group_id, "buffered first image of media group");
          Ok(Reply::Nothing)
        }
      },
      GroupSlot::Paired { first, second } => {
        let text = first.caption.or(second.caption);
        match self.group_direction(text.as_deref()) {
          Some(direction) => {
            let out = concat_pair(first.path, second.path, direction).await?;
            Ok(Reply::Photo(out))
          }
          None => Ok(Reply::Nothing),
        }
      }
      GroupSlot::Overflow { caption } => {
        if self.group_direction(caption.as_deref()).is_some() {
          warn!(group_id, "more than two images sent for concat");
          Ok(Reply::Text(ONLY_TWO_IMAGES.to_owned()))
        } else {
          Ok(Reply::Nothing)
        }
      }
    }
  }

  fn group_direction(&self, caption: Option<&str>) -> Option<Direction> {
    match Caption::parse(caption?, &self.filters) {
      Ok(Caption::Concat(direction)) => Some(direction),
      _ => None,
    }
  }

  async fn detection_ticket(&self, chat_id: i64, path: PathBuf) -> DetectionTicket {
    let mut detections = self.detections.lock().await;
    let image_number = detections.entry(chat_id).or_insert(0);
    *image_number += 1;

    let ticket = DetectionTicket {
      prediction_id: Uuid::new_v4(),
      chat_id,
      image_number: *image_number,
      path,
    };
    info!(
      chat_id,
      prediction_id = %ticket.prediction_id,
      "image {} queued for detection",
      ticket.image_number
    );

    ticket
  }
}

async fn apply_filter(photo: PathBuf, modifier: Box<dyn ImageModifier>) -> Result<PathBuf> {
  let name = modifier.name();

  let out = run_blocking(move || {
    let mut img = ImageHandle::open(&photo)?;
    modifier.apply(img.grid_mut())?;
    Ok(img.save()?)
  })
  .await?;

  info!("applied {} -> {}", name, out.display());
  metrics::counter!("filters_applied_total", "filter" => name).increment(1);

  Ok(out)
}

async fn concat_pair(first: PathBuf, second: PathBuf, direction: Direction) -> Result<PathBuf> {
  let out = run_blocking(move || {
    let mut img = ImageHandle::open(&first)?;
    let other = ImageHandle::open(&second)?;
    img.concat(other, direction)?;
    Ok(img.save()?)
  })
  .await?;

  info!("concatenated pair ({}) -> {}", direction, out.display());
  metrics::counter!("filters_applied_total", "filter" => "concat").increment(1);

  Ok(out)
}

/// Run pixel work on the rayon pool so the async side never blocks on it.
async fn run_blocking<T, F>(work: F) -> Result<T>
where
  T: Send + 'static,
  F: FnOnce() -> Result<T> + Send + 'static,
{
  let (send, recv) = tokio::sync::oneshot::channel();
  rayon::spawn(move || {
    let _ = send.send(work());
  });

  recv
    .await
    .map_err(|e| anyhow!("image worker dropped its result: {}", e))?
}
