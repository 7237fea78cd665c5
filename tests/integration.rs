use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use image::{GrayImage, Luma, Rgb, RgbImage};
use pixel_grid::config::FilterConfig;
use pixel_grid::dispatch::memory_store::MemoryStore;
use pixel_grid::dispatch::{
  Dispatcher, Inbound, Reply, FALLBACK, GREETING, ONLY_TWO_IMAGES, SEND_CAPTION, SEND_PHOTO,
};
use pixel_grid::ImageHandle;
use tempfile::TempDir;

fn dispatcher() -> Dispatcher {
  Dispatcher::new(
    FilterConfig::default(),
    Arc::new(MemoryStore::new(Duration::from_secs(60))),
  )
}

fn gray(dir: &TempDir, name: &str, width: u32, height: u32, value: u8) -> PathBuf {
  let path = dir.path().join(name);
  GrayImage::from_pixel(width, height, Luma([value]))
    .save(&path)
    .expect("failed saving test image");
  path
}

fn photo(path: &Path, caption: Option<&str>, group: Option<&str>) -> Inbound {
  Inbound {
    chat_id: 7,
    photo: Some(path.to_path_buf()),
    caption: caption.map(str::to_owned),
    media_group_id: group.map(str::to_owned),
  }
}

fn text(reply: &Reply) -> &str {
  match reply {
    Reply::Text(text) => text,
    other => panic!("expected text reply, got {:?}", other),
  }
}

fn photo_path(reply: Reply) -> PathBuf {
  match reply {
    Reply::Photo(out) => out,
    other => panic!("expected photo, got {:?}", other),
  }
}

#[tokio::test]
async fn single_photo_is_filtered_and_saved() {
  let dir = tempfile::tempdir().unwrap();
  let src = gray(&dir, "cat.png", 4, 4, 100);

  let reply = dispatcher().handle(photo(&src, Some("Invert"), None)).await;

  let out = photo_path(reply);
  assert_eq!(out, dir.path().join("cat_filtered.png"));

  let result = ImageHandle::open(&out).unwrap();
  assert!(result.grid().as_slice().iter().all(|&v| v == 155.0));
}

#[tokio::test]
async fn blur_uses_configured_level() {
  let dir = tempfile::tempdir().unwrap();
  let src = gray(&dir, "wide.png", 20, 18, 9);

  let reply = dispatcher().handle(photo(&src, Some("blur"), None)).await;
  let out = photo_path(reply);

  let result = ImageHandle::open(&out).unwrap();
  assert_eq!((result.grid().width(), result.grid().height()), (5, 3));
  assert!(result.grid().as_slice().iter().all(|&v| v == 9.0));
}

#[tokio::test]
async fn colour_photo_is_segmented() {
  let dir = tempfile::tempdir().unwrap();
  let src = dir.path().join("sky.png");
  let mut img = RgbImage::from_pixel(2, 2, Rgb([10, 10, 10]));
  img.put_pixel(1, 1, Rgb([250, 250, 250]));
  img.save(&src).unwrap();

  let reply = dispatcher().handle(photo(&src, Some("segment"), None)).await;
  let out = photo_path(reply);

  let result = ImageHandle::open(&out).unwrap();
  assert_eq!(result.grid().to_rows(), vec![vec![0.0, 0.0], vec![0.0, 255.0]]);
}

#[tokio::test]
async fn concat_pair_is_joined_once_complete() {
  let dir = tempfile::tempdir().unwrap();
  let left = gray(&dir, "left.png", 2, 3, 10);
  let right = gray(&dir, "right.png", 4, 3, 200);
  let dispatcher = dispatcher();

  let first = dispatcher
    .handle(photo(&left, Some("concat"), Some("album")))
    .await;
  assert_eq!(first, Reply::Nothing);

  let second = dispatcher.handle(photo(&right, None, Some("album"))).await;
  let out = photo_path(second);
  assert_eq!(out, dir.path().join("left_filtered.png"));

  let result = ImageHandle::open(&out).unwrap();
  assert_eq!((result.grid().width(), result.grid().height()), (6, 3));
  assert_eq!(result.grid().row(0), &[10.0, 10.0, 200.0, 200.0, 200.0, 200.0]);

  let third = dispatcher.handle(photo(&right, None, Some("album"))).await;
  assert_eq!(text(&third), ONLY_TWO_IMAGES);
}

#[tokio::test]
async fn concat_caption_on_second_image_still_joins_pair() {
  let dir = tempfile::tempdir().unwrap();
  let top = gray(&dir, "top.png", 2, 1, 10);
  let bottom = gray(&dir, "bottom.png", 2, 2, 20);
  let dispatcher = dispatcher();

  assert_eq!(dispatcher.handle(photo(&top, None, Some("g"))).await, Reply::Nothing);

  let out = photo_path(
    dispatcher
      .handle(photo(&bottom, Some("concat vertical"), Some("g")))
      .await,
  );
  let result = ImageHandle::open(&out).unwrap();
  assert_eq!(
    result.grid().to_rows(),
    vec![vec![10.0, 10.0], vec![20.0, 20.0], vec![20.0, 20.0]]
  );
}

#[tokio::test]
async fn vertical_concat_with_mismatched_widths_falls_back() {
  let dir = tempfile::tempdir().unwrap();
  let top = gray(&dir, "top.png", 2, 2, 10);
  let bottom = gray(&dir, "bottom.png", 3, 2, 10);
  let dispatcher = dispatcher();

  dispatcher
    .handle(photo(&top, Some("concat vertical"), Some("g")))
    .await;
  let reply = dispatcher.handle(photo(&bottom, None, Some("g"))).await;

  assert_eq!(text(&reply), FALLBACK);
}

#[tokio::test]
async fn grouped_photos_with_single_image_filter_are_refused() {
  let dir = tempfile::tempdir().unwrap();
  let a = gray(&dir, "a.png", 2, 2, 10);
  let b = gray(&dir, "b.png", 2, 2, 10);
  let dispatcher = dispatcher();

  let first = dispatcher.handle(photo(&a, Some("blur"), Some("g"))).await;
  assert_eq!(
    text(&first),
    "The filter 'blur' does not support multiple images."
  );

  let second = dispatcher.handle(photo(&b, None, Some("g"))).await;
  assert_eq!(second, Reply::Nothing);

  let third = dispatcher.handle(photo(&b, None, Some("g"))).await;
  assert_eq!(third, Reply::Nothing);
}

#[tokio::test]
async fn conversation_errors_are_reported() {
  let dir = tempfile::tempdir().unwrap();
  let src = gray(&dir, "a.png", 2, 2, 10);
  let dispatcher = dispatcher();

  assert_eq!(text(&dispatcher.handle(photo(&src, None, None)).await), SEND_CAPTION);

  let no_photo = Inbound {
    chat_id: 7,
    photo: None,
    caption: Some("blur".to_owned()),
    media_group_id: None,
  };
  assert_eq!(text(&dispatcher.handle(no_photo).await), SEND_PHOTO);

  assert_eq!(
    text(&dispatcher.handle(photo(&src, Some("concat"), None)).await),
    ONLY_TWO_IMAGES
  );

  let unknown = dispatcher.handle(photo(&src, Some("Sharpen"), None)).await;
  assert!(text(&unknown).starts_with("Unknown filter 'sharpen'. Please use one of:"));
}

#[tokio::test]
async fn first_message_without_photo_is_greeted() {
  let dispatcher = dispatcher();
  let hello = || Inbound {
    chat_id: 3,
    photo: None,
    caption: None,
    media_group_id: None,
  };

  assert_eq!(text(&dispatcher.handle(hello()).await), GREETING);
  assert_eq!(text(&dispatcher.handle(hello()).await), SEND_PHOTO);

  let other_chat = Inbound {
    chat_id: 4,
    ..hello()
  };
  assert_eq!(text(&dispatcher.handle(other_chat).await), GREETING);
}

#[tokio::test]
async fn first_message_with_photo_is_processed_without_greeting() {
  let dir = tempfile::tempdir().unwrap();
  let src = gray(&dir, "a.png", 2, 2, 10);
  let dispatcher = dispatcher();

  let reply = dispatcher.handle(photo(&src, Some("invert"), None)).await;
  assert!(matches!(reply, Reply::Photo(_)));

  let no_photo = Inbound {
    chat_id: 7,
    photo: None,
    caption: None,
    media_group_id: None,
  };
  assert_eq!(text(&dispatcher.handle(no_photo).await), SEND_PHOTO);
}

#[tokio::test]
async fn engine_failures_become_fallback_replies() {
  let dir = tempfile::tempdir().unwrap();
  let wide = gray(&dir, "wide.png", 3, 2, 10);
  let missing = dir.path().join("missing.png");
  let dispatcher = dispatcher();

  let rotate = dispatcher.handle(photo(&wide, Some("rotate"), None)).await;
  assert_eq!(text(&rotate), FALLBACK);

  let gone = dispatcher.handle(photo(&missing, Some("invert"), None)).await;
  assert_eq!(text(&gone), FALLBACK);

  let ok = dispatcher.handle(photo(&wide, Some("contour"), None)).await;
  assert!(matches!(ok, Reply::Photo(_)));
}

#[tokio::test]
async fn detect_tickets_count_per_chat() {
  let dir = tempfile::tempdir().unwrap();
  let src = gray(&dir, "a.png", 2, 2, 10);
  let dispatcher = dispatcher();

  let mut numbers = Vec::new();
  for _ in 0..2 {
    match dispatcher.handle(photo(&src, Some("detect"), None)).await {
      Reply::Detect(ticket) => {
        assert_eq!(ticket.chat_id, 7);
        assert_eq!(ticket.path, src);
        numbers.push(ticket.image_number);
      }
      other => panic!("expected detect ticket, got {:?}", other),
    }
  }

  assert_eq!(numbers, vec![1, 2]);
}

#[test]
fn replay_messages_deserialize_with_optional_fields() {
  let raw = r#"[
    { "chat_id": 1, "photo": "photos/a.png", "caption": "Concat Vertical", "media_group_id": "42" },
    { "chat_id": 1, "photo": "photos/b.png", "media_group_id": "42" },
    { "chat_id": 2 }
  ]"#;

  let messages: Vec<Inbound> = serde_json::from_str(raw).unwrap();
  assert_eq!(messages.len(), 3);
  assert_eq!(messages[1].caption, None);
  assert_eq!(messages[2].photo, None);
}
