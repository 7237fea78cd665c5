use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use pixel_grid::config::{self, Config};
use pixel_grid::dispatch::caption::Caption;
use pixel_grid::dispatch::memory_store::MemoryStore;
use pixel_grid::dispatch::{Dispatcher, Inbound};
use pixel_grid::{Direction, ImageHandle};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "pixel-grid", version, about = "Grayscale pixel-grid filters")]
struct Cli {
  /// TOML file with filter defaults; built-in defaults are used when omitted.
  #[arg(long, global = true)]
  config: Option<PathBuf>,
  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Apply one filter to an image and print the output path.
  Apply { caption: String, image: PathBuf },
  /// Join two images and print the output path.
  Concat {
    first: PathBuf,
    second: PathBuf,
    #[arg(long, default_value = "horizontal")]
    direction: String,
  },
  /// Feed a JSON array of inbound messages through the dispatcher.
  Replay { messages: PathBuf },
}

#[tokio::main]
async fn main() {
  if let Err(err) = run().await {
    eprintln!("pixel-grid error: {err:#}");
    std::process::exit(1);
  }
}

async fn run() -> Result<()> {
  let cli = Cli::parse();

  let cfg = match &cli.config {
    Some(path) => config::parse(&path.to_string_lossy())?,
    None => Config::default(),
  };

  // Initialize tracing
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pixel_grid=info".into()),
    )
    .with(
      tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact(),
    )
    .init();

  match cli.command {
    Command::Apply { caption, image } => {
      let modifier = match Caption::parse(&caption, &cfg.filters)? {
        Caption::Filter(modifier) => modifier,
        Caption::Concat(_) => return Err(anyhow!("concat needs two images, use the concat command")),
        Caption::Detect => return Err(anyhow!("detect is handled by the object detection service")),
      };

      let mut img = ImageHandle::open(&image)?;
      modifier.apply(img.grid_mut())?;
      let out = img.save()?;
      info!("applied {} to {}", modifier.name(), image.display());
      println!("{}", out.display());
    }
    Command::Concat {
      first,
      second,
      direction,
    } => {
      let direction: Direction = direction.parse()?;
      let mut img = ImageHandle::open(&first)?;
      img.concat(ImageHandle::open(&second)?, direction)?;
      println!("{}", img.save()?.display());
    }
    Command::Replay { messages } => {
      let raw = tokio::fs::read_to_string(&messages)
        .await
        .with_context(|| format!("failed to read {}", messages.display()))?;
      let inbound: Vec<Inbound> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse messages in {}", messages.display()))?;

      let store = Arc::new(MemoryStore::new(cfg.app.media_group_ttl()));
      let dispatcher = Dispatcher::new(cfg.filters.clone(), store);
      for msg in inbound {
        let reply = dispatcher.handle(msg).await;
        println!("{}", serde_json::to_string(&reply)?);
      }
    }
  }

  Ok(())
}
