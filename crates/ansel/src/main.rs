use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use ansel::config::{
  ModelConfig, Settings, DEFAULT_API_BASE, DEFAULT_IMAGES_DIR, DEFAULT_MODEL, DEFAULT_PHOTOS_JSON,
  DEFAULT_TEMPERATURE,
};
use ansel::nova::NovaClient;
use ansel::{display, orchestrator};

/// Ansel - categorize gallery photos with Amazon Nova
#[derive(Parser)]
#[command(name = "ansel")]
#[command(about = "Scan an images directory and catalog every photo with a category, title and description")]
#[command(version)]
struct Cli {
  /// Preview the catalog without updating files
  #[arg(long)]
  dry_run: bool,

  /// Nova model to use
  #[arg(long, default_value = DEFAULT_MODEL)]
  model: String,

  /// Images directory
  #[arg(long, default_value = DEFAULT_IMAGES_DIR)]
  images_dir: PathBuf,

  /// Photos JSON file
  #[arg(long, default_value = DEFAULT_PHOTOS_JSON)]
  photos_json: PathBuf,

  /// Sampling temperature
  #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
  temperature: f32,

  /// Base URL of the Nova API
  #[arg(long, env = "NOVA_BASE_URL", default_value = DEFAULT_API_BASE)]
  api_base: String,

  /// Nova API key
  #[arg(long, env = "NOVA_API_KEY", hide_env_values = true)]
  api_key: Option<String>,

  /// Re-categorize photos that are already catalogued
  #[arg(long)]
  force: bool,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,
}

impl From<Cli> for Settings {
  fn from(cli: Cli) -> Self {
    Settings {
      images_dir: cli.images_dir,
      photos_json: cli.photos_json,
      dry_run: cli.dry_run,
      force: cli.force,
      model: ModelConfig {
        model: cli.model,
        temperature: cli.temperature,
        api_base: cli.api_base,
        api_key: cli.api_key,
      },
    }
  }
}

fn init_logging(verbose: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    if verbose {
      EnvFilter::new("ansel=debug,warn")
    } else {
      EnvFilter::new("ansel=warn")
    }
  });

  tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)).with(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let settings = Settings::from(cli);

  display::initializing(&settings.model.model);
  let client = NovaClient::new(settings.model.clone());

  orchestrator::run(&settings, &client).await?;
  Ok(())
}
