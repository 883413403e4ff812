use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use engine::app::{AppConfig, run_game};
use game::app::FallingBlocksApp;
use game::settings::{Settings, SettingsStore};

#[derive(Debug, Parser)]
#[command(name = "falling-blocks")]
#[command(about = "Minimal falling-block puzzle game")]
struct Cli {
    /// Settings file to read (and write with --write-default-settings).
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Piece sequence seed; overrides the settings file.
    #[arg(long)]
    seed: Option<u64>,
    /// Write default settings to the settings path and exit.
    #[arg(long, default_value_t = false)]
    write_default_settings: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let store = match cli.settings {
        Some(path) => SettingsStore::new(path),
        None => SettingsStore::from_env(),
    };

    if cli.write_default_settings {
        store
            .save(&Settings::default())
            .with_context(|| format!("failed to write {}", store.path().display()))?;
        log::info!("wrote default settings to {}", store.path().display());
        return Ok(());
    }

    let settings = store.load();
    let seed = cli.seed.or(settings.seed).unwrap_or_else(clock_seed);
    log::info!(
        "starting {}x{} field, seed {seed} (settings: {})",
        settings.field.width,
        settings.field.height,
        store.path().display()
    );

    let config = AppConfig {
        title: "Falling Blocks".to_string(),
        width: settings.video.window_width,
        height: settings.video.window_height,
        vsync: settings.video.vsync,
    };
    let app = FallingBlocksApp::new(&settings, seed);
    run_game(config, app)
        .map_err(|err| anyhow!("{err}"))
        .context("game loop failed")
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
