//! spark-folio - a portfolio page in the terminal.
//!
//! Runs fullscreen until `q`, or prints one frame with `--snapshot`.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use spark_folio::config::Snapshot;
use spark_folio::{Content, Settings, render_snapshot};

#[derive(Parser, Debug)]
#[command(name = "spark-folio")]
#[command(about = "A personal portfolio page rendered in the terminal")]
#[command(version)]
struct Cli {
    /// Content file (defaults to the built-in portfolio)
    #[arg(long)]
    content: Option<PathBuf>,

    /// Settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Frame rate cap while animating
    #[arg(long)]
    fps: Option<u32>,

    /// Milliseconds between typewriter characters
    #[arg(long)]
    typing_interval: Option<u64>,

    /// Skip entrance animations
    #[arg(long)]
    reduced_motion: bool,

    /// Print one frame as text instead of running, e.g. 120x40@1500
    #[arg(long, value_name = "WxH[@MS]")]
    snapshot: Option<Snapshot>,

    /// Write logs to this file (the terminal belongs to the page)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Command-line flags win over the settings file.
    fn apply(&self, settings: &mut Settings) {
        if let Some(fps) = self.fps {
            settings.render.fps = fps;
        }
        if let Some(interval) = self.typing_interval {
            settings.motion.typing_interval_ms = interval;
        }
        if self.reduced_motion {
            settings.motion.reduced = true;
        }
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;

    let default = if cli.verbose {
        "spark_folio=debug"
    } else {
        "spark_folio=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let content = Content::load(cli.content.as_deref()).context("loading content")?;
    let mut settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    cli.apply(&mut settings);
    info!(?settings, "starting");

    if let Some(snapshot) = cli.snapshot {
        let text = render_snapshot(
            content,
            settings,
            snapshot.width,
            snapshot.height,
            snapshot.at_ms,
        )?;
        print!("{text}");
        return Ok(());
    }

    spark_folio::run(content, settings)?;
    Ok(())
}
