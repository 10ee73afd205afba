use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;

use blockfall_engine::{GameConfig, GameSession, PieceSeed};

use crate::{command::play::app::PlayApp, tui::Tui, util};

mod app;
mod screen;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Game config file (JSON); missing fields use the defaults
    #[clap(long)]
    pub(crate) config: Option<PathBuf>,
    /// Piece sequence seed (32 hex digits); random when omitted
    #[clap(long)]
    pub(crate) seed: Option<PieceSeed>,
    /// Ticks and frames per second
    #[clap(long, default_value_t = 60.0)]
    pub(crate) fps: f64,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            config: None,
            seed: None,
            fps: 60.0,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { config, seed, fps } = arg;

    let frame_interval = frame_interval(*fps)?;

    let config = match config {
        Some(path) => {
            let config = util::read_config_file(path)?;
            eprintln!("Loaded config from {}", path.display());
            config
        }
        None => GameConfig::default(),
    };

    let session = match seed {
        Some(seed) => {
            eprintln!("Using piece seed {seed}");
            GameSession::with_seed(config, *seed)
        }
        None => GameSession::new(config),
    };

    let mut app = PlayApp::new(session, frame_interval);
    Tui::new().run(&mut app)?;

    let summary = app.summary();
    eprintln!(
        "Final score {} (level {}, {} lines, {} pieces) in {:.1}s",
        summary.score(),
        summary.level(),
        summary.total_cleared_lines(),
        summary.completed_pieces(),
        app.play_time().as_secs_f64(),
    );

    Ok(())
}

/// Converts `--fps` into the time between ticks.
fn frame_interval(fps: f64) -> anyhow::Result<Duration> {
    anyhow::ensure!(
        fps.is_finite() && fps > 0.0,
        "--fps must be a positive number, got {fps}"
    );
    Duration::try_from_secs_f64(1.0 / fps)
        .with_context(|| format!("--fps {fps} gives an unusable frame interval"))
}
