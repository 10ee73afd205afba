use clap::{Parser, Subcommand};

use self::{play::PlayArg, print_config::PrintConfigArg};

mod play;
mod print_config;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Print the default game configuration as JSON
    PrintConfig(#[clap(flatten)] PrintConfigArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::PrintConfig(arg) => print_config::run(&arg)?,
    }
    Ok(())
}
