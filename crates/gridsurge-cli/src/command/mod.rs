use std::{io, path::PathBuf};

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{filter::LevelFilter, prelude::*};

use self::{auto_play::AutoPlayArg, play::ManualPlayArg, show_config::ShowConfigArg};

mod auto_play;
mod play;
mod show_config;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Maximum level of log messages written to stderr
    #[clap(long, global = true, default_value_t = Level::WARN)]
    log_level: Level,
    /// Engine settings file (JSON format); built-in defaults when omitted
    #[clap(long, global = true)]
    config: Option<PathBuf>,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play interactively by typing placements on stdin
    #[command(name = "play")]
    ManualPlay(#[clap(flatten)] ManualPlayArg),
    /// Play seeded games with the built-in planner and report the results
    #[command(name = "auto-play")]
    AutoPlay(#[clap(flatten)] AutoPlayArg),
    /// Print the effective engine settings as JSON
    #[command(name = "config")]
    ShowConfig(#[clap(flatten)] ShowConfigArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logging(args.log_level);

    let config = crate::util::load_config(args.config.as_deref())?;
    match args
        .mode
        .unwrap_or(Mode::ManualPlay(ManualPlayArg::default()))
    {
        Mode::ManualPlay(arg) => play::run(config, &arg)?,
        Mode::AutoPlay(arg) => auto_play::run(config, &arg)?,
        Mode::ShowConfig(arg) => show_config::run(&config, &arg)?,
    }
    Ok(())
}

fn init_logging(level: Level) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(LevelFilter::from_level(level))
        .init();
}
