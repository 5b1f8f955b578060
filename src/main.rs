mod commands;
mod gif;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bingoscan")]
#[command(version, about = "Reads per-player state out of board-game screenshots")]
struct Cli {
    /// Verbose stage-by-stage logging (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a screenshot and report every player panel
    Analyze {
        /// Screenshot to analyze (any format the image crate decodes)
        input: PathBuf,

        /// Roster file produced by `bingoscan roster`
        #[arg(short, long, value_name = "FILE")]
        roster: Option<PathBuf>,

        /// Emit the full report as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Write an animated GIF of every pipeline stage
        #[arg(long, value_name = "FILE")]
        debug_gif: Option<PathBuf>,

        /// Override the tile intensity that counts toward a win
        #[arg(long, value_name = "VALUE")]
        win_color: Option<u8>,

        /// Override the disk radius of the screen-wide denoise pass
        #[arg(long, value_name = "RADIUS")]
        erode_radius: Option<u32>,
    },
    /// Build a roster from a directory of reference profile images
    Roster {
        /// Directory holding one reference image per player; the file stem
        /// becomes the player name
        dir: PathBuf,

        /// Where to write the roster
        #[arg(short, long, value_name = "FILE", default_value = "roster.json")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "bingoscan=debug,bingo_vision=debug,bingo_data=debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Command::Analyze {
            input,
            roster,
            json,
            debug_gif,
            win_color,
            erode_radius,
        } => commands::analyze::run(input, roster, json, debug_gif, win_color, erode_radius),
        Command::Roster { dir, out } => commands::roster::run(dir, out),
    }
}
