//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use types::{PlayerQuery, Position};

/// Arguments shared by every command
#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Snapshot JSON: an FPL bundle or a native snapshot (or set `FPL_XPTS_SNAPSHOT`).
    #[clap(long, short, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Model config JSON (or set `FPL_XPTS_CONFIG`); defaults apply when absent.
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of upcoming gameweeks to project over.
    #[clap(long, short = 'H', global = true)]
    pub horizon: Option<usize>,

    /// Output results as JSON instead of text lines.
    #[clap(long, global = true)]
    pub json: bool,

    /// Log debug output to stderr.
    #[clap(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Expected points for one player, gameweek by gameweek.
    Xpts {
        /// Player ID or (part of) a name.
        player: PlayerQuery,
    },

    /// Rank a squad, pick captains and suggest a starting XI.
    ///
    /// Uses the picks stored in the snapshot unless players are given.
    Squad {
        /// Squad member (repeatable): `--player saka --player 351`.
        #[clap(long = "player")]
        players: Vec<PlayerQuery>,
    },

    /// Rank every player outside the squad as a transfer target.
    Targets {
        /// Filter by position (repeatable): `-p MID -p FWD`.
        #[clap(short = 'p', long = "position")]
        positions: Option<Vec<Position>>,

        /// Highest price to consider, in millions.
        #[clap(long)]
        max_price: Option<f64>,

        /// How many targets to show.
        #[clap(long, default_value_t = 25)]
        limit: usize,
    },

    /// Compare selling one player for another.
    Transfer {
        /// Player to sell.
        #[clap(long = "out")]
        player_out: PlayerQuery,

        /// Player to buy.
        #[clap(long = "in")]
        player_in: PlayerQuery,
    },
}

#[derive(Debug, Parser)]
#[clap(
    name = "fpl-xpts",
    about = "Fantasy Premier League expected points, rankings and transfer advice"
)]
pub struct XptsCli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[clap(subcommand)]
    pub command: Commands,
}
