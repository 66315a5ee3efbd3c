//! Fantasy Premier League Expected Points Library
//!
//! An explainable expected-points (xPts) model for FPL players, with squad
//! ranking, transfer-target ranking and head-to-head transfer analysis built
//! on top of it.
//!
//! ## Features
//!
//! - **Factor Model**: Eight weighted factors (form, points per game, ICT,
//!   fixture difficulty, venue, team strength, availability, bonus rate),
//!   each normalized to 0-10 and labelled for explanation
//! - **Multi-Gameweek Projections**: Totals, averages and recurring reasons
//!   over a fixture horizon
//! - **Squad Tools**: Ranking, captain/vice-captain and a suggested starting XI
//! - **Transfer Analysis**: Points, form, price and fixture comparison with a
//!   risk level and recommendation
//! - **Offline Snapshots**: Reads raw FPL API bundles (plus optional Understat
//!   xG data) or a native snapshot format; no network access
//! - **Tunable Calibration**: Every weight and threshold can be overridden
//!   from a JSON config file
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fpl_xpts::{rank_squad, ModelConfig, Snapshot};
//! use std::path::Path;
//!
//! # fn example() -> fpl_xpts::Result<()> {
//! let snapshot = Snapshot::load(Path::new("snapshot.json"))?;
//! let config = ModelConfig::default();
//!
//! let ranking = rank_squad(snapshot.squad_players(), &snapshot, 3, &config);
//! if let Some(captain) = &ranking.captain {
//!     println!("Captain: {} ({:.1} xPts)", captain.player.name, captain.xpts);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Point the CLI at a snapshot and, optionally, a model config:
//! ```bash
//! export FPL_XPTS_SNAPSHOT=~/fpl/bundle.json
//! export FPL_XPTS_CONFIG=~/fpl/model.json
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod engine;
pub mod error;
pub mod fpl;

// Re-export commonly used types
pub use cli::types::{Gameweek, PlayerId, PlayerQuery, Position, TeamId};
pub use engine::{
    analyze_transfer, calculate_multi_gw_xpts, calculate_xpts, rank_squad, rank_transfer_targets,
    Fixture, ModelConfig, MultiGwResult, PlayerMetrics, TeamLookup, TeamStrength, XptsResult,
};
pub use error::{Result, XptsError};
pub use fpl::Snapshot;

pub const SNAPSHOT_ENV_VAR: &str = "FPL_XPTS_SNAPSHOT";
pub const CONFIG_ENV_VAR: &str = "FPL_XPTS_CONFIG";
