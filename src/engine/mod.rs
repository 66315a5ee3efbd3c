//! The expected-points model.
//!
//! Pure functions over [`types::PlayerMetrics`] and a [`types::TeamLookup`];
//! nothing in here performs I/O apart from [`config::ModelConfig::from_path`].

pub mod config;
pub mod factors;
pub mod formation;
pub mod normalize;
pub mod ranking;
pub mod types;
pub mod xpts;

pub use config::ModelConfig;
pub use factors::{compute_factors, Factor, FactorKind};
pub use formation::{detect_formation, suggest_lineup, Lineup};
pub use ranking::{
    analyze_transfer, rank_squad, rank_transfer_targets, PlayerProjection, Recommendation,
    RiskLevel, SquadRanking, TransferAnalysis,
};
pub use types::{
    Fixture, MultiGwResult, PlayerMetrics, PricePressure, TeamLookup, TeamStrength, Venue,
    XptsResult,
};
pub use xpts::{calculate_multi_gw_xpts, calculate_xpts};
