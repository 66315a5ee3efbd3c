//! Captaincy, transfer targets and transfer comparison.
//!
//! All three are thin layers over [`calculate_multi_gw_xpts`]; the only logic
//! of their own is ordering and the transfer decision rules.

use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

use super::config::{ModelConfig, TransferConfig};
use super::types::{round_to, Fixture, PlayerMetrics, PricePressure, TeamLookup};
use super::xpts::calculate_multi_gw_xpts;


/// A player together with their projection over the horizon.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerProjection<'a> {
    #[serde(flatten)]
    pub player: &'a PlayerMetrics,
    /// Average expected points per gameweek; the ranking key.
    pub xpts: f64,
    pub total_xpts: f64,
    pub top_reasons: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SquadRanking<'a> {
    pub ranked: Vec<PlayerProjection<'a>>,
    pub captain: Option<PlayerProjection<'a>>,
    pub vice_captain: Option<PlayerProjection<'a>>,
}

/// Project every player, in parallel, keeping input order.
fn project_all<'a, I, L>(
    players: I,
    teams: &L,
    horizon: usize,
    config: &ModelConfig,
) -> Vec<PlayerProjection<'a>>
where
    I: IntoIterator<Item = &'a PlayerMetrics>,
    L: TeamLookup + Sync + ?Sized,
{
    let players: Vec<&'a PlayerMetrics> = players.into_iter().collect();
    players
        .par_iter()
        .map(|&player| {
            let result =
                calculate_multi_gw_xpts(player, &player.upcoming_fixtures, teams, horizon, config);
            PlayerProjection {
                player,
                xpts: result.avg_xpts,
                total_xpts: result.total_xpts,
                top_reasons: result.top_reasons,
            }
        })
        .collect()
}

/// Stable descending sort on average xPts.
pub(crate) fn sort_by_xpts(projections: &mut [PlayerProjection<'_>]) {
    projections.sort_by(|a, b| b.xpts.partial_cmp(&a.xpts).unwrap_or(Ordering::Equal));
}

/// Rank a squad by average xPts; the top two are captain and vice-captain.
///
/// Players with equal projections keep their input order.
pub fn rank_squad<'a, I, L>(
    players: I,
    teams: &L,
    horizon: usize,
    config: &ModelConfig,
) -> SquadRanking<'a>
where
    I: IntoIterator<Item = &'a PlayerMetrics>,
    L: TeamLookup + Sync + ?Sized,
{
    let mut ranked = project_all(players, teams, horizon, config);
    sort_by_xpts(&mut ranked);

    SquadRanking {
        captain: ranked.first().cloned(),
        vice_captain: ranked.get(1).cloned(),
        ranked,
    }
}

/// Rank a candidate pool by average xPts over `horizon` gameweeks.
///
/// No filtering happens here; narrowing by position or price is up to the caller.
pub fn rank_transfer_targets<'a, I, L>(
    candidates: I,
    teams: &L,
    horizon: usize,
    config: &ModelConfig,
) -> Vec<PlayerProjection<'a>>
where
    I: IntoIterator<Item = &'a PlayerMetrics>,
    L: TeamLookup + Sync + ?Sized,
{
    let mut ranked = project_all(candidates, teams, horizon, config);
    sort_by_xpts(&mut ranked);
    ranked
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Recommendation {
    #[serde(rename = "Strong Buy")]
    StrongBuy,
    Neutral,
    Avoid,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Recommendation::StrongBuy => "Strong Buy",
            Recommendation::Neutral => "Neutral",
            Recommendation::Avoid => "Avoid",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of comparing an outgoing player with an incoming one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferAnalysis {
    pub out_projected: f64,
    pub in_projected: f64,
    /// In minus out, over the horizon.
    pub points_diff: f64,
    pub form_diff: f64,
    pub price_diff: f64,
    /// Outgoing minus incoming average difficulty; positive favours the incoming player.
    pub fixture_diff: f64,
    pub avg_in_difficulty: f64,
    pub avg_out_difficulty: f64,
    pub risk_level: RiskLevel,
    pub recommendation: Recommendation,
    /// True when price momentum lifted a Neutral verdict to Strong Buy.
    pub momentum_override: bool,
    pub in_pressure: PricePressure,
    pub out_pressure: PricePressure,
    pub explanation: String,
}

fn average_difficulty(fixtures: &[Fixture], horizon: usize, neutral: u8) -> f64 {
    let window = &fixtures[..fixtures.len().min(horizon)];
    if window.is_empty() {
        return neutral as f64;
    }
    let total: f64 = window.iter().map(|f| f.difficulty_or(neutral) as f64).sum();
    total / window.len() as f64
}

fn assess_risk(points_diff: f64, form_diff: f64, avg_in_difficulty: f64, t: &TransferConfig) -> RiskLevel {
    if points_diff.abs() <= t.low_risk_max_points && form_diff.abs() < t.low_risk_max_form {
        RiskLevel::Low
    } else if points_diff.abs() > t.high_risk_min_points
        || avg_in_difficulty > t.high_risk_min_difficulty
    {
        RiskLevel::High
    } else {
        RiskLevel::Medium
    }
}

/// Positive when the incoming player's underlying numbers (xGI per 90) beat
/// the outgoing player's. Unknown on either side means no signal.
fn underlying_quality_edge(player_out: &PlayerMetrics, player_in: &PlayerMetrics) -> Option<f64> {
    Some(player_in.xgi_per90? - player_out.xgi_per90?)
}

fn recommend(
    points_diff: f64,
    form_diff: f64,
    quality_edge: Option<f64>,
    t: &TransferConfig,
) -> Recommendation {
    let better_underlying = quality_edge.is_some_and(|edge| edge > 0.0);
    if points_diff > t.strong_buy_min_points && (form_diff >= 0.0 || better_underlying) {
        Recommendation::StrongBuy
    } else if points_diff < t.avoid_max_points || form_diff < t.avoid_max_form {
        Recommendation::Avoid
    } else {
        Recommendation::Neutral
    }
}

/// Separable rule: a Neutral verdict becomes Strong Buy when the incoming
/// player's price is heading up, the outgoing player's is heading down, and
/// the projection does not lose points.
fn momentum_applies(
    recommendation: Recommendation,
    points_diff: f64,
    in_pressure: PricePressure,
    out_pressure: PricePressure,
    t: &TransferConfig,
) -> bool {
    t.momentum.enabled
        && recommendation == Recommendation::Neutral
        && points_diff >= 0.0
        && in_pressure.is_rising()
        && out_pressure.is_falling()
}

/// Signed one-decimal number: `+1.5`, `-0.3`, `0.0`.
pub(crate) fn signed(value: f64) -> String {
    if value > 0.0 {
        format!("+{value:.1}")
    } else {
        format!("{value:.1}")
    }
}

struct ExplanationInput<'p> {
    player_out: &'p PlayerMetrics,
    player_in: &'p PlayerMetrics,
    horizon: usize,
    points_diff: f64,
    recommendation: Recommendation,
    momentum_override: bool,
    dominant_reasons: &'p [String],
}

fn explain(input: ExplanationInput<'_>) -> String {
    let ExplanationInput {
        player_out,
        player_in,
        horizon,
        points_diff,
        recommendation,
        momentum_override,
        dominant_reasons,
    } = input;

    let mut text = match recommendation {
        Recommendation::StrongBuy if momentum_override => format!(
            "{} is rising in the transfer market while {} is falling. The projections are close \
             ({} points over {} gameweeks), so moving early protects team value.",
            player_in.name,
            player_out.name,
            signed(points_diff),
            horizon
        ),
        Recommendation::StrongBuy => format!(
            "{} is projected to outscore {} by {:.1} points over the next {} gameweeks \
             (form {:.1} vs {:.1}). This looks like a smart move.",
            player_in.name, player_out.name, points_diff, horizon, player_in.form, player_out.form
        ),
        Recommendation::Neutral => format!(
            "This is a sideways move. {} and {} are projected similarly over the next {} gameweeks \
             ({} point difference). Consider saving the transfer for a better opportunity.",
            player_in.name,
            player_out.name,
            horizon,
            signed(points_diff)
        ),
        Recommendation::Avoid => format!(
            "{} is the better option here. Keeping the current player saves a transfer and is \
             projected to yield {:.1} more points over {} gameweeks.",
            player_out.name,
            points_diff.abs(),
            horizon
        ),
    };

    if !dominant_reasons.is_empty() {
        let dominant = if points_diff >= 0.0 { player_in } else { player_out };
        text.push_str(&format!(
            " Key factors for {}: {}.",
            dominant.name,
            dominant_reasons.join(", ")
        ));
    }
    text
}

/// Compare selling `player_out` for `player_in` over `horizon` gameweeks.
pub fn analyze_transfer<L>(
    player_out: &PlayerMetrics,
    player_in: &PlayerMetrics,
    horizon: usize,
    teams: &L,
    config: &ModelConfig,
) -> TransferAnalysis
where
    L: TeamLookup + ?Sized,
{
    let t = &config.transfer;
    let neutral = config.normalization.neutral_difficulty;

    let out_result =
        calculate_multi_gw_xpts(player_out, &player_out.upcoming_fixtures, teams, horizon, config);
    let in_result =
        calculate_multi_gw_xpts(player_in, &player_in.upcoming_fixtures, teams, horizon, config);

    let points_diff = round_to(in_result.total_xpts - out_result.total_xpts, 1);
    let form_diff = round_to(player_in.form - player_out.form, 1);
    let price_diff = round_to(player_in.price - player_out.price, 1);

    let avg_in_difficulty = average_difficulty(&player_in.upcoming_fixtures, horizon, neutral);
    let avg_out_difficulty = average_difficulty(&player_out.upcoming_fixtures, horizon, neutral);
    let fixture_diff = round_to(avg_out_difficulty - avg_in_difficulty, 1);

    let risk_level = assess_risk(points_diff, form_diff, avg_in_difficulty, t);
    let mut recommendation = recommend(
        points_diff,
        form_diff,
        underlying_quality_edge(player_out, player_in),
        t,
    );

    let in_pressure = player_in.price_pressure(&t.momentum);
    let out_pressure = player_out.price_pressure(&t.momentum);
    let momentum_override = momentum_applies(recommendation, points_diff, in_pressure, out_pressure, t);
    if momentum_override {
        tracing::debug!(
            player_in = %player_in.name,
            player_out = %player_out.name,
            %in_pressure,
            %out_pressure,
            "price momentum promoted Neutral to Strong Buy"
        );
        recommendation = Recommendation::StrongBuy;
    }

    let dominant_reasons = if points_diff >= 0.0 {
        &in_result.top_reasons
    } else {
        &out_result.top_reasons
    };
    let explanation = explain(ExplanationInput {
        player_out,
        player_in,
        horizon,
        points_diff,
        recommendation,
        momentum_override,
        dominant_reasons,
    });

    TransferAnalysis {
        out_projected: out_result.total_xpts,
        in_projected: in_result.total_xpts,
        points_diff,
        form_diff,
        price_diff,
        fixture_diff,
        avg_in_difficulty: round_to(avg_in_difficulty, 1),
        avg_out_difficulty: round_to(avg_out_difficulty, 1),
        risk_level,
        recommendation,
        momentum_override,
        in_pressure,
        out_pressure,
        explanation,
    }
}
