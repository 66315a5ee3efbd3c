//! Single-fixture and multi-gameweek expected points.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::config::ModelConfig;
use super::factors::{compute_factors, Factor};
use super::types::{round_to, Fixture, MultiGwResult, PlayerMetrics, TeamLookup, XptsResult};


/// Labels of the strongest factors, by impact, that clear the reason floor.
/// Never padded: fewer qualifying factors means fewer reasons.
fn top_reasons(factors: &[Factor], config: &ModelConfig) -> Vec<String> {
    let mut material: Vec<&Factor> = factors
        .iter()
        .filter(|f| f.impact > config.scoring.reason_floor)
        .collect();
    material.sort_by(|a, b| b.impact.partial_cmp(&a.impact).unwrap_or(Ordering::Equal));
    material
        .into_iter()
        .take(config.scoring.max_reasons)
        .map(|f| f.label.clone())
        .collect()
}

/// Expected points for one player in one fixture.
///
/// # Examples
///
/// ```rust
/// use fpl_xpts::{calculate_xpts, Fixture, ModelConfig, PlayerId, PlayerMetrics, Position, TeamId};
/// use fpl_xpts::engine::types::TeamStrength;
///
/// let player = PlayerMetrics {
///     id: PlayerId::new(1),
///     name: "Striker".into(),
///     position: Position::FWD,
///     team_id: TeamId::new(1),
///     form: 8.0,
///     points_per_game: 6.0,
///     ict_index: 150.0,
///     appearances: Some(10),
///     minutes: 900,
///     bonus: 12,
///     chance_of_playing: None,
///     price: 9.0,
///     selected_by_percent: 30.0,
///     net_transfers_event: 0,
///     xgi_per90: None,
///     upcoming_fixtures: vec![],
/// };
/// let teams: Vec<TeamStrength> = vec![];
/// let result = calculate_xpts(&player, &Fixture::new(8, "SHU (H)", 2), &teams, &ModelConfig::default());
/// assert!(result.xpts > 5.0);
/// assert_eq!(result.top_reasons[0], "In great form");
/// ```
pub fn calculate_xpts<L>(
    player: &PlayerMetrics,
    fixture: &Fixture,
    teams: &L,
    config: &ModelConfig,
) -> XptsResult
where
    L: TeamLookup + ?Sized,
{
    let factors = compute_factors(player, fixture, teams, config);
    let raw_total: f64 = factors.iter().map(|f| f.impact).sum();
    let xpts = round_to(raw_total * config.scoring.points_scale, 1);
    let top_reasons = top_reasons(&factors, config);

    XptsResult {
        xpts,
        factors,
        top_reasons,
    }
}

/// Rank reason labels by how many gameweeks they appear in.
///
/// Ties keep first-seen order, so a reason that shows up early in the window
/// wins over one that only starts appearing later.
fn recurring_reasons(per_gw: &[XptsResult], limit: usize) -> Vec<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for result in per_gw {
        for reason in &result.top_reasons {
            match index.get(reason.as_str()) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(reason.as_str(), counts.len());
                    counts.push((reason.as_str(), 1));
                }
            }
        }
    }

    // stable: equal counts stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(limit)
        .map(|(reason, _)| reason.to_string())
        .collect()
}

/// Expected points over the next `horizon` fixtures in `fixtures`.
///
/// With no fixtures at all, a neutral stand-in fixture is scored once and
/// multiplied by `horizon`, so "no data" never reads as zero points.
pub fn calculate_multi_gw_xpts<L>(
    player: &PlayerMetrics,
    fixtures: &[Fixture],
    teams: &L,
    horizon: usize,
    config: &ModelConfig,
) -> MultiGwResult
where
    L: TeamLookup + ?Sized,
{
    let window = &fixtures[..fixtures.len().min(horizon)];

    if window.is_empty() {
        tracing::debug!(
            player = %player.name,
            horizon,
            "no fixtures available, using neutral placeholder"
        );
        let placeholder = Fixture::placeholder(config.normalization.neutral_difficulty);
        let single = calculate_xpts(player, &placeholder, teams, config);
        return MultiGwResult {
            total_xpts: round_to(single.xpts * horizon as f64, 1),
            avg_xpts: single.xpts,
            top_reasons: single.top_reasons.clone(),
            per_gw: vec![single; horizon],
            placeholder: true,
        };
    }

    let per_gw: Vec<XptsResult> = window
        .iter()
        .map(|fixture| calculate_xpts(player, fixture, teams, config))
        .collect();
    let total_xpts = round_to(per_gw.iter().map(|r| r.xpts).sum(), 1);
    let avg_xpts = round_to(total_xpts / per_gw.len() as f64, 1);
    let top_reasons = recurring_reasons(&per_gw, config.scoring.max_reasons);

    MultiGwResult {
        total_xpts,
        per_gw,
        avg_xpts,
        top_reasons,
        placeholder: false,
    }
}
