//! Transfer targets: every player outside the squad, filtered and ranked.

use serde::Serialize;

use super::common::{format_fixtures, print_json, CommandContext};
use crate::{
    cli::types::Position,
    engine::{rank_transfer_targets, PlayerMetrics, PlayerProjection},
    fpl::Snapshot,
    Result,
};

/// Parameters for the targets command
#[derive(Debug, Clone, Default)]
pub struct TargetFilters {
    pub positions: Option<Vec<Position>>,
    /// In millions.
    pub max_price: Option<f64>,
    pub limit: Option<usize>,
}

impl TargetFilters {
    fn accepts(&self, player: &PlayerMetrics) -> bool {
        let position_ok = match &self.positions {
            Some(positions) if !positions.is_empty() => positions.contains(&player.position),
            _ => true,
        };
        let price_ok = self.max_price.map_or(true, |cap| player.price <= cap);
        position_ok && price_ok
    }
}

/// Candidates for a transfer: not already in the squad, and passing the filters.
pub fn select_candidates<'a>(snapshot: &'a Snapshot, filters: &TargetFilters) -> Vec<&'a PlayerMetrics> {
    snapshot
        .players
        .iter()
        .filter(|p| !snapshot.in_squad(p.id))
        .filter(|p| filters.accepts(p))
        .collect()
}

#[derive(Debug, Serialize)]
pub struct TargetsReport<'a> {
    pub horizon: usize,
    pub considered: usize,
    pub targets: Vec<PlayerProjection<'a>>,
}

pub fn build_targets_report<'a>(ctx: &'a CommandContext, filters: &TargetFilters) -> TargetsReport<'a> {
    let candidates = select_candidates(&ctx.snapshot, filters);
    let considered = candidates.len();
    let mut targets = rank_transfer_targets(candidates, &ctx.snapshot, ctx.horizon, &ctx.config);
    if let Some(limit) = filters.limit {
        targets.truncate(limit);
    }
    TargetsReport {
        horizon: ctx.horizon,
        considered,
        targets,
    }
}

pub fn render_targets_report(report: &TargetsReport<'_>, ctx: &CommandContext) -> String {
    if report.targets.is_empty() {
        return "No transfer targets match the filters".to_string();
    }

    let mut lines = vec![format!(
        "Top {} of {} candidates over {} GW:",
        report.targets.len(),
        report.considered,
        report.horizon
    )];
    let neutral = ctx.config.normalization.neutral_difficulty;
    for (i, t) in report.targets.iter().enumerate() {
        let p = t.player;
        lines.push(format!(
            "{:>2}. {} {} {} £{:.1}m {:.1} xPts/GW ({:.1} total)  [{}]",
            i + 1,
            p.id,
            p.name,
            p.position,
            p.price,
            t.xpts,
            t.total_xpts,
            format_fixtures(&p.upcoming_fixtures, report.horizon, neutral)
        ));
        if !t.top_reasons.is_empty() {
            lines.push(format!("      {}", t.top_reasons.join(", ")));
        }
    }
    lines.join("\n")
}

/// Handle the targets command
pub fn handle_targets(ctx: &CommandContext, filters: &TargetFilters, as_json: bool) -> Result<()> {
    let report = build_targets_report(ctx, filters);
    if as_json {
        print_json(&report)?;
    } else {
        println!("{}", render_targets_report(&report, ctx)); // tarpaulin::skip
    }
    Ok(())
}
