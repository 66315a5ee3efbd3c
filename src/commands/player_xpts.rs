//! Multi-gameweek breakdown for a single player.

use serde::Serialize;

use super::common::{print_json, CommandContext};
use crate::{
    cli::types::PlayerQuery,
    engine::{
        calculate_multi_gw_xpts, types::Fixture, MultiGwResult, PlayerMetrics, PricePressure,
    },
    Result,
};

#[derive(Debug, Serialize)]
pub struct PlayerXptsReport<'a> {
    pub player: &'a PlayerMetrics,
    pub team: &'a str,
    pub horizon: usize,
    pub price_pressure: PricePressure,
    pub projection: MultiGwResult,
}

pub fn build_player_report<'a>(
    ctx: &'a CommandContext,
    query: &PlayerQuery,
) -> Result<PlayerXptsReport<'a>> {
    let player = ctx.find_player(query)?;
    let projection = calculate_multi_gw_xpts(
        player,
        &player.upcoming_fixtures,
        &ctx.snapshot,
        ctx.horizon,
        &ctx.config,
    );

    Ok(PlayerXptsReport {
        player,
        team: ctx.team_short_name(player.team_id),
        horizon: ctx.horizon,
        price_pressure: player.price_pressure(&ctx.config.transfer.momentum),
        projection,
    })
}

fn fixture_line(fixture: Option<&Fixture>, xpts: f64) -> String {
    match fixture {
        Some(f) => {
            let gw = f
                .gameweek
                .map(|gw| gw.to_string())
                .unwrap_or_else(|| "GW?".to_string());
            let difficulty = f
                .difficulty
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string());
            format!("  {gw:<5} {:<10} FDR {difficulty}  {xpts:.1} xPts", f.opponent)
        }
        None => format!("  {:<5} {:<10} FDR -  {xpts:.1} xPts", "GW?", "TBD"),
    }
}

pub fn render_player_report(report: &PlayerXptsReport<'_>) -> String {
    let p = report.player;
    let result = &report.projection;
    let mut lines = vec![format!(
        "{} ({}, {}) £{:.1}m  form {:.1}  price {}",
        p.name, p.position, report.team, p.price, p.form, report.price_pressure
    )];

    if result.placeholder {
        lines.push("  no fixtures known, neutral placeholder used".to_string());
    } else {
        for (i, gw) in result.per_gw.iter().enumerate() {
            lines.push(fixture_line(p.upcoming_fixtures.get(i), gw.xpts));
        }
    }

    lines.push(format!(
        "Total {:.1} xPts over {} GW (avg {:.1})",
        result.total_xpts, report.horizon, result.avg_xpts
    ));
    if !result.top_reasons.is_empty() {
        lines.push(format!("Why: {}", result.top_reasons.join(", ")));
    }
    lines.join("\n")
}

/// Handle the xpts command
pub fn handle_player_xpts(ctx: &CommandContext, query: &PlayerQuery, as_json: bool) -> Result<()> {
    let report = build_player_report(ctx, query)?;
    if as_json {
        print_json(&report)?;
    } else {
        println!("{}", render_player_report(&report)); // tarpaulin::skip
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::common::test_support;
    use crate::engine::ModelConfig;

    fn ctx(horizon: usize) -> CommandContext {
        CommandContext::new(test_support::snapshot(), ModelConfig::default(), Some(horizon))
    }

    #[test]
    fn test_player_report() {
        let ctx = ctx(2);
        let report = build_player_report(&ctx, &"saka".parse().unwrap()).unwrap();
        assert_eq!(report.team, "ARS");
        assert_eq!(report.projection.per_gw.len(), 2);
        assert!(!report.projection.placeholder);
        assert_eq!(report.price_pressure, PricePressure::Stable);

        let text = render_player_report(&report);
        assert!(text.starts_with("Saka (MID, ARS) £10.0m"));
        assert!(text.contains("GW11"));
        assert!(text.contains("SHU (H)"));
        assert!(!text.contains("LUT (H)"));
        assert!(text.contains("over 2 GW"));
        assert!(text.contains("Why: In great form"));
    }

    #[test]
    fn test_placeholder_is_reported() {
        let mut ctx = ctx(3);
        ctx.snapshot.players[2].upcoming_fixtures.clear();
        let report = build_player_report(&ctx, &"3".parse().unwrap()).unwrap();
        assert!(report.projection.placeholder);
        assert!(render_player_report(&report).contains("neutral placeholder"));
    }

    #[test]
    fn test_report_serializes() {
        let ctx = ctx(3);
        let report = build_player_report(&ctx, &"haaland".parse().unwrap()).unwrap();
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["player"]["name"], "Haaland");
        assert_eq!(value["horizon"], 3);
        assert_eq!(value["price_pressure"], "stable");
        assert_eq!(value["projection"]["per_gw"].as_array().unwrap().len(), 3);
        assert_eq!(value["projection"]["per_gw"][0]["factors"][3]["kind"], "fdr");
    }

    #[test]
    fn test_unknown_player_is_error() {
        let ctx = ctx(3);
        assert!(build_player_report(&ctx, &"nobody".parse().unwrap()).is_err());
    }
}
