//! Squad ranking, captaincy and a suggested starting XI.

use serde::Serialize;

use super::common::{print_json, CommandContext};
use crate::{
    cli::types::PlayerQuery,
    engine::{rank_squad, suggest_lineup, Lineup, PlayerProjection, SquadRanking},
    Result,
};

#[derive(Debug, Serialize)]
pub struct SquadReport<'a> {
    pub horizon: usize,
    pub ranking: SquadRanking<'a>,
    pub lineup: Lineup<'a>,
}

/// Rank the given players, or the snapshot's squad when `queries` is empty.
pub fn build_squad_report<'a>(
    ctx: &'a CommandContext,
    queries: &[PlayerQuery],
) -> Result<SquadReport<'a>> {
    let players = if queries.is_empty() {
        ctx.snapshot.squad_players()
    } else {
        ctx.find_players(queries)?
    };

    let ranking = rank_squad(players, &ctx.snapshot, ctx.horizon, &ctx.config);
    let lineup = suggest_lineup(&ranking.ranked);

    Ok(SquadReport {
        horizon: ctx.horizon,
        ranking,
        lineup,
    })
}

fn marker(projection: &PlayerProjection<'_>, report: &SquadReport<'_>) -> &'static str {
    let is = |slot: &Option<PlayerProjection<'_>>| {
        slot.as_ref()
            .is_some_and(|p| p.player.id == projection.player.id)
    };
    if is(&report.ranking.captain) {
        " (C)"
    } else if is(&report.ranking.vice_captain) {
        " (VC)"
    } else {
        ""
    }
}

pub fn render_squad_report(report: &SquadReport<'_>) -> String {
    if report.ranking.ranked.is_empty() {
        return "No squad players found in snapshot".to_string();
    }

    let mut lines = vec![format!("Squad ranked over {} GW:", report.horizon)];
    for (i, p) in report.ranking.ranked.iter().enumerate() {
        lines.push(format!(
            "{:>2}. {} {} {:.1} xPts/GW ({:.1} total){}",
            i + 1,
            p.player.position,
            p.player.name,
            p.xpts,
            p.total_xpts,
            marker(p, report)
        ));
    }

    let names = |players: &[PlayerProjection<'_>]| {
        players
            .iter()
            .map(|p| p.player.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    lines.push(format!(
        "Suggested XI ({}): {}",
        report.lineup.formation,
        names(&report.lineup.starters)
    ));
    if !report.lineup.bench.is_empty() {
        lines.push(format!("Bench: {}", names(&report.lineup.bench)));
    }
    lines.join("\n")
}

/// Handle the squad command
pub fn handle_squad(ctx: &CommandContext, queries: &[PlayerQuery], as_json: bool) -> Result<()> {
    let report = build_squad_report(ctx, queries)?;
    if as_json {
        print_json(&report)?;
    } else {
        println!("{}", render_squad_report(&report)); // tarpaulin::skip
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::common::test_support;
    use crate::engine::ModelConfig;

    fn ctx() -> CommandContext {
        CommandContext::new(test_support::snapshot(), ModelConfig::default(), None)
    }

    #[test]
    fn test_defaults_to_snapshot_squad() {
        let ctx = ctx();
        let report = build_squad_report(&ctx, &[]).unwrap();
        let mut ids: Vec<u32> = report
            .ranking
            .ranked
            .iter()
            .map(|p| p.player.id.as_u32())
            .collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2, 4, 5]);
        assert!(report.ranking.captain.is_some());
        assert!(report.ranking.vice_captain.is_some());
    }

    #[test]
    fn test_explicit_players_and_captaincy() {
        let ctx = ctx();
        let queries: Vec<PlayerQuery> = vec!["foden".parse().unwrap(), "saka".parse().unwrap()];
        let report = build_squad_report(&ctx, &queries).unwrap();
        assert_eq!(report.ranking.ranked.len(), 2);
        assert_eq!(report.ranking.captain.as_ref().unwrap().player.name, "Saka");
        assert_eq!(report.ranking.vice_captain.as_ref().unwrap().player.name, "Foden");

        let text = render_squad_report(&report);
        assert!(text.contains(" 1. MID Saka"));
        assert!(text.contains("(C)"));
        assert!(text.contains("(VC)"));
        assert!(text.contains("Suggested XI (0-2-0): Saka, Foden"));
    }

    #[test]
    fn test_empty_squad_message() {
        let mut ctx = ctx();
        ctx.snapshot.squad.clear();
        let report = build_squad_report(&ctx, &[]).unwrap();
        assert_eq!(render_squad_report(&report), "No squad players found in snapshot");
    }

    #[test]
    fn test_bad_query_fails() {
        let ctx = ctx();
        let queries: Vec<PlayerQuery> = vec!["zzz".parse().unwrap()];
        assert!(build_squad_report(&ctx, &queries).is_err());
    }
}
