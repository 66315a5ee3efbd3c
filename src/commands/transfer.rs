//! Compare selling one player for another.

use serde::Serialize;

use super::common::{format_signed, print_json, CommandContext};
use crate::{
    cli::types::PlayerQuery,
    engine::{analyze_transfer, PlayerMetrics, TransferAnalysis},
    error::XptsError,
    Result,
};

#[derive(Debug, Serialize)]
pub struct TransferReport<'a> {
    pub player_out: &'a PlayerMetrics,
    pub player_in: &'a PlayerMetrics,
    pub horizon: usize,
    pub analysis: TransferAnalysis,
}

pub fn build_transfer_report<'a>(
    ctx: &'a CommandContext,
    out_query: &PlayerQuery,
    in_query: &PlayerQuery,
) -> Result<TransferReport<'a>> {
    let player_out = ctx.find_player(out_query)?;
    let player_in = ctx.find_player(in_query)?;
    if player_out.id == player_in.id {
        return Err(XptsError::InvalidTransfer {
            message: format!("{} cannot be swapped for themselves", player_out.name),
        });
    }

    let analysis = analyze_transfer(player_out, player_in, ctx.horizon, &ctx.snapshot, &ctx.config);
    Ok(TransferReport {
        player_out,
        player_in,
        horizon: ctx.horizon,
        analysis,
    })
}

pub fn render_transfer_report(report: &TransferReport<'_>) -> String {
    let a = &report.analysis;
    let mut lines = vec![
        format!(
            "{} -> {} over {} GW",
            report.player_out.name, report.player_in.name, report.horizon
        ),
        format!(
            "Projected: {:.1} -> {:.1} ({})",
            a.out_projected,
            a.in_projected,
            format_signed(a.points_diff)
        ),
        format!(
            "Form {}  Price {}m  Fixtures {} (avg FDR {:.1} -> {:.1})",
            format_signed(a.form_diff),
            format_signed(a.price_diff),
            format_signed(a.fixture_diff),
            a.avg_out_difficulty,
            a.avg_in_difficulty
        ),
        format!("Risk: {}  Recommendation: {}", a.risk_level, a.recommendation),
    ];
    if a.momentum_override {
        lines.push(format!(
            "Price momentum: in {} / out {}",
            a.in_pressure, a.out_pressure
        ));
    }
    lines.push(a.explanation.clone());
    lines.join("\n")
}

/// Handle the transfer command
pub fn handle_transfer(
    ctx: &CommandContext,
    out_query: &PlayerQuery,
    in_query: &PlayerQuery,
    as_json: bool,
) -> Result<()> {
    let report = build_transfer_report(ctx, out_query, in_query)?;
    if as_json {
        print_json(&report)?;
    } else {
        println!("{}", render_transfer_report(&report)); // tarpaulin::skip
    }
    Ok(())
}
