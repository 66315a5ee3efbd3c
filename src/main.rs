//! Entry point: parse CLI and dispatch to command handlers.

use anyhow::Context;
use clap::Parser;
use fpl_xpts::{
    cli::{Commands, XptsCli},
    commands::{
        common::CommandContext,
        player_xpts::handle_player_xpts,
        squad::handle_squad,
        targets::{handle_targets, TargetFilters},
        transfer::handle_transfer,
    },
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logs go to stderr so `--json` output stays clean.
fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let default_filter = if verbose { "fpl_xpts=debug" } else { "fpl_xpts=warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))
}

/// Run the CLI.
fn main() -> anyhow::Result<()> {
    let app = XptsCli::parse();
    init_tracing(app.common.verbose)?;

    let ctx = CommandContext::load(
        app.common.snapshot,
        app.common.config,
        app.common.horizon,
    )
    .context("Failed to load snapshot and model config")?;
    let json = app.common.json;

    match app.command {
        Commands::Xpts { player } => handle_player_xpts(&ctx, &player, json)?,

        Commands::Squad { players } => handle_squad(&ctx, &players, json)?,

        Commands::Targets {
            positions,
            max_price,
            limit,
        } => {
            let filters = TargetFilters {
                positions,
                max_price,
                limit: Some(limit),
            };
            handle_targets(&ctx, &filters, json)?
        }

        Commands::Transfer {
            player_out,
            player_in,
        } => handle_transfer(&ctx, &player_out, &player_in, json)?,
    }

    Ok(())
}
