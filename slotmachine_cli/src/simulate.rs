use anyhow::Context;
use slotmachine_core::{Engine, SessionStats};
use std::io::Write;
use tracing::info;

pub struct SimParams {
    pub spins: u64,
    pub lines: u32,
    pub bet: u64,
}

/// Funds the engine for every spin up front, then spins `params.spins` times.
/// Each spin is written to `csv` when given.
pub fn run<W: Write>(
    engine: &mut Engine,
    params: &SimParams,
    mut csv: Option<&mut csv::Writer<W>>,
) -> anyhow::Result<SessionStats> {
    let bankroll = params
        .bet
        .checked_mul(u64::from(params.lines))
        .and_then(|per_spin| per_spin.checked_mul(params.spins))
        .context("simulation bankroll overflows")?;
    if bankroll > 0 {
        engine.deposit_amount(bankroll)?;
    }
    if let Some(wtr) = csv.as_deref_mut() {
        wtr.write_record([
            "spin",
            "grid",
            "total_bet",
            "winnings",
            "winning_lines",
            "balance",
        ])?;
    }
    info!(spins = params.spins, lines = params.lines, bet = params.bet, "simulation start");

    for n in 1..=params.spins {
        let result = engine.spin_amount(params.lines, params.bet)?;
        if let Some(wtr) = csv.as_deref_mut() {
            let lines: Vec<String> = result.winning_lines.iter().map(u32::to_string).collect();
            wtr.write_record(&[
                n.to_string(),
                result.grid.render().replace('\n', " / "),
                result.total_bet.to_string(),
                result.winnings.to_string(),
                lines.join(" "),
                result.balance.to_string(),
            ])?;
        }
    }
    Ok(engine.stats().clone())
}

pub fn print_report<O: Write>(
    out: &mut O,
    params: &SimParams,
    stats: &SessionStats,
) -> std::io::Result<()> {
    writeln!(
        out,
        "{} spins, {} lines at ${} per line",
        stats.spins, params.lines, params.bet
    )?;
    writeln!(out, "total bet:   ${}", stats.total_bet)?;
    writeln!(out, "total won:   ${}", stats.total_won)?;
    writeln!(out, "rtp:         {:.2}%", stats.rtp())?;
    writeln!(out, "hit rate:    {:.2}%", stats.hit_rate())?;
    writeln!(out, "biggest win: ${}", stats.biggest_win)
}

pub fn print_json<O: Write>(out: &mut O, stats: &SessionStats) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, stats)?;
    writeln!(out)?;
    Ok(())
}
