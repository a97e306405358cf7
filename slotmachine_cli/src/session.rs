//! Line-oriented play session. Each input line is one player action; engine
//! errors are shown to the player and the session carries on.

use slotmachine_core::{Engine, MachineConfig};
use std::io::{BufRead, Write};
use tracing::debug;

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Deposit(String),
    Spin { lines: String, bet: String },
    Balance,
    Stats,
    Paytable,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();
        let cmd = match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("deposit" | "d", [amount]) => Command::Deposit(amount.to_string()),
            ("spin" | "s", [lines, bet]) => Command::Spin {
                lines: lines.to_string(),
                bet: bet.to_string(),
            },
            ("balance" | "b", []) => Command::Balance,
            ("stats", []) => Command::Stats,
            ("paytable", []) => Command::Paytable,
            ("help" | "?", []) => Command::Help,
            ("quit" | "exit" | "q", []) => Command::Quit,
            ("deposit" | "d", _) => return Err("usage: deposit <amount>".into()),
            ("spin" | "s", _) => return Err("usage: spin <lines> <bet>".into()),
            (other, _) => return Err(format!("unknown command '{other}', try 'help'")),
        };
        Ok(Some(cmd))
    }
}

const HELP: &str = "\
commands:
  deposit <amount>     add funds
  spin <lines> <bet>   bet <bet> on each of <lines> lines
  balance              show balance
  stats                session totals
  paytable             symbol weights and payouts
  quit                 leave";

pub fn run<I: BufRead, O: Write>(
    engine: &mut Engine,
    input: I,
    mut out: O,
) -> anyhow::Result<()> {
    writeln!(out, "Slot Machine. Type 'help' for commands.")?;
    writeln!(out, "Balance: ${}", engine.balance())?;
    for line in input.lines() {
        let line = line?;
        let cmd = match Command::parse(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(msg) => {
                writeln!(out, "Error: {msg}")?;
                continue;
            }
        };
        if cmd == Command::Quit {
            break;
        }
        apply(engine, cmd, &mut out)?;
    }
    let stats = engine.stats();
    writeln!(
        out,
        "Leaving with ${} after {} spins.",
        engine.balance(),
        stats.spins
    )?;
    Ok(())
}

fn apply<O: Write>(engine: &mut Engine, cmd: Command, out: &mut O) -> anyhow::Result<()> {
    match cmd {
        Command::Deposit(amount) => match engine.deposit(&amount) {
            Ok(balance) => writeln!(out, "Balance: ${balance}")?,
            Err(e) => report(out, &e)?,
        },
        Command::Spin { lines, bet } => {
            let Ok(lines) = lines.parse::<u32>() else {
                writeln!(out, "Error: Please enter a valid number of lines.")?;
                return Ok(());
            };
            match engine.spin(lines, &bet) {
                Ok(result) => {
                    writeln!(out, "{}", result.grid)?;
                    writeln!(out, "{}", result.summary())?;
                    writeln!(out, "Balance: ${}", result.balance)?;
                }
                Err(e) => report(out, &e)?,
            }
        }
        Command::Balance => writeln!(out, "Balance: ${}", engine.balance())?,
        Command::Stats => {
            let s = engine.stats();
            writeln!(
                out,
                "spins={} bet=${} won=${} rtp={:.2}% hit_rate={:.2}% biggest=${}",
                s.spins,
                s.total_bet,
                s.total_won,
                s.rtp(),
                s.hit_rate(),
                s.biggest_win
            )?;
        }
        Command::Paytable => write_paytable(out, engine.config())?,
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Quit => {}
    }
    Ok(())
}

fn report<O: Write>(out: &mut O, err: &slotmachine_core::EngineError) -> std::io::Result<()> {
    debug!(error = %err, "rejected input");
    writeln!(out, "Error: {err}")
}

pub fn write_paytable<O: Write>(out: &mut O, config: &MachineConfig) -> std::io::Result<()> {
    let total = config.symbols.total_count() as f64;
    writeln!(out, "symbol  count  value  chance")?;
    for (symbol, spec) in config.symbols.iter() {
        writeln!(
            out,
            "{:<6}  {:>5}  {:>4}x  {:>5.1}%",
            symbol.as_str(),
            spec.count,
            spec.value,
            f64::from(spec.count) / total * 100.0
        )?;
    }
    writeln!(
        out,
        "lines 1-{}, bet ${}-${} per line",
        config.max_lines, config.min_bet, config.max_bet
    )
}

pub fn write_config_json<O: Write>(out: &mut O, config: &MachineConfig) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, config)?;
    writeln!(out)?;
    Ok(())
}
