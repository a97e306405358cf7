use clap::{Parser, Subcommand};
use slotmachine_core::{Engine, MachineConfig};
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod session;
mod simulate;

#[derive(Parser)]
#[command(name = "slotmachine", about = "Three-reel slot machine in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Machine config (JSON); built-in 3x3 machine when absent
    #[arg(long, global = true, env = "SLOTMACHINE_CONFIG")]
    config: Option<PathBuf>,
    /// Fixed RNG seed for a reproducible session
    #[arg(long, global = true, env = "SLOTMACHINE_SEED")]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session: deposit, spin, check balance
    Play,
    /// Run many spins and report return-to-player figures
    Simulate {
        #[arg(long, default_value_t = 10_000)]
        spins: u64,
        #[arg(long, default_value_t = 3)]
        lines: u32,
        #[arg(long, default_value_t = 1)]
        bet: u64,
        /// Export every spin to this CSV path
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Print the session statistics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the symbol table
    Paytable {
        /// Print the full machine config as JSON, usable as a --config file
        #[arg(long)]
        json: bool,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<MachineConfig> {
    let config = match path {
        Some(path) => {
            info!(path = %path.display(), "loading machine config");
            MachineConfig::from_file(path)?
        }
        None => MachineConfig::default(),
    };
    Ok(config)
}

fn build_engine(config: MachineConfig, seed: Option<u64>) -> anyhow::Result<Engine> {
    let engine = match seed {
        Some(seed) => Engine::seeded(config, seed)?,
        None => Engine::new(config)?,
    };
    Ok(engine)
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => {
            let mut engine = build_engine(config, cli.seed)?;
            let stdin = io::stdin();
            session::run(&mut engine, stdin.lock(), io::stdout().lock())?;
        }
        Commands::Simulate {
            spins,
            lines,
            bet,
            csv,
            json,
        } => {
            let mut engine = build_engine(config, cli.seed)?;
            let params = simulate::SimParams { spins, lines, bet };
            let stats = match csv {
                Some(path) => {
                    let mut wtr = csv::Writer::from_path(&path)?;
                    let stats = simulate::run(&mut engine, &params, Some(&mut wtr))?;
                    wtr.flush()?;
                    println!("Exported {} spins to {}", stats.spins, path.display());
                    stats
                }
                None => simulate::run::<io::Sink>(&mut engine, &params, None)?,
            };
            let mut out = io::stdout().lock();
            if json {
                simulate::print_json(&mut out, &stats)?;
            } else {
                simulate::print_report(&mut out, &params, &stats)?;
            }
        }
        Commands::Paytable { json: true } => {
            session::write_config_json(&mut io::stdout().lock(), &config)?;
        }
        Commands::Paytable { json: false } => {
            session::write_paytable(&mut io::stdout().lock(), &config)?;
        }
    }

    Ok(())
}
