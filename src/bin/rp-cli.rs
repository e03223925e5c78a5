#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rp_lib::{LogEntry, RewardsLedger, RewardsPolicy, io, simulate};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// rp-cli: apply daily purchase logs to a rewards ledger
#[derive(Parser)]
#[command(name = "rp-cli")]
#[command(version = "0.1.0")]
struct Cli {
    /// accrual policy file (json); defaults to 17/18 points with a 250 cutoff
    #[arg(long, global = true)]
    policy: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a day (or list of days) of log entries and process them in order
    Run {
        /// input file (json)
        #[arg(short, long)]
        input: PathBuf,

        /// output snapshot file (json)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Generate synthetic days and process them
    Sim {
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value_t = 1)]
        days: usize,
        #[arg(long, default_value_t = 20)]
        n: usize,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Process the Banana/Apple example day
    Demo {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn process(ledger: &mut RewardsLedger, days: &[Vec<LogEntry>]) -> Result<()> {
    for (i, day) in days.iter().enumerate() {
        ledger
            .process_day(day)
            .with_context(|| format!("processing day {}", i + 1))?;
    }
    Ok(())
}

fn emit(ledger: &RewardsLedger, out: Option<&Path>) -> Result<()> {
    if let Some(p) = out {
        ledger.to_file(p).context("writing snapshot")?;
        println!("snapshot written to {}", p.display());
    } else {
        println!("{}", ledger.to_json().context("serializing snapshot")?);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let policy = match &cli.policy {
        Some(p) => io::load_policy(p).context("loading policy")?,
        None => RewardsPolicy::default(),
    };
    let mut ledger = RewardsLedger::with_policy(policy);

    match cli.cmd {
        Commands::Run { input, out } => {
            let days = io::load_days(&input)
                .with_context(|| format!("loading log {}", input.display()))?;
            process(&mut ledger, &days)?;
            emit(&ledger, out.as_deref())?;
        }
        Commands::Sim {
            seed,
            days,
            n,
            out,
        } => {
            let days = simulate::generate_days(seed, days, n);
            process(&mut ledger, &days)?;
            emit(&ledger, out.as_deref())?;
        }
        Commands::Demo { out } => {
            process(&mut ledger, &[simulate::worked_example()])?;
            emit(&ledger, out.as_deref())?;
        }
    }

    Ok(())
}
