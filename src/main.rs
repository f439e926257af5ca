//! Command-line front end: simulate a commit timeline, persist it,
//! summarize it, and optionally replay it into a Git repository.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, Local, NaiveDateTime, TimeDelta, TimeZone};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use commit_synth::report::{write_timestamps, Report};
use commit_synth::repo::{create_simulated_repository, random_repo_suffix};
use commit_synth::simulate::{simulate, SimulationConfig};
use commit_synth::time::{datetime_at, epoch_seconds, DAY};

/// Simulate a realistic Git commit history.
#[derive(Parser, Debug)]
#[command(name = "commit-synth", version, about, long_about = None)]
struct Cli {
    /// Length of the simulated horizon, in days.
    #[arg(long, default_value_t = 10.0)]
    days: f64,

    /// Start of the horizon as local "YYYY-MM-DD HH:MM:SS" (defaults to now).
    #[arg(long)]
    start: Option<String>,

    /// Where to write the timestamp list.
    /// Defaults to "output/simulation/<start date> to <end date>.txt".
    #[arg(long)]
    output: Option<PathBuf>,

    /// Replay the result into a Git repository at this path.
    #[arg(long)]
    repo: Option<PathBuf>,

    /// Materialize into a generated "shadow-git-XXXXXXXX" directory
    /// next to the working directory (implied by --repo).
    #[arg(long)]
    materialize: bool,

    /// Seed for a reproducible run (defaults to OS entropy).
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum window length in days.
    #[arg(long, default_value_t = 7.0)]
    max_window_days: f64,

    /// Echo every simulated timestamp to stdout.
    #[arg(long)]
    print_timestamps: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(&Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let start = match &cli.start {
        Some(text) => parse_local(text)?,
        None => Local::now(),
    };
    let horizon = TimeDelta::try_milliseconds((cli.days * DAY * 1e3) as i64)
        .ok_or_else(|| format!("horizon of {} days is out of range", cli.days))?;
    let end = start + horizon;

    let mut config = SimulationConfig::default();
    config.max_window_length = cli.max_window_days * DAY;

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let events = simulate(&start, &end, &config, &mut rng).map_err(|e| e.to_string())?;

    if cli.print_timestamps {
        for &t in &events {
            println!("{}", datetime_at(t, &Local));
        }
    }

    let output = cli.output.clone().unwrap_or_else(|| {
        PathBuf::from(format!(
            "output/simulation/{} to {}.txt",
            start.date_naive(),
            end.date_naive()
        ))
    });
    write_timestamps(&output, &events, &Local).map_err(|e| e.to_string())?;

    let report = Report::new(&events, epoch_seconds(&start), epoch_seconds(&end));
    println!("{}", report);

    if cli.repo.is_some() || cli.materialize {
        let repo_path = cli.repo.clone().unwrap_or_else(|| {
            PathBuf::from(format!("../shadow-git-{}", random_repo_suffix(8, &mut rng)))
        });
        let commits =
            create_simulated_repository(&output, &repo_path).map_err(|e| e.to_string())?;
        println!("created {} commits in {}", commits, repo_path.display());
    }

    Ok(())
}

fn parse_local(text: &str) -> Result<DateTime<Local>, String> {
    let naive = NaiveDateTime::parse_from_str(text.trim(), "%Y-%m-%d %H:%M:%S")
        .map_err(|e| format!("cannot parse start time {:?}: {}", text, e))?;
    Local
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| format!("start time {:?} is ambiguous in the local timezone", text))
}
