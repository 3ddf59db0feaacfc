//! PrizeRoller command line
//!
//! Usage:
//!   prize-roller check prizes.txt           - Validate a prize table
//!   prize-roller draw --name Amy --points 50 - Run draws with the roller
//!   prize-roller simulate --draws 1000000   - Compare observed and compiled odds

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use pr_core::COST_PER_DRAW;
use pr_engine::{DrawOutcome, DrawScheduler, DrawSession, EngineConfig, simulate};
use pr_stage::{PhaseStep, RollerPhase, SystemClock, TimingProfile};
use pr_table::CompiledTable;

#[derive(Parser)]
#[command(name = "prize-roller", version, about = "Weighted prize draws with a rolling reveal")]
struct Cli {
    /// Engine config (JSON or YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a prize table and print the summary
    Check {
        /// Table file, or `-` for stdin
        file: PathBuf,
    },
    /// Run draws for one user
    Draw {
        /// User name
        #[arg(short, long)]
        name: String,
        /// Starting points
        #[arg(short, long)]
        points: u64,
        /// Prize table file (built-in table if omitted)
        #[arg(long)]
        prizes: Option<PathBuf>,
        /// Draws to attempt
        #[arg(long, default_value_t = 1)]
        count: u32,
        /// RNG seed
        #[arg(long)]
        seed: Option<u64>,
        /// Roller timing
        #[arg(short, long, value_enum)]
        timing: Option<TimingArg>,
        /// Print results as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Sample many draws and compare with the table
    Simulate {
        /// Prize table file (built-in table if omitted)
        #[arg(long)]
        prizes: Option<PathBuf>,
        /// Number of draws
        #[arg(short, long)]
        draws: u64,
        /// RNG seed
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TimingArg {
    Normal,
    Turbo,
    Instant,
}

impl From<TimingArg> for TimingProfile {
    fn from(arg: TimingArg) -> Self {
        match arg {
            TimingArg::Normal => TimingProfile::Normal,
            TimingArg::Turbo => TimingProfile::Turbo,
            TimingArg::Instant => TimingProfile::Instant,
        }
    }
}

/// JSON line printed per draw
#[derive(Serialize)]
struct DrawReport<'a> {
    #[serde(flatten)]
    outcome: &'a DrawOutcome,
    user_name: &'a str,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::Check { file } => check_table(&config, &file),
        Commands::Draw {
            name,
            points,
            prizes,
            count,
            seed,
            timing,
            json,
        } => {
            let mut config = config;
            if seed.is_some() {
                config.seed = seed;
            }
            if let Some(timing) = timing {
                config.timing = timing.into();
                config.timing_scale = 1.0;
            }
            run_draws(&config, prizes.as_deref(), &name, points, count, json)
        }
        Commands::Simulate {
            prizes,
            draws,
            seed,
        } => {
            let seed = seed.or(config.seed).unwrap_or_else(rand::random);
            run_simulation(&config, prizes.as_deref(), draws, seed)
        }
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

fn load_table(config: &EngineConfig, prizes: Option<&Path>) -> Result<CompiledTable> {
    match prizes {
        Some(path) => {
            let text = read_input(path)?;
            config
                .compiler()
                .compile(&text)
                .with_context(|| format!("Invalid prize table {}", path.display()))
        }
        None => config.compile_prizes().context("Invalid prize table in config"),
    }
}

fn check_table(config: &EngineConfig, file: &Path) -> Result<()> {
    let compiled = load_table(config, Some(file))?;
    println!("{}", compiled.summary());
    for entry in compiled.table.entries() {
        println!(
            "  {:<20} {:>7}%  ≤ {:>5}",
            entry.name,
            entry.percent.to_string(),
            entry.cumulative_threshold
        );
    }
    Ok(())
}

fn run_draws(
    config: &EngineConfig,
    prizes: Option<&Path>,
    name: &str,
    points: u64,
    count: u32,
    json: bool,
) -> Result<()> {
    let compiled = load_table(config, prizes)?;
    let mut session = DrawSession::with_config(config);
    session.start_session(name, points, compiled.into_table())?;

    let clock = SystemClock::new();

    for _ in 0..count {
        if !session.can_draw() {
            println!("{}", session.draw_prompt());
            break;
        }

        let outcome = session.draw(&clock)?;
        let mut scheduler = DrawScheduler::new(outcome.timeline.clone());

        if json {
            scheduler.run_blocking(&clock, &mut session, |_| {});
            let report = DrawReport {
                outcome: &outcome,
                user_name: session.user_name(),
            };
            println!("{}", serde_json::to_string(&report)?);
        } else {
            println!(
                "{}: {} points left, rolling...",
                outcome.result.draw_id, outcome.result.balance_after
            );
            scheduler.run_blocking(&clock, &mut session, print_phase);
        }
    }

    if !json {
        let stats = session.stats();
        println!(
            "{} draws, {} points spent, {} points left (each draw costs {})",
            stats.total_draws,
            stats.points_spent,
            session.points(),
            COST_PER_DRAW
        );
    }
    Ok(())
}

fn print_phase(step: &PhaseStep) {
    match &step.phase {
        RollerPhase::Jump { index, offset_px } => {
            log::debug!("jump to slot {} ({} px)", index, offset_px);
        }
        RollerPhase::Scroll(motion) => {
            println!(
                "  spinning {} slots over {} ms",
                motion.distance_slots(),
                motion.duration_ms
            );
        }
        RollerPhase::Reveal { message, .. } => {
            println!("  {}", message);
        }
    }
}

fn run_simulation(
    config: &EngineConfig,
    prizes: Option<&Path>,
    draws: u64,
    seed: u64,
) -> Result<()> {
    let compiled = load_table(config, prizes)?;
    let report = simulate(&compiled.table, draws, seed);

    println!("{} draws (seed {})", report.draws, report.seed);
    println!("  {:<20} {:>9} {:>9} {:>10}", "prize", "expected", "observed", "count");
    for row in &report.rows {
        println!(
            "  {:<20} {:>8.2}% {:>8.2}% {:>10}",
            row.name,
            row.expected_share * 100.0,
            row.observed_share * 100.0,
            row.observed
        );
    }
    if report.sentinel > 0 {
        println!("  {} draws matched no prize", report.sentinel);
    }
    println!("max deviation: {:.4}%", report.max_deviation() * 100.0);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_draw_args() {
        let cli = Cli::parse_from([
            "prize-roller",
            "draw",
            "--name",
            "amy",
            "--points",
            "50",
            "--timing",
            "instant",
            "--count",
            "3",
        ]);
        match cli.command {
            Commands::Draw {
                points,
                count,
                timing,
                ..
            } => {
                assert_eq!(points, 50);
                assert_eq!(count, 3);
                assert_eq!(
                    timing.map(TimingProfile::from),
                    Some(TimingProfile::Instant)
                );
            }
            _ => panic!("expected draw"),
        }
    }
}
