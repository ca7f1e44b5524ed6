use anyhow::Result;
use censusviz::{config::Settings, pipeline, report, CensusError};
use clap::{Parser, Subcommand};
use std::{path::PathBuf, process::ExitCode};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(author, version, about = "Charts from a Census Profile CSV export")]
struct Args {
    #[command(subcommand)]
    command: Command,
    /// YAML settings file layered over the built-in defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Census Profile CSV export
    #[arg(long, global = true, env = "CENSUS_CSV")]
    input: Option<PathBuf>,
    /// Directory the charts are written to
    #[arg(long, global = true, env = "CENSUS_RESULTS_DIR")]
    results_dir: Option<PathBuf>,
    /// TrueType font used for chart text
    #[arg(long, global = true)]
    font: Option<PathBuf>,
    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Top 5 non-official mother tongues
    Languages,
    /// Household total income distribution
    Income,
    /// Both analyses from a single load
    All,
}

fn main() -> ExitCode {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<CensusError>() {
                Some(CensusError::DataNotFound { path }) => eprintln!(
                    "Error: Data file not found at {}. Please check your folder structure.",
                    path.display()
                ),
                _ => eprintln!("Error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    // ─── 2) settings: file, then flags ───────────────────────────────
    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(input) = &args.input {
        settings.input = input.clone();
    }
    if let Some(dir) = &args.results_dir {
        settings.results_dir = dir.clone();
    }
    if let Some(font) = &args.font {
        settings.font_path = Some(font.clone());
    }

    // ─── 3) load once ────────────────────────────────────────────────
    let raw = pipeline::load(&settings)?;
    let mut json = serde_json::Map::new();

    // ─── 4) run the requested analyses ───────────────────────────────
    if matches!(args.command, Command::Languages | Command::All) {
        let out = pipeline::run_languages(&settings, &raw)?;
        if args.json {
            json.insert("languages".into(), serde_json::to_value(&out)?);
        } else {
            println!();
            print!("{}", report::language_table(&out.languages));
            println!("\n[Success] Chart saved to: {}", out.chart.display());
        }
    }

    if matches!(args.command, Command::Income | Command::All) {
        let out = pipeline::run_income(&settings, &raw)?;
        if args.json {
            json.insert("income".into(), serde_json::to_value(&out)?);
        } else {
            println!();
            print!("{}", report::income_table(&out.brackets));
            print!("{}", report::income_summary(&out.summary));
            println!("Chart saved successfully to {}", out.chart.display());
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&json)?);
    }

    info!("all done");
    Ok(())
}
