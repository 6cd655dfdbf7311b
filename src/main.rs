use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use bounty_wizard::app::App;
use bounty_wizard::config::Config;
use bounty_wizard::draft;
use bounty_wizard::form::{BountyType, Choice, Currency, DominantCore, FormState, Mode, Sdg};
use bounty_wizard::logging;

#[derive(Parser)]
#[command(name = "bounty-wizard")]
#[command(about = "Step-by-step wizard for creating bounties")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Pre-fill the wizard from a draft file
    #[arg(long)]
    draft: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every step of a draft file
    Check {
        /// Draft JSON file
        draft: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compile a draft into a bounty payload
    Compile {
        /// Draft JSON file
        draft: PathBuf,

        /// Write the payload here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Compile even when steps are invalid
        #[arg(long)]
        force: bool,
    },

    /// List the values accepted by choice fields
    Options,

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let config = Config::load(cli.config.as_deref())?;

    // Determine if we're running in TUI mode (no subcommand)
    let is_tui_mode = cli.command.is_none();

    // Initialize logging (file-based for TUI, stderr for CLI)
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Check { draft, json }) => {
            cmd_check(&draft, json)?;
        }
        Some(Commands::Compile {
            draft,
            output,
            force,
        }) => {
            cmd_compile(&draft, output, force)?;
        }
        Some(Commands::Options) => {
            cmd_options();
        }
        Some(Commands::Config) => {
            print!("{}", config.to_toml()?);
        }
        None => {
            run_tui(config, cli.draft, logging_handle.log_file_path)?;
        }
    }

    Ok(())
}

fn run_tui(config: Config, draft: Option<PathBuf>, log_file_path: Option<PathBuf>) -> Result<()> {
    let state = match draft {
        Some(path) => draft::load(&path)?,
        None => FormState::default(),
    };

    let mut app = App::with_state(config, state);
    let result = app.run();

    // Print log file path on exit if logs were written
    if let Some(log_path) = log_file_path {
        if let Ok(metadata) = log_path.metadata() {
            if metadata.len() > 0 {
                eprintln!("Session log: {}", log_path.display());
            }
        }
    }

    result
}

fn cmd_check(path: &Path, json: bool) -> Result<()> {
    let state = draft::load(path)?;
    let reports = draft::check(&state);

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        println!("Draft: {}", path.display());
        println!("{}", "─".repeat(60));
        for report in &reports {
            let status = if report.result.is_valid() {
                "ok"
            } else {
                "invalid"
            };
            let gate = if report.reachable { "" } else { " (locked)" };
            println!(
                "Step {} {:<20} {}{}",
                report.step.number(),
                report.step.title(),
                status,
                gate
            );
            for (field, error) in &report.result.errors {
                println!("    {}: {}", field, error);
            }
        }
    }

    if reports.iter().any(|report| !report.result.is_valid()) {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_compile(path: &Path, output: Option<PathBuf>, force: bool) -> Result<()> {
    let state = draft::load(path)?;
    let payload = draft::compile_draft(&state, force)?;
    let json = payload.to_pretty_json()?;

    match output {
        Some(out) => {
            std::fs::write(&out, format!("{}\n", json))
                .with_context(|| format!("Failed to write {}", out.display()))?;
            let summary = payload.summary();
            eprintln!(
                "Wrote {} ({} winner(s), {} {}, {} SDG(s))",
                out.display(),
                summary.winners,
                summary.amount,
                summary.currency,
                summary.sdg_count
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn print_choices<T: Choice>(name: &str) {
    println!("{}:", name);
    for choice in T::all() {
        if choice.label() == choice.as_str() {
            println!("  {}", choice.as_str());
        } else {
            println!("  {:<8} {}", choice.as_str(), choice.label());
        }
    }
    println!();
}

fn cmd_options() {
    print_choices::<BountyType>("type");
    print_choices::<DominantCore>("dominant_core");
    print_choices::<Mode>("mode");
    print_choices::<Currency>("currency");
    print_choices::<Sdg>("sdgs");
}
