use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use tracing::warn;

use asset_deps::logging::init_logging;
use asset_deps::template::{PresetAnswer, TemplateOutcome, TerminalPrompt, emit_template};

#[derive(Parser)]
#[command(
    name = "asset-deps",
    version,
    about = "Write JSON lists of the CSS/JS files referenced by controllers and views",
    long_about = "Scans controllers, views and asset bundle classes for the bundles they use, \
                  resolves those bundles to their CSS and JS files and writes the lists as JSON \
                  manifests for Grunt, Webpack and similar build tools.",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file; shorthand for `create-list <CONFIG_FILE>`
    #[arg(value_name = "CONFIG_FILE")]
    config_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the configured tasks and write their dependency manifests
    CreateList {
        /// Configuration file (JSON or YAML)
        #[arg(value_name = "CONFIG_FILE")]
        config_file: PathBuf,
    },
    /// Write a commented configuration skeleton
    Template {
        /// Where to write the skeleton
        #[arg(value_name = "OUTPUT_FILE")]
        output_file: PathBuf,
        /// Never prompt; use --overwrite to decide about existing files
        #[arg(long)]
        non_interactive: bool,
        /// Replace an existing file without asking
        #[arg(long)]
        overwrite: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match (cli.command, cli.config_file) {
        (Some(Commands::CreateList { config_file }), _) | (None, Some(config_file)) => {
            create_list(config_file)
        }
        (
            Some(Commands::Template {
                output_file,
                non_interactive,
                overwrite,
            }),
            _,
        ) => template(output_file, non_interactive, overwrite),
        (None, None) => Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "a configuration file or a subcommand is required",
            )
            .exit(),
    }
}

fn create_list(config_file: PathBuf) -> Result<()> {
    let summary = asset_deps::create_list(&config_file)
        .with_context(|| format!("create-list failed for {}", config_file.display()))?;

    let failed = summary.failed_writes();
    if failed > 0 {
        warn!("{failed} manifest file(s) could not be written");
    }
    Ok(())
}

fn template(output_file: PathBuf, non_interactive: bool, overwrite: bool) -> Result<()> {
    let outcome = if overwrite || non_interactive || !std::io::stdin().is_terminal() {
        emit_template(&output_file, &PresetAnswer(overwrite))?
    } else {
        emit_template(&output_file, &TerminalPrompt)?
    };

    if outcome == TemplateOutcome::Kept {
        warn!("Kept existing file '{}'.", output_file.display());
    }
    Ok(())
}
