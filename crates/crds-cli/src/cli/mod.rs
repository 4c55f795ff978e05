mod commands;
mod helpers;

use clap::Parser;
use crds_core::domain::CrdsError;
use tracing_subscriber::EnvFilter;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().collect();

    match parse_and_dispatch(args) {
        Ok(code) => code,
        Err(error) => {
            let crds_error = error.as_crds_error();
            eprintln!("{}", crds_error.diagnostic_line());
            if let Some(summary_line) = crds_error.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            crds_error.exit_code()
        }
    }
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            init_tracing(cli.verbose);
            dispatch_parsed(cli.command)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

/// `RUST_LOG` wins over `-v`; without either only warnings reach stderr.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Parser)]
#[command(
    name = "crds-sim",
    version,
    about = "CRDS absorption spectrum synthesis from molecular line lists"
)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Run a JSON scenario (one or more species) and report the spectrum
    Synthesize(commands::SynthesizeArgs),
    /// Synthesize the spectrum of a single line given on the command line
    Line(commands::LineArgs),
    /// List the built-in species molar-mass table
    Species,
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Synthesize(args) => commands::run_synthesize_command(args),
        CliCommand::Line(args) => commands::run_line_command(args),
        CliCommand::Species => commands::run_species_command(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(CrdsError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_crds_error(&self) -> CrdsError {
        match self {
            Self::Usage(message) => CrdsError::input_validation("INPUT.CLI_USAGE", message.clone()),
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => CrdsError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}
