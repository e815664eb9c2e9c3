use clap::Parser;
use dirsort::cli::{OrganizeCommand, OutputMode, run_cli_with_config};
use dirsort::output::OutputFormatter;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Organize files by their extensions into categorized folders.
#[derive(Parser, Debug)]
#[command(
    name = "dirsort",
    version,
    about,
    after_help = "Examples:\n  \
        dirsort /path/to/directory              Organize files in directory\n  \
        dirsort . --dry-run                     Preview what would be organized\n  \
        dirsort ~/Downloads --create-folders    Create folders without moving files"
)]
struct Args {
    /// Directory path to organize
    directory: PathBuf,

    /// Show what would be moved without actually moving files
    #[arg(long)]
    dry_run: bool,

    /// Create category folders without moving files (takes precedence over --dry-run)
    #[arg(long)]
    create_folders: bool,

    /// Filter configuration file (defaults to .dirsortrc.toml or ~/.config/dirsort/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the summary as JSON instead of progress lines
    #[arg(long)]
    json: bool,

    /// Log every decision to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn command(&self) -> OrganizeCommand {
        if self.create_folders {
            OrganizeCommand::CreateFolders
        } else {
            OrganizeCommand::Organize {
                dry_run: self.dry_run,
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("dirsort=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let command = args.command();
    let output = if args.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match run_cli_with_config(command, &args.directory, args.config.as_deref(), output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            OutputFormatter::error(&format!("Error: {}", e));
            ExitCode::FAILURE
        }
    }
}
