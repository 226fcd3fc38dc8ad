use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use zipstitch::commands::merge;

#[derive(Parser)]
#[command(name = "zipstitch")]
#[command(about = "Merge split chapter text files inside ZIP archives", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge `_1_`/`_2_` chapter pairs in a ZIP archive
    Merge {
        /// Path to the input ZIP archive
        input: PathBuf,

        /// Output path (default: input with `.zip` replaced by `_merged.zip`)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Run the merge but do not write the output archive
        #[arg(long)]
        dry_run: bool,

        /// Print a JSON report instead of the action log
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Merge {
            input,
            output,
            dry_run,
            json,
        } => merge::execute(input, output, dry_run, json),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
            Ok(())
        }
    }
}
