mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "scorecard",
    version,
    about = "Extract and analyze dealership service scorecard PDFs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a metrics snapshot from a scorecard PDF
    Extract {
        /// Path to the scorecard PDF
        input_file: PathBuf,

        /// Custom JSON extraction config file
        #[arg(short, long = "config", value_name = "FILE")]
        config: Option<PathBuf>,

        /// Predefined config (default: wichita)
        #[arg(short, long, default_value = "wichita")]
        preset: String,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the snapshot to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Replace the current snapshot in this store file
        #[arg(long, value_name = "FILE")]
        store: Option<PathBuf>,
    },
    /// Analyze the trend of one metric at one location across a history file
    Trend {
        /// Path to a JSON history file (array of stored snapshots)
        history: PathBuf,

        /// Location id (e.g. "wichita")
        location: String,

        /// Metric key (e.g. "ttActivation")
        metric: String,

        /// Custom JSON extraction config file
        #[arg(short, long = "config", value_name = "FILE")]
        config: Option<PathBuf>,

        /// Predefined config (default: wichita)
        #[arg(short, long, default_value = "wichita")]
        preset: String,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Compare trends across all configured locations
    Compare {
        /// Path to a JSON history file (array of stored snapshots)
        history: PathBuf,

        /// Custom JSON extraction config file
        #[arg(short, long = "config", value_name = "FILE")]
        config: Option<PathBuf>,

        /// Predefined config (default: wichita)
        #[arg(short, long, default_value = "wichita")]
        preset: String,

        /// Metric key(s) to compare (default: all)
        #[arg(short, long = "metric", value_name = "KEY")]
        metric: Vec<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Manage and inspect extraction configs
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// List predefined configs
    List,
    /// Print an annotated example config
    Schema,
    /// Validate a custom config file
    Validate {
        /// Path to JSON config file
        file: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input_file,
            config,
            preset,
            output,
            out,
            store,
        } => commands::extract::run(input_file, config, &preset, &output, out, store),
        Commands::Trend {
            history,
            location,
            metric,
            config,
            preset,
            output,
        } => commands::trend::run(history, config, &preset, &location, &metric, &output),
        Commands::Compare {
            history,
            config,
            preset,
            metric,
            output,
        } => commands::compare::run(history, config, &preset, metric, &output),
        Commands::Config { action } => match action {
            ConfigAction::List => commands::config::list(),
            ConfigAction::Schema => commands::config::schema(),
            ConfigAction::Validate { file } => commands::config::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
