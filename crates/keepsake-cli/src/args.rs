use crate::types::{LogLevel, OutputFormat, QuizVariant};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "keepsake")]
#[command(about = "Record, inspect and clear the keepsake page interaction log", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory (defaults to $KEEPSAKE_PATH, then the platform data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a scripted page visit into the store
    Simulate {
        /// Quiz answers in question order, e.g. "ADDDD" (defaults to the answer key)
        #[arg(long)]
        answers: Option<String>,

        #[arg(long, default_value = "ten")]
        quiz: QuizVariant,

        /// Number of carousel slides
        #[arg(long, default_value = "4")]
        slides: usize,

        /// Write the final snapshot at the end of the visit (default)
        #[arg(long, overrides_with = "no_finalize")]
        finalize: bool,

        /// Leave the visit open, without a final snapshot
        #[arg(long, overrides_with = "finalize")]
        no_finalize: bool,
    },

    /// Show the current, stored and final analytics
    Inspect {
        /// Number of most recent events listed in plain output
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Per-event-kind counts of the stored log
    Stats,

    /// Remove every analytics key from the store
    Clear,

    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Write a default config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}
