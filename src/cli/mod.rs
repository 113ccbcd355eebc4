//! CLI module - Command-line interface definitions and handlers
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use output::OutputFormat;

pub mod commands;
pub mod output;

/// Skills profile - queue drafts, browse the skill taxonomy, review team submissions
#[derive(Parser, Debug)]
#[command(name = "skp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (human, json, jsonl, plain)
    #[arg(long, short = 'O', global = true, value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Enable machine-readable JSON output (shorthand for --output-format=json)
    #[arg(long, short = 'm', global = true)]
    pub machine: bool,

    /// Force plain output (no colors)
    #[arg(long, global = true)]
    pub plain: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file path (default: ~/.config/skp/config.toml)
    #[arg(long, global = true, env = "SKP_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Effective output format from flags alone.
    ///
    /// Priority order:
    /// 1. `--plain`
    /// 2. `--output-format`
    /// 3. `--machine`
    /// 4. Default → Human
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.explicit_format().unwrap_or_default()
    }

    /// Like [`Cli::output_format`], but falls back to the configured
    /// `output.format` when no flag was given.
    #[must_use]
    pub fn output_format_with(&self, configured: &str) -> OutputFormat {
        self.explicit_format()
            .unwrap_or_else(|| OutputFormat::from_config(configured))
    }

    fn explicit_format(&self) -> Option<OutputFormat> {
        if self.plain {
            return Some(OutputFormat::Plain);
        }
        if let Some(fmt) = self.output_format {
            return Some(fmt);
        }
        self.machine.then_some(OutputFormat::Json)
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse the skill taxonomy (platform > segment > portfolio > specialty)
    Taxonomy(commands::taxonomy::TaxonomyArgs),

    /// Show the identity behind the configured session
    Whoami(commands::whoami::WhoamiArgs),

    /// Queue every draft in a file and submit them in one batch
    Submit(commands::submit::SubmitArgs),

    /// Interactive pending-forms session
    Session(commands::session::SessionArgs),

    /// List the records you submitted and their review status
    Mine(commands::mine::MineArgs),

    /// Review pending submissions of your reportees
    Review(commands::review::ReviewArgs),

    /// Inspect configuration
    Config(commands::config::ConfigArgs),
}
