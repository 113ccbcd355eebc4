//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - `run()` function to execute the command

use chrono::{NaiveDate, Utc};

use crate::app::AppContext;
use crate::cli::Commands;
use crate::error::Result;

pub mod config;
pub mod mine;
pub mod review;
pub mod session;
pub mod submit;
pub mod taxonomy;
pub mod whoami;

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Taxonomy(args) => taxonomy::run(ctx, args),
        Commands::Whoami(args) => whoami::run(ctx, args),
        Commands::Submit(args) => submit::run(ctx, args),
        Commands::Session(args) => session::run(ctx, args),
        Commands::Mine(args) => mine::run(ctx, args),
        Commands::Review(args) => review::run(ctx, args),
        Commands::Config(args) => config::run(ctx, args),
    }
}

/// UTC calendar date stamped on submissions.
pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}
