//! skp - Skills profile CLI
//!
//! Queue profile drafts, browse the skill taxonomy and review team submissions.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use skills_profile::Result;
use skills_profile::SkpError;
use skills_profile::app::AppContext;
use skills_profile::cli::output;
use skills_profile::cli::{Cli, OutputFormat};
use skills_profile::config::Config;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let loaded = AppContext::load_config(&cli);
    // Errors and logs follow `output.format` and SKP_OUTPUT_FORMAT, not only the flags.
    let format = match &loaded {
        Ok((config, _)) => cli.output_format_with(&config.output.format),
        Err(_) => cli.output_format_with(&std::env::var("SKP_OUTPUT_FORMAT").unwrap_or_default()),
    };
    init_tracing(&cli, format);

    match loaded.and_then(|(config, root)| run(&cli, config, root, format)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e, format);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: Config, project_root: PathBuf, format: OutputFormat) -> Result<()> {
    let ctx = AppContext::new(config, project_root, format)?;
    skills_profile::cli::commands::run(&ctx, &cli.command)
}

fn report_error(e: &SkpError, format: OutputFormat) {
    if !format.is_machine_readable() {
        eprintln!("Error: {e}");
        return;
    }
    // A partial submission already printed its own envelope.
    if matches!(e, SkpError::SubmissionIncomplete { .. }) {
        return;
    }
    let response = output::robot_error(e);
    if output::emit_robot(&response, format).is_err() {
        eprintln!("Error: {e}");
    }
}

fn init_tracing(cli: &Cli, format: OutputFormat) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,skills_profile=info",
        1 => "info,skills_profile=debug",
        2 => "debug,skills_profile=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if format.is_machine_readable() {
        // JSON logging for machine output
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
