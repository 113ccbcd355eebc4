//! skp config - Inspect configuration

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{self, HumanLayout};
use crate::config::Config;
use crate::error::{Result, SkpError};

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration (session cookie masked)
    Show,
    /// Print the config file locations that are consulted
    Path,
}

#[derive(Serialize)]
struct ConfigPaths {
    global: Option<String>,
    project: String,
}

pub fn run(ctx: &AppContext, args: &ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Path => paths(ctx),
    }
}

fn show(ctx: &AppContext) -> Result<()> {
    let config = masked(&ctx.config);
    if ctx.is_machine() {
        return output::emit_robot(&output::robot_ok(&config), ctx.output_format);
    }

    let rendered = toml::to_string_pretty(&config)
        .map_err(|err| SkpError::Config(format!("render config: {err}")))?;
    println!("{rendered}");
    Ok(())
}

fn paths(ctx: &AppContext) -> Result<()> {
    let paths = ConfigPaths {
        global: Config::global_path()
            .ok()
            .map(|path| path.display().to_string()),
        project: Config::project_path(&ctx.project_root)
            .display()
            .to_string(),
    };
    if ctx.is_machine() {
        return output::emit_robot(&output::robot_ok(&paths), ctx.output_format);
    }

    let mut layout = HumanLayout::for_format(ctx.output_format);
    layout
        .kv("Global", paths.global.as_deref().unwrap_or("-"))
        .kv("Project", &paths.project);
    output::emit_human(layout);
    Ok(())
}

fn masked(config: &Config) -> Config {
    let mut config = config.clone();
    if config.backend.session_cookie.is_some() {
        config.backend.session_cookie = Some("********".to_string());
    }
    config
}
