//! Application context shared by every command.

use std::path::PathBuf;

use tokio::runtime::Runtime;

use crate::backend::BackendClient;
use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::{Result, SkpError};

pub struct AppContext {
    pub config: Config,
    pub project_root: PathBuf,
    pub output_format: OutputFormat,
    pub backend: BackendClient,
    runtime: Runtime,
}

impl AppContext {
    /// Load the layered config for the current directory, unvalidated.
    pub fn load_config(cli: &Cli) -> Result<(Config, PathBuf)> {
        let project_root = std::env::current_dir()?;
        let config = Config::load(cli.config.as_deref(), &project_root)?;
        Ok((config, project_root))
    }

    pub fn new(config: Config, project_root: PathBuf, output_format: OutputFormat) -> Result<Self> {
        config.validate()?;
        let backend = BackendClient::new(&config.backend)?;
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|err| SkpError::Runtime(format!("start async runtime: {err}")))?;

        Ok(Self {
            config,
            project_root,
            output_format,
            backend,
            runtime,
        })
    }

    /// Drive a future to completion on the context's runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    #[must_use]
    pub const fn is_machine(&self) -> bool {
        self.output_format.is_machine_readable()
    }
}
