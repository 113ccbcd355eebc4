pub mod app;
pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod forms;
pub mod queue;
pub mod review;
pub mod taxonomy;
pub mod test_utils;

pub use error::{Result, SkpError};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
