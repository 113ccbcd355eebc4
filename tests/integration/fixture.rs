use std::path::{Path, PathBuf};

use assert_cmd::Command;
use httpmock::MockServer;
use skills_profile::backend::BackendClient;
use skills_profile::config::BackendConfig;
use tempfile::TempDir;

pub const COOKIE: &str = "sid=test-session";

/// Client pointed at the mock server with the test cookie.
pub fn client(server: &MockServer) -> BackendClient {
    BackendClient::new(&BackendConfig {
        base_url: server.base_url(),
        session_cookie: Some(COOKIE.to_string()),
        timeout_secs: Some(10),
    })
    .unwrap()
}

pub fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

/// Isolated working directory for `skp` runs.
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_path_buf();
        Self { temp_dir, root }
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// `skp` talking to `server`, ignoring any config on the machine.
    pub fn skp(&self, server: &MockServer) -> Command {
        let mut cmd = Command::cargo_bin("skp").unwrap();
        cmd.current_dir(self.path())
            .env("SKP_CONFIG", self.root.join("missing.toml"))
            .env("SKP_BACKEND_URL", server.base_url())
            .env("SKP_SESSION_COOKIE", COOKIE)
            .env_remove("SKP_USER_ID")
            .env_remove("SKP_MANAGER_ID")
            .env_remove("SKP_OUTPUT_FORMAT")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }
}
