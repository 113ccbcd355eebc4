use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SkpError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub review: ReviewConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    pub fn load(explicit_path: Option<&Path>, project_root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("SKP_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_project(project_root)? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Location of the per-user config file.
    pub fn global_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .ok_or_else(|| SkpError::MissingConfig("config directory not found".to_string()))?
            .join("skp/config.toml"))
    }

    /// Location of the project config file below `project_root`.
    #[must_use]
    pub fn project_path(project_root: &Path) -> PathBuf {
        project_root.join(".skp/config.toml")
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        Self::load_patch(&Self::global_path()?)
    }

    fn load_project(project_root: &Path) -> Result<Option<ConfigPatch>> {
        Self::load_patch(&Self::project_path(project_root))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| SkpError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| SkpError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.backend {
            self.backend.merge(patch);
        }
        if let Some(patch) = patch.identity {
            self.identity.merge(patch);
        }
        if let Some(patch) = patch.review {
            self.review.merge(patch);
        }
        if let Some(patch) = patch.output {
            self.output.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_env_overrides_with(&|key: &str| std::env::var(key).ok())
    }

    /// Apply `SKP_*` overrides read through `env`.
    pub fn apply_env_overrides_with(&mut self, env: &dyn Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(value) = env("SKP_BACKEND_URL") {
            self.backend.base_url = value;
        }
        if let Some(value) = env("SKP_SESSION_COOKIE") {
            self.backend.session_cookie = Some(value);
        }
        if let Some(value) = env_u64(env, "SKP_TIMEOUT_SECS")? {
            self.backend.timeout_secs = Some(value);
        }

        if let Some(value) = env("SKP_USER_ID") {
            self.identity.user_id = Some(value);
        }
        if let Some(value) = env("SKP_MANAGER_ID") {
            self.identity.manager_id = Some(value);
        }

        if let Some(value) = env_bool(env, "SKP_REVIEW_INCLUDE_EMINENCE") {
            self.review.include_eminence = value;
        }

        if let Some(value) = env("SKP_OUTPUT_FORMAT") {
            self.output.format = value;
        }

        Ok(())
    }

    /// Reject configurations the backend client cannot work with.
    pub fn validate(&self) -> Result<()> {
        let url = self.backend.base_url.trim();
        if url.is_empty() {
            return Err(SkpError::MissingConfig("backend.base_url".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(SkpError::Config(format!(
                "backend.base_url must start with http:// or https://, got {url}"
            )));
        }
        if self.backend.timeout_secs == Some(0) {
            return Err(SkpError::Config(
                "backend.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub base_url: String,
    /// Raw `Cookie` header value forwarded on every request.
    #[serde(default)]
    pub session_cookie: Option<String>,
    /// Unset means the HTTP client's default request lifecycle.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            session_cookie: None,
            timeout_secs: None,
        }
    }
}

impl BackendConfig {
    fn merge(&mut self, patch: BackendPatch) {
        if let Some(value) = patch.base_url {
            self.base_url = value;
        }
        if let Some(value) = patch.session_cookie {
            self.session_cookie = Some(value);
        }
        if let Some(value) = patch.timeout_secs {
            self.timeout_secs = Some(value);
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Overrides the user id reported by the session endpoint.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Manager to tag submissions with.
    #[serde(default)]
    pub manager_id: Option<String>,
}

impl IdentityConfig {
    fn merge(&mut self, patch: IdentityPatch) {
        if let Some(value) = patch.user_id {
            self.user_id = Some(value);
        }
        if let Some(value) = patch.manager_id {
            self.manager_id = Some(value);
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewConfig {
    #[serde(default)]
    pub include_eminence: bool,
}

impl ReviewConfig {
    fn merge(&mut self, patch: ReviewPatch) {
        if let Some(value) = patch.include_eminence {
            self.include_eminence = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
        }
    }
}

impl OutputConfig {
    fn merge(&mut self, patch: OutputPatch) {
        if let Some(value) = patch.format {
            self.format = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub backend: Option<BackendPatch>,
    pub identity: Option<IdentityPatch>,
    pub review: Option<ReviewPatch>,
    pub output: Option<OutputPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct BackendPatch {
    pub base_url: Option<String>,
    pub session_cookie: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct IdentityPatch {
    pub user_id: Option<String>,
    pub manager_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ReviewPatch {
    pub include_eminence: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct OutputPatch {
    pub format: Option<String>,
}

fn env_bool(env: &dyn Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    env(key).map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

fn env_u64(env: &dyn Fn(&str) -> Option<String>, key: &str) -> Result<Option<u64>> {
    match env(key) {
        Some(value) => value
            .parse::<u64>()
            .map(Some)
            .map_err(|err| SkpError::Config(format!("invalid {key} value {value}: {err}"))),
        None => Ok(None),
    }
}
