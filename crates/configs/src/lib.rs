use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io { path: String, source: std::io::Error },
    #[error("cannot parse config file {path}: {source}")]
    Parse { path: String, source: toml::de::Error },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub app: AppInfoConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: None }
    }
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { 3000 }

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    /// Upper bound on a single store call made while serving a request.
    #[serde(default = "default_statement_timeout")]
    pub statement_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            statement_timeout_secs: default_statement_timeout(),
            sqlx_logging: false,
            run_migrations: default_run_migrations(),
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_statement_timeout() -> u64 { 5 }
fn default_run_migrations() -> bool { true }

/// Deployment facts reported by the health endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AppInfoConfig {
    #[serde(default = "default_env")]
    pub env: String,
}

impl Default for AppInfoConfig {
    fn default() -> Self { Self { env: default_env() } }
}

fn default_env() -> String { "development".into() }

/// Load `CONFIG_PATH` (or `config.toml`). A missing file yields defaults.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if !std::path::Path::new(&path).exists() {
        return Ok(AppConfig::default());
    }
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.to_string(), source })?;
    parse(path, &content)
}

fn parse(path: &str, content: &str) -> Result<AppConfig> {
    toml::from_str(content).map_err(|source| ConfigError::Parse { path: path.to_string(), source })
}

impl AppConfig {
    /// File (if any) + process environment, normalized and validated.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate_with(|key| std::env::var(key).ok())?;
        Ok(cfg)
    }

    /// Apply environment overrides through `lookup`, then validate.
    pub fn normalize_and_validate_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.server.apply_env(&lookup);
        self.server.normalize()?;
        self.database.apply_env(&lookup);
        self.database.validate()?;
        if let Some(env) = lookup("APP_ENV").filter(|v| !v.trim().is_empty()) {
            self.app.env = env;
        }
        Ok(())
    }
}

impl ServerConfig {
    fn apply_env<F: Fn(&str) -> Option<String>>(&mut self, lookup: &F) {
        if let Some(host) = lookup("SERVER_HOST").filter(|h| !h.trim().is_empty()) {
            self.host = host;
        }
        // PORT is what hosting platforms inject; SERVER_PORT is the local override.
        let port = [lookup("PORT"), lookup("SERVER_PORT")]
            .into_iter()
            .flatten()
            .find_map(|p| p.trim().parse::<u16>().ok());
        if let Some(p) = port {
            self.port = p;
        }
        if let Some(w) = lookup("TOKIO_WORKER_THREADS").and_then(|v| v.trim().parse::<usize>().ok()) {
            self.worker_threads = Some(w);
        }
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(ConfigError::Invalid("server.port must be in 1..=65535".into()));
        }
        if self.worker_threads == Some(0) {
            self.worker_threads = None;
        }
        Ok(())
    }

    /// Runtime worker threads once `TOKIO_WORKER_THREADS` is applied.
    /// `None` (including a configured 0) leaves the choice to Tokio.
    pub fn effective_worker_threads<F>(&self, lookup: F) -> Option<usize>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut resolved = self.clone();
        resolved.apply_env(&lookup);
        resolved.worker_threads.filter(|w| *w > 0)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    fn apply_env<F: Fn(&str) -> Option<String>>(&mut self, lookup: &F) {
        if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.trim().is_empty()) {
            self.url = url;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "DATABASE_URL is not set; provide it in the environment or database.url in config.toml".into(),
            ));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(ConfigError::Invalid("database.url must start with postgresql:// or postgres://".into()));
        }
        if self.min_connections == 0 {
            return Err(ConfigError::Invalid("database.min_connections must be >= 1".into()));
        }
        if self.max_connections < self.min_connections {
            return Err(ConfigError::Invalid("database.max_connections must be >= min_connections".into()));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 || self.statement_timeout_secs == 0 {
            return Err(ConfigError::Invalid("database timeouts must be positive seconds".into()));
        }
        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration { Duration::from_secs(self.connect_timeout_secs) }
    pub fn acquire_timeout(&self) -> Duration { Duration::from_secs(self.acquire_timeout_secs) }
    pub fn idle_timeout(&self) -> Duration { Duration::from_secs(self.idle_timeout_secs) }
    pub fn max_lifetime(&self) -> Duration { Duration::from_secs(self.max_lifetime_secs) }
    pub fn statement_timeout(&self) -> Duration { Duration::from_secs(self.statement_timeout_secs) }
}
