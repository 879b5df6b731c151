use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings shared by the server and the CLI.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Origin of the storefront being searched, e.g. `https://www.amazon.com`.
    /// Relative links in fetched documents are qualified against it.
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub accept_language: String,
    /// Optional YAML file overriding the built-in selector table.
    pub selectors_path: Option<PathBuf>,
}
