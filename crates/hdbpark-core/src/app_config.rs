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

/// Runtime settings for the carpark lookup tools.
///
/// Every field has a default, so an empty environment is a valid
/// configuration pointing at the public data.gov.sg feed.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Local copy of the HDB carpark information CSV.
    pub reference_path: PathBuf,
    /// Endpoint of the live carpark availability feed.
    pub availability_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}
