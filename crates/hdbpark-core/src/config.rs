use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_AVAILABILITY_URL: &str =
    "https://api.data.gov.sg/v1/transport/carpark-availability";
pub const DEFAULT_REFERENCE_PATH: &str = "./datasets/HDBCarparkInformation.csv";
pub const DEFAULT_USER_AGENT: &str = "hdbpark/0.1 (carpark-lookup)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can use a plain
/// `HashMap` lookup instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("HDBPARK_ENV", "development"))?;
    let log_level = or_default("HDBPARK_LOG_LEVEL", "warn");
    let reference_path = PathBuf::from(or_default("HDBPARK_REFERENCE_PATH", DEFAULT_REFERENCE_PATH));

    let availability_url = or_default("HDBPARK_AVAILABILITY_URL", DEFAULT_AVAILABILITY_URL);
    if !availability_url.starts_with("http://") && !availability_url.starts_with("https://") {
        return Err(ConfigError::InvalidEnvVar {
            var: "HDBPARK_AVAILABILITY_URL".to_string(),
            reason: format!("expected an http(s) URL, got '{availability_url}'"),
        });
    }

    let request_timeout_secs = parse_u64("HDBPARK_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "HDBPARK_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }
    let user_agent = or_default("HDBPARK_USER_AGENT", DEFAULT_USER_AGENT);

    Ok(AppConfig {
        env,
        log_level,
        reference_path,
        availability_url,
        request_timeout_secs,
        user_agent,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "HDBPARK_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;
    use std::path::Path;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn parse_environment_known_values() {
        assert_eq!(
            parse_environment("development").unwrap(),
            Environment::Development
        );
        assert_eq!(parse_environment("test").unwrap(), Environment::Test);
        assert_eq!(
            parse_environment("production").unwrap(),
            Environment::Production
        );
    }

    #[test]
    fn parse_environment_unknown_fails() {
        let err = parse_environment("staging").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "HDBPARK_ENV"));
    }

    #[test]
    fn build_app_config_defaults_from_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.log_level, "warn");
        assert_eq!(cfg.reference_path, Path::new(DEFAULT_REFERENCE_PATH));
        assert_eq!(cfg.availability_url, DEFAULT_AVAILABILITY_URL);
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn build_app_config_applies_overrides() {
        let mut map = HashMap::new();
        map.insert("HDBPARK_ENV", "production");
        map.insert("HDBPARK_REFERENCE_PATH", "/data/carparks.csv");
        map.insert("HDBPARK_AVAILABILITY_URL", "http://localhost:8080/feed");
        map.insert("HDBPARK_REQUEST_TIMEOUT_SECS", "5");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.env, Environment::Production);
        assert_eq!(cfg.reference_path, Path::new("/data/carparks.csv"));
        assert_eq!(cfg.availability_url, "http://localhost:8080/feed");
        assert_eq!(cfg.request_timeout_secs, 5);
    }

    #[test]
    fn build_app_config_rejects_non_numeric_timeout() {
        let mut map = HashMap::new();
        map.insert("HDBPARK_REQUEST_TIMEOUT_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "HDBPARK_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(HDBPARK_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_zero_timeout() {
        let mut map = HashMap::new();
        map.insert("HDBPARK_REQUEST_TIMEOUT_SECS", "0");
        assert!(build_app_config(lookup_from_map(&map)).is_err());
    }

    #[test]
    fn build_app_config_rejects_non_http_feed_url() {
        let mut map = HashMap::new();
        map.insert("HDBPARK_AVAILABILITY_URL", "ftp://example.com/feed");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "HDBPARK_AVAILABILITY_URL"),
            "expected InvalidEnvVar(HDBPARK_AVAILABILITY_URL), got: {result:?}"
        );
    }
}
