use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, str::FromStr, time::Duration};
use url::Url;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    #[serde(default = "default_backend_timeout")]
    pub backend_timeout_secs: u64,

    #[serde(default = "default_session_max_age")]
    pub session_max_age_hours: i64,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Egresados-Admin".to_string()
}
fn default_port() -> u16 {
    4321
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_backend_url() -> String {
    "http://localhost:8080".to_string()
}
fn default_backend_timeout() -> u64 {
    10
}
fn default_session_max_age() -> i64 {
    24
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins")
                    .ignore_empty(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if let Err(e) = self.backend_base_url() {
            errors.push(format!("BACKEND_URL is invalid: {}", e));
        }
        if self.backend_timeout_secs == 0 {
            errors.push("BACKEND_TIMEOUT_SECS must be greater than 0".to_string());
        }
        if self.session_max_age_hours <= 0 {
            errors.push("SESSION_MAX_AGE_HOURS must be greater than 0".to_string());
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    /// Cookies are only sent over plain HTTP while developing locally.
    pub fn secure_cookies(&self) -> bool {
        self.env != AppEnvironment::Development
    }

    pub fn backend_base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.backend_url)
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_secs)
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            env: AppEnvironment::Testing,
            name: "test".into(),
            port: 0,
            host: "127.0.0.1".into(),
            worker_count: 1,
            backend_url: default_backend_url(),
            backend_timeout_secs: 5,
            session_max_age_hours: 24,
            cors_allowed_origins: vec!["*".into()],
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn rejects_bad_backend_url_and_zero_timeout() {
        let cfg = AppConfig {
            backend_url: "not a url".into(),
            backend_timeout_secs: 0,
            ..config()
        };
        let err = cfg.validate().unwrap_err().to_string();
        assert!(err.contains("BACKEND_URL"));
        assert!(err.contains("BACKEND_TIMEOUT_SECS"));
    }

    #[test]
    fn wildcard_cors_is_refused_in_production() {
        let cfg = AppConfig { env: AppEnvironment::Production, ..config() };
        assert!(cfg.validate().is_err());
        assert!(cfg.secure_cookies());
    }

    #[test]
    fn development_allows_insecure_cookies() {
        let cfg = AppConfig { env: AppEnvironment::Development, ..config() };
        assert!(!cfg.secure_cookies());
    }

    #[test]
    fn cors_origins_split_on_commas() {
        let cfg = AppConfig {
            cors_allowed_origins: vec!["http://a.test, http://b.test".into()],
            ..config()
        };
        assert_eq!(cfg.cors_origins(), vec!["http://a.test", "http://b.test"]);
    }
}
