use crate::scrapers::RetryPolicy;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_TARGETS: &str = "novska,jarun,samobor";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderBackend {
    Chrome,
    Http,
}

/// Sender identity, credential and recipients for the digest mail
#[derive(Debug, Clone, PartialEq)]
pub struct MailConfig {
    pub username: String,
    pub password: String,
    pub recipients: Vec<String>,
    pub smtp_host: String,
    pub smtp_port: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub mail: MailConfig,
    pub targets: Vec<String>,
    pub output_dir: PathBuf,
    pub backend: RenderBackend,
    pub retry: RetryPolicy,
    pub nav_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let username = require("EMAIL_USERNAME")?;
        let password = require("EMAIL_PASSWORD")?;
        let recipients = split_list(&require("EMAIL_RECIPIENTS")?);
        if recipients.is_empty() {
            return Err(ConfigError::Missing("EMAIL_RECIPIENTS"));
        }

        let mail = MailConfig {
            username,
            password,
            recipients,
            smtp_host: get("SMTP_HOST").unwrap_or_else(|| "smtp.gmail.com".to_string()),
            smtp_port: parse_or("SMTP_PORT", get("SMTP_PORT"), 465)?,
        };

        let targets = split_list(&get("DIGEST_TARGETS").unwrap_or_else(|| DEFAULT_TARGETS.to_string()));

        let backend = match get("RENDER_BACKEND").as_deref() {
            None | Some("chrome") => RenderBackend::Chrome,
            Some("http") => RenderBackend::Http,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "RENDER_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        let retry = RetryPolicy {
            attempts: parse_or("NAV_ATTEMPTS", get("NAV_ATTEMPTS"), 3)?,
            backoff: Duration::from_millis(parse_or("NAV_BACKOFF_MS", get("NAV_BACKOFF_MS"), 2000)?),
        };

        Ok(Self {
            mail,
            targets,
            output_dir: PathBuf::from(get("DIGEST_OUTPUT_DIR").unwrap_or_else(|| "output".to_string())),
            backend,
            retry,
            nav_timeout: Duration::from_secs(parse_or("NAV_TIMEOUT_SECS", get("NAV_TIMEOUT_SECS"), 30)?),
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { name, value }),
    }
}
