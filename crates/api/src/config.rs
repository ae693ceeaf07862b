//! Process configuration, read once from the environment at startup.

use std::net::SocketAddr;

use thiserror::Error;

use bookshelf_observability::LogFormat;
use bookshelf_resolvers::BookOwnershipCheck;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:9000";
pub const DEFAULT_TOKEN_SECRET: &str = "secret";
/// Upper bound for `TOKEN_TTL_SECS` (ten years).
pub const MAX_TOKEN_TTL_SECS: i64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid {var}='{value}': {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

impl ConfigError {
    fn new(var: &'static str, value: &str, reason: impl ToString) -> Self {
        Self {
            var,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub token_secret: String,
    /// `None` issues tokens without expiry.
    pub token_ttl: Option<chrono::Duration>,
    pub ownership_check: BookOwnershipCheck,
    pub log_format: LogFormat,
    default_secret: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 9000)),
            token_secret: DEFAULT_TOKEN_SECRET.to_string(),
            token_ttl: None,
            ownership_check: BookOwnershipCheck::default(),
            log_format: LogFormat::default(),
            default_secret: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("BIND_ADDR") {
            config.bind_addr = value
                .parse()
                .map_err(|e| ConfigError::new("BIND_ADDR", &value, e))?;
        }

        if let Some(value) = lookup("TOKEN_SECRET") {
            if value.is_empty() {
                return Err(ConfigError::new("TOKEN_SECRET", &value, "must not be empty"));
            }
            config.token_secret = value;
            config.default_secret = false;
        }

        if let Some(value) = lookup("TOKEN_TTL_SECS") {
            let secs: i64 = value
                .parse()
                .map_err(|e| ConfigError::new("TOKEN_TTL_SECS", &value, e))?;
            if secs <= 0 {
                return Err(ConfigError::new("TOKEN_TTL_SECS", &value, "must be positive"));
            }
            if secs > MAX_TOKEN_TTL_SECS {
                return Err(ConfigError::new(
                    "TOKEN_TTL_SECS",
                    &value,
                    format!("must be at most {MAX_TOKEN_TTL_SECS}"),
                ));
            }
            let ttl = chrono::Duration::try_seconds(secs)
                .ok_or_else(|| ConfigError::new("TOKEN_TTL_SECS", &value, "out of range"))?;
            config.token_ttl = Some(ttl);
        }

        if let Some(value) = lookup("BOOK_OWNERSHIP_CHECK") {
            config.ownership_check = match value.trim() {
                "book_author" => BookOwnershipCheck::BookAuthor,
                "literal_book_id" => BookOwnershipCheck::LiteralBookId,
                _ => {
                    return Err(ConfigError::new(
                        "BOOK_OWNERSHIP_CHECK",
                        &value,
                        "expected 'book_author' or 'literal_book_id'",
                    ));
                }
            };
        }

        if let Some(value) = lookup("LOG_FORMAT") {
            config.log_format = value
                .parse()
                .map_err(|e| ConfigError::new("LOG_FORMAT", &value, e))?;
        }

        Ok(config)
    }

    pub fn uses_default_secret(&self) -> bool {
        self.default_secret
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = from_pairs(&[]).unwrap();

        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.token_secret, DEFAULT_TOKEN_SECRET);
        assert!(config.uses_default_secret());
        assert_eq!(config.token_ttl, None);
        assert_eq!(config.ownership_check, BookOwnershipCheck::BookAuthor);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn values_are_read() {
        let config = from_pairs(&[
            ("BIND_ADDR", "127.0.0.1:8081"),
            ("TOKEN_SECRET", "s3cr3t"),
            ("TOKEN_TTL_SECS", "60"),
            ("BOOK_OWNERSHIP_CHECK", "literal_book_id"),
            ("LOG_FORMAT", "pretty"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8081);
        assert_eq!(config.token_secret, "s3cr3t");
        assert!(!config.uses_default_secret());
        assert_eq!(config.token_ttl, Some(chrono::Duration::seconds(60)));
        assert_eq!(config.ownership_check, BookOwnershipCheck::LiteralBookId);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn ttl_upper_bound_is_accepted() {
        let max = MAX_TOKEN_TTL_SECS.to_string();
        let config = from_pairs(&[("TOKEN_TTL_SECS", max.as_str())]).unwrap();
        assert_eq!(config.token_ttl, Some(chrono::Duration::seconds(MAX_TOKEN_TTL_SECS)));

        let over = (MAX_TOKEN_TTL_SECS + 1).to_string();
        let err = from_pairs(&[("TOKEN_TTL_SECS", over.as_str())]).unwrap_err();
        assert_eq!(err.var, "TOKEN_TTL_SECS");
    }

    #[test]
    fn invalid_values_name_the_variable() {
        for (var, value) in [
            ("BIND_ADDR", "nowhere"),
            ("TOKEN_SECRET", ""),
            ("TOKEN_TTL_SECS", "-5"),
            ("TOKEN_TTL_SECS", "soon"),
            ("TOKEN_TTL_SECS", "9223372036854775807"),
            ("TOKEN_TTL_SECS", "10000000000000"),
            ("BOOK_OWNERSHIP_CHECK", "trust_me"),
            ("LOG_FORMAT", "xml"),
        ] {
            let err = from_pairs(&[(var, value)]).unwrap_err();
            assert_eq!(err.var, var);
            assert!(err.to_string().contains(var));
        }
    }
}
