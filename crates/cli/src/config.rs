//! Runtime configuration for the `flora` binary.
//!
//! Resolution chain: CLI flag > environment variable > default.

use anyhow::{Context, Result, bail};

use flora_observability::LogFormat;
use flora_plants::catalog::DEFAULT_CAPACITY;

pub const MAX_CAPACITY_ENV: &str = "FLORA_MAX_CAPACITY";
pub const LOG_FORMAT_ENV: &str = "FLORA_LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Capacity of the catalog files are loaded into.
    pub max_capacity: usize,
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Resolve against the process environment.
    pub fn resolve(max_capacity: Option<usize>, log_format: Option<LogFormat>) -> Result<Self> {
        Self::resolve_with(max_capacity, log_format, |key| std::env::var(key).ok())
    }

    fn resolve_with(
        max_capacity: Option<usize>,
        log_format: Option<LogFormat>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let max_capacity = match max_capacity {
            Some(n) => n,
            None => match env(MAX_CAPACITY_ENV) {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{MAX_CAPACITY_ENV}={raw:?} is not a number"))?,
                None => DEFAULT_CAPACITY,
            },
        };
        if max_capacity == 0 {
            bail!("max capacity must be at least 1");
        }

        let log_format = match log_format {
            Some(f) => f,
            None => match env(LOG_FORMAT_ENV) {
                Some(raw) => raw
                    .parse()
                    .with_context(|| format!("invalid {LOG_FORMAT_ENV}"))?,
                None => LogFormat::default(),
            },
        };

        Ok(Self {
            max_capacity,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_flags_or_env() {
        let config = CliConfig::resolve_with(None, None, env_of(&[])).unwrap();
        assert_eq!(config.max_capacity, DEFAULT_CAPACITY);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn env_overrides_default() {
        let env = env_of(&[(MAX_CAPACITY_ENV, " 25 "), (LOG_FORMAT_ENV, "json")]);
        let config = CliConfig::resolve_with(None, None, env).unwrap();
        assert_eq!(config.max_capacity, 25);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn flag_overrides_env() {
        let env = env_of(&[(MAX_CAPACITY_ENV, "25"), (LOG_FORMAT_ENV, "json")]);
        let config = CliConfig::resolve_with(Some(3), Some(LogFormat::Pretty), env).unwrap();
        assert_eq!(config.max_capacity, 3);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(CliConfig::resolve_with(Some(0), None, env_of(&[])).is_err());
        assert!(CliConfig::resolve_with(None, None, env_of(&[(MAX_CAPACITY_ENV, "many")])).is_err());
        assert!(CliConfig::resolve_with(None, None, env_of(&[(LOG_FORMAT_ENV, "xml")])).is_err());
    }
}
