use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::bank::registry::BankSource;
use crate::bank::Industry;

/// Application configuration loaded from environment variables.
/// Startup fails if a variable is present but invalid.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory of `<industry>.json` banks; `None` uses the compiled-in banks.
    pub question_bank_dir: Option<PathBuf>,
    /// Bank used when a request names an unknown industry.
    pub fallback_industry: Industry,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            port: var("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .trim()
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            question_bank_dir: var("QUESTION_BANK_DIR").map(PathBuf::from),
            fallback_industry: var("FALLBACK_INDUSTRY")
                .unwrap_or_else(|| "other".to_string())
                .parse::<Industry>()
                .context("FALLBACK_INDUSTRY must name a known industry")?,
        })
    }

    pub fn bank_source(&self) -> BankSource {
        match &self.question_bank_dir {
            Some(dir) => BankSource::Directory(dir.clone()),
            None => BankSource::Embedded,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            question_bank_dir: None,
            fallback_industry: Industry::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.question_bank_dir, None);
        assert_eq!(config.fallback_industry, Industry::Other);
    }

    #[test]
    fn test_reads_every_variable() {
        let config = config_from(&[
            ("PORT", "3000"),
            ("RUST_LOG", "debug"),
            ("QUESTION_BANK_DIR", "/srv/banks"),
            ("FALLBACK_INDUSTRY", "services"),
        ])
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.rust_log, "debug");
        assert_eq!(config.question_bank_dir, Some(PathBuf::from("/srv/banks")));
        assert_eq!(config.fallback_industry, Industry::Services);
    }

    #[test]
    fn test_non_numeric_port_is_rejected() {
        assert!(config_from(&[("PORT", "abc")]).is_err());
    }

    #[test]
    fn test_out_of_range_port_is_rejected() {
        assert!(config_from(&[("PORT", "70000")]).is_err());
    }

    #[test]
    fn test_unknown_fallback_industry_is_rejected() {
        let err = config_from(&[("FALLBACK_INDUSTRY", "mining")]).unwrap_err();
        assert!(err.to_string().contains("FALLBACK_INDUSTRY"));
    }

    #[test]
    fn test_blank_fallback_industry_defaults_to_other() {
        let config = config_from(&[("FALLBACK_INDUSTRY", "  ")]).unwrap();
        assert_eq!(config.fallback_industry, Industry::Other);
    }

    #[test]
    fn test_bank_source_follows_directory_setting() {
        let mut config = Config::default();
        assert_eq!(config.bank_source(), BankSource::Embedded);
        config.question_bank_dir = Some(PathBuf::from("/srv/banks"));
        assert_eq!(
            config.bank_source(),
            BankSource::Directory(PathBuf::from("/srv/banks"))
        );
    }
}
