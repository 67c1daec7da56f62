//! Configuration file support
//!
//! Loads config from ~/.amora/config.toml. Values resolve as
//! CLI args > env vars > config file > defaults.

use serde::Deserialize;
use std::path::PathBuf;

/// Configuration for amora
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Groq API key
    pub groq_api_key: Option<String>,

    /// Model name override
    pub model: Option<String>,

    /// Safety filter strictness (low / medium / high)
    pub strictness: Option<String>,
}

impl Config {
    /// Load config from ~/.amora/config.toml
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    fn load_from(path: &PathBuf) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Get the config file path
pub fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(".amora")
        .join("config.toml")
}

/// How hard the safety filter grades a draft before calling it unsafe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    Low,
    #[default]
    Medium,
    High,
}

impl Strictness {
    /// Minimum score a draft needs to be flagged safe.
    pub fn threshold(&self) -> u8 {
        match self {
            Self::Low => 50,
            Self::Medium => 70,
            Self::High => 90,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::str::FromStr for Strictness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown strictness: {other}")),
        }
    }
}

impl std::fmt::Display for Strictness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.groq_api_key.is_none());
        assert!(config.model.is_none());
        assert!(config.strictness.is_none());
    }

    #[test]
    fn test_config_path() {
        let path = config_path();
        assert!(path.to_string_lossy().contains(".amora"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn test_config_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "groq_api_key = \"gsk_test\"\nstrictness = \"high\"\n").unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.groq_api_key.as_deref(), Some("gsk_test"));
        assert_eq!(config.strictness.as_deref(), Some("high"));
    }

    #[test]
    fn test_config_load_missing_file() {
        let config = Config::load_from(&PathBuf::from("/nonexistent/amora.toml"));
        assert!(config.groq_api_key.is_none());
    }

    #[test]
    fn test_strictness_parse_and_threshold() {
        assert_eq!("medium".parse::<Strictness>().unwrap(), Strictness::Medium);
        assert_eq!("HIGH".parse::<Strictness>().unwrap(), Strictness::High);
        assert!("extreme".parse::<Strictness>().is_err());
        assert_eq!(Strictness::Low.threshold(), 50);
        assert_eq!(Strictness::default(), Strictness::Medium);
    }
}
