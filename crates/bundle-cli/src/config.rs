use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Initial state of the demo objects built by the CLI.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Starting value of the demo counter.
    pub counter_start: i64,
    pub account: AccountConfig,
    pub person: PersonConfig,
    pub employer: EmployerConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    pub owner: String,
    pub opening_balance: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonConfig {
    pub name: String,
    pub age: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployerConfig {
    pub company: String,
    pub salary: f64,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            owner: "Ada Lovelace".into(),
            opening_balance: 100.0,
        }
    }
}

impl Default for PersonConfig {
    fn default() -> Self {
        Self {
            name: "Ada Lovelace".into(),
            age: 36,
        }
    }
}

impl Default for EmployerConfig {
    fn default() -> Self {
        Self {
            company: "Analytical Engines Ltd".into(),
            salary: 1000.0,
        }
    }
}

impl DemoConfig {
    /// Load from `path`, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(DemoConfig::load(None).unwrap(), DemoConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "counter_start = 7\n\n[person]\nname = \"Grace\"").unwrap();

        let config = DemoConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.counter_start, 7);
        assert_eq!(config.person.name, "Grace");
        assert_eq!(config.person.age, 36);
        assert_eq!(config.account, AccountConfig::default());
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "counter_start = \"many\"").unwrap();
        let err = DemoConfig::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("parsing config"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(DemoConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn toml_roundtrip() {
        let config = DemoConfig::default();
        let text = config.to_toml().unwrap();
        let parsed: DemoConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
