use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::LedgerError;

/// Who may open a new poll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreationPolicy {
    /// Any caller may create a poll.
    #[default]
    Open,
    /// Only the administrator may create a poll.
    AdministratorOnly,
}

/// A poll to open as part of bootstrapping the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPoll {
    pub question: String,
    pub options: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Identity allowed to end polls. Bound for the ledger's lifetime.
    pub administrator: String,

    #[serde(default)]
    pub creation_policy: CreationPolicy,

    /// Opened by the administrator right after construction
    #[serde(default)]
    pub seed_poll: Option<SeedPoll>,
}

impl LedgerConfig {
    pub fn new<S: Into<String>>(administrator: S) -> Self {
        Self {
            administrator: administrator.into(),
            creation_policy: CreationPolicy::default(),
            seed_poll: None,
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ledger config {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("invalid ledger config {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: LedgerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks shared by file loading and `genesis::bootstrap`.
    pub fn validate(&self) -> crate::Result<()> {
        if self.administrator.trim().is_empty() {
            return Err(LedgerError::invalid_input("administrator must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_full_config() {
        let config = LedgerConfig::from_toml_str(
            r#"
            administrator = "0xadmin"
            creation_policy = "administrator_only"

            [seed_poll]
            question = "Which web3 stack do you prefer?"
            options = ["Scaffold-ETH 2", "Hardhat + Ethers", "Foundry", "Other"]
            "#,
        )
        .unwrap();

        assert_eq!(config.administrator, "0xadmin");
        assert_eq!(config.creation_policy, CreationPolicy::AdministratorOnly);
        let seed = config.seed_poll.unwrap();
        assert_eq!(seed.options.len(), 4);
    }

    #[test]
    fn defaults_apply() {
        let config = LedgerConfig::from_toml_str(r#"administrator = "0xadmin""#).unwrap();
        assert_eq!(config, LedgerConfig::new("0xadmin"));
        assert_eq!(config.creation_policy, CreationPolicy::Open);
    }

    #[test]
    fn rejects_missing_or_blank_administrator() {
        assert!(LedgerConfig::from_toml_str("").is_err());
        assert!(LedgerConfig::from_toml_str(r#"administrator = "  ""#).is_err());
        assert!(matches!(
            LedgerConfig::new(" ").validate(),
            Err(LedgerError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_unknown_policy() {
        let result = LedgerConfig::from_toml_str(
            r#"
            administrator = "0xadmin"
            creation_policy = "anyone_but_bob"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"administrator = "0xadmin""#).unwrap();

        let config = LedgerConfig::load(file.path()).unwrap();
        assert_eq!(config.administrator, "0xadmin");
    }

    #[test]
    fn load_reports_path() {
        let err = LedgerConfig::load("/nonexistent/pollvote.toml").unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/pollvote.toml"));
    }
}
