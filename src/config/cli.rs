use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_positive_number, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "secret-santa")]
#[command(about = "Draw Secret Santa pairs and email every participant their recipient")]
pub struct CliConfig {
    /// JSON file with the participant list
    #[arg(short, long, default_value = "participants.json")]
    pub participants: String,

    /// TOML configuration file; SMTP settings come from the environment when omitted
    #[arg(short, long)]
    pub config: Option<String>,

    /// Maximum number of shuffles before giving up
    #[arg(long)]
    pub max_attempts: Option<usize>,

    /// Draw and render the emails without sending them
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("participants", &self.participants)?;

        if let Some(config) = &self.config {
            validate_path("config", config)?;
        }

        if let Some(max) = self.max_attempts {
            validate_positive_number("max_attempts", max, 1)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["secret-santa"]);

        assert_eq!(config.participants, "participants.json");
        assert!(config.config.is_none());
        assert!(!config.dry_run);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags() {
        let config = CliConfig::parse_from([
            "secret-santa",
            "--participants",
            "family.json",
            "--config",
            "santa.toml",
            "--max-attempts",
            "50",
            "--dry-run",
        ]);

        assert_eq!(config.participants, "family.json");
        assert_eq!(config.config.as_deref(), Some("santa.toml"));
        assert_eq!(config.max_attempts, Some(50));
        assert!(config.dry_run);
    }

    #[test]
    fn test_zero_attempts_is_invalid() {
        let config = CliConfig::parse_from(["secret-santa", "--max-attempts", "0"]);
        assert!(config.validate().is_err());
    }
}
