use crate::utils::error::{Result, SantaError};
use crate::utils::validation::{
    validate_mailbox, validate_non_empty_string, validate_range, validate_required_field,
    validate_resolved, Validate,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SMTP_PORT: u16 = 587;

/// SMTP connection settings handed to the mailer.
#[derive(Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub server: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Sender mailbox, `username` when absent.
    #[serde(default)]
    pub from: Option<String>,
}

fn default_port() -> u16 {
    DEFAULT_SMTP_PORT
}

// 避免密碼出現在 debug 日誌中
impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("from", &self.from)
            .finish()
    }
}

impl SmtpConfig {
    /// 從環境變數載入 (SMTP_SERVER, SMTP_PORT, EMAIL, PASSWORD, SMTP_FROM)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server = lookup("SMTP_SERVER");
        let username = lookup("EMAIL");
        let password = lookup("PASSWORD");

        let port = match lookup("SMTP_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| SantaError::InvalidConfigValue {
                    field: "SMTP_PORT".to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                })?,
            None => DEFAULT_SMTP_PORT,
        };

        Ok(Self {
            server: validate_required_field("SMTP_SERVER", &server)?.clone(),
            port,
            username: validate_required_field("EMAIL", &username)?.clone(),
            password: validate_required_field("PASSWORD", &password)?.clone(),
            from: lookup("SMTP_FROM").filter(|f| !f.trim().is_empty()),
        })
    }

    pub fn sender(&self) -> &str {
        self.from.as_deref().unwrap_or(&self.username)
    }
}

impl Validate for SmtpConfig {
    fn validate(&self) -> Result<()> {
        validate_resolved("smtp.server", &self.server)?;
        validate_resolved("smtp.username", &self.username)?;
        validate_resolved("smtp.password", &self.password)?;
        if let Some(from) = &self.from {
            validate_resolved("smtp.from", from)?;
        }

        validate_non_empty_string("smtp.server", &self.server)?;
        validate_range("smtp.port", self.port, 1, u16::MAX)?;
        validate_non_empty_string("smtp.username", &self.username)?;
        validate_mailbox("smtp.from", self.sender())?;
        Ok(())
    }
}
