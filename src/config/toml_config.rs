use crate::config::smtp::SmtpConfig;
use crate::core::message::MessageTemplate;
use crate::utils::error::{Result, SantaError};
use crate::utils::validation::{validate_positive_number, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Only required when emails are actually sent.
    pub smtp: Option<SmtpConfig>,
    pub message: Option<MessageTemplate>,
    pub assignment: Option<AssignmentConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentConfig {
    pub max_attempts: Option<usize>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SantaError::ConfigParse {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PASSWORD})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SantaError::ConfigParse {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn message_template(&self) -> MessageTemplate {
        self.message.clone().unwrap_or_default()
    }

    pub fn max_attempts(&self) -> Option<usize> {
        self.assignment.as_ref().and_then(|a| a.max_attempts)
    }

    /// 取得並驗證 [smtp] 設定，實際寄信前呼叫
    pub fn smtp_settings(&self) -> Result<&SmtpConfig> {
        let smtp = self.smtp.as_ref().ok_or_else(|| SantaError::MissingConfig {
            field: "smtp".to_string(),
        })?;
        smtp.validate()?;
        Ok(smtp)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(max) = self.max_attempts() {
            validate_positive_number("assignment.max_attempts", max, 1)?;
        }

        Ok(())
    }
}
