#[cfg(feature = "cli")]
pub mod cli;
pub mod smtp;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use smtp::SmtpConfig;
pub use toml_config::TomlConfig;
