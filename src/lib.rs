pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{SmtpConfig, TomlConfig};

pub use crate::adapters::{DryRunMailer, JsonParticipantFile, SmtpMailer};
pub use crate::core::assigner::{assign, AttemptLimit, Assigner};
pub use crate::core::{engine::SecretSantaEngine, message::MessageTemplate};
pub use crate::domain::model::{Assignment, DeliveryReport, Participant};
pub use crate::utils::error::{Result, SantaError};
