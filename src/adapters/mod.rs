// Adapters layer: concrete implementations of the domain ports (participant files, mail transports).

pub mod dry_run;
pub mod participant_file;
pub mod smtp_mailer;

pub use dry_run::DryRunMailer;
pub use participant_file::JsonParticipantFile;
pub use smtp_mailer::SmtpMailer;
