pub mod assigner;
pub mod engine;
pub mod message;

pub use crate::domain::model::{
    Assignment, DeliveryFailure, DeliveryReport, OutgoingEmail, Pairing, Participant, Recipient,
};
pub use crate::domain::ports::{Mailer, ParticipantSource};
pub use crate::utils::error::Result;
