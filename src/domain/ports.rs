use crate::domain::model::{OutgoingEmail, Participant};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ParticipantSource: Send + Sync {
    async fn load(&self) -> Result<Vec<Participant>>;
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<()>;
}
