use crate::core::{Participant, ParticipantSource};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Participant list stored as a JSON array of `{name, email, exclude}` records.
#[derive(Debug, Clone)]
pub struct JsonParticipantFile {
    path: PathBuf,
}

impl JsonParticipantFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ParticipantSource for JsonParticipantFile {
    async fn load(&self) -> Result<Vec<Participant>> {
        tracing::debug!("Reading participants from {}", self.path.display());
        let content = tokio::fs::read_to_string(&self.path).await?;
        let participants: Vec<Participant> = serde_json::from_str(&content)?;

        if participants.is_empty() {
            tracing::warn!("No participants found in {}", self.path.display());
        }

        Ok(participants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::SantaError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_load_participants() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"[
                {"name": "Alice", "email": "alice@example.com", "exclude": ["Bob"]},
                {"name": "Bob", "email": "bob@example.com"}
            ]"#,
        )
        .unwrap();

        let participants = JsonParticipantFile::new(file.path()).load().await.unwrap();

        assert_eq!(participants.len(), 2);
        assert_eq!(participants[0].name, "Alice");
        assert!(participants[0].exclude.contains("Bob"));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let result = JsonParticipantFile::new("/nonexistent/participants.json")
            .load()
            .await;
        assert!(matches!(result, Err(SantaError::Io(_))));
    }

    #[tokio::test]
    async fn test_malformed_json_is_serialization_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"[{"name": "Alice"}]"#).unwrap();

        let result = JsonParticipantFile::new(file.path()).load().await;
        assert!(matches!(result, Err(SantaError::Serialization(_))));
    }
}
