use crate::core::assigner::{AttemptLimit, Assigner};
use crate::core::message::MessageTemplate;
use crate::core::{DeliveryFailure, DeliveryReport, Mailer, Participant, ParticipantSource};
use crate::utils::error::{Result, SantaError};
use crate::utils::validation::validate_email;

pub struct SecretSantaEngine<S: ParticipantSource, M: Mailer> {
    source: S,
    mailer: M,
    template: MessageTemplate,
    max_attempts: Option<usize>,
}

impl<S: ParticipantSource, M: Mailer> SecretSantaEngine<S, M> {
    pub fn new(source: S, mailer: M) -> Self {
        Self {
            source,
            mailer,
            template: MessageTemplate::default(),
            max_attempts: None,
        }
    }

    pub fn with_template(mut self, template: MessageTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: Option<usize>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Loads, draws and notifies. Delivery is best-effort: a failed email is
    /// recorded in the report and the remaining ones are still sent.
    pub async fn run(&self) -> Result<DeliveryReport> {
        tracing::info!("🎁 Starting Secret Santa draw");

        // Load
        let participants = self.source.load().await?;
        tracing::info!("Loaded {} participants", participants.len());
        validate_addresses(&participants)?;

        // Assign
        let mut assigner = Assigner::new();
        if let Some(max) = self.max_attempts {
            assigner = assigner.with_limit(AttemptLimit::Bounded(max));
        }
        let assignment = assigner.assign(&participants)?;
        tracing::info!("✅ Drew {} pairs", assignment.len());

        // Notify
        let mut report = DeliveryReport::default();
        for pairing in assignment.iter() {
            tracing::debug!("{} -> {}", pairing.giver.name, pairing.recipient.name);
            let email = self.template.render(pairing);

            match self.mailer.send(&email).await {
                Ok(()) => {
                    tracing::info!("📧 Email sent to {}", email.to);
                    report.delivered.push(pairing.giver.name.clone());
                }
                Err(e) => {
                    tracing::warn!("❌ Error sending email to {}: {}", email.to, e);
                    report.failed.push(DeliveryFailure {
                        giver: pairing.giver.name.clone(),
                        email: email.to,
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            "Delivered {}/{} notifications",
            report.delivered.len(),
            report.total()
        );

        Ok(report)
    }
}

fn validate_addresses(participants: &[Participant]) -> Result<()> {
    for participant in participants {
        validate_email(&format!("{}.email", participant.name), &participant.email).map_err(
            |e| SantaError::invalid_input(format!("participant '{}': {}", participant.name, e)),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OutgoingEmail;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    struct MockSource {
        participants: Vec<Participant>,
    }

    #[async_trait]
    impl ParticipantSource for MockSource {
        async fn load(&self) -> Result<Vec<Participant>> {
            Ok(self.participants.clone())
        }
    }

    #[derive(Clone, Default)]
    struct MockMailer {
        sent: Arc<Mutex<Vec<OutgoingEmail>>>,
        reject: Option<String>,
    }

    #[async_trait]
    impl Mailer for MockMailer {
        async fn send(&self, email: &OutgoingEmail) -> Result<()> {
            if self.reject.as_deref() == Some(email.to.as_str()) {
                return Err(SantaError::Email {
                    recipient: email.to.clone(),
                    message: "mailbox unavailable".to_string(),
                });
            }
            self.sent.lock().await.push(email.clone());
            Ok(())
        }
    }

    fn source(names: &[&str]) -> MockSource {
        MockSource {
            participants: names
                .iter()
                .map(|n| Participant::new(*n, format!("{}@example.com", n.to_lowercase())))
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_every_giver_gets_one_email() {
        let mailer = MockMailer::default();
        let engine = SecretSantaEngine::new(source(&["Alice", "Bob", "Carol", "Dave"]), mailer.clone())
            .with_template(MessageTemplate::new("Santa", "{recipient}"));

        let report = engine.run().await.unwrap();

        assert!(report.is_complete());
        assert_eq!(report.delivered.len(), 4);

        let sent = mailer.sent.lock().await;
        let addressed: HashSet<&str> = sent.iter().map(|e| e.to.as_str()).collect();
        assert_eq!(addressed.len(), 4);

        let named: HashSet<&str> = sent.iter().map(|e| e.body.as_str()).collect();
        assert_eq!(named, HashSet::from(["Alice", "Bob", "Carol", "Dave"]));
        for email in sent.iter() {
            assert_ne!(email.to, format!("{}@example.com", email.body.to_lowercase()));
        }
    }

    #[tokio::test]
    async fn test_failed_send_does_not_stop_the_rest() {
        let mailer = MockMailer {
            reject: Some("bob@example.com".to_string()),
            ..Default::default()
        };
        let engine = SecretSantaEngine::new(source(&["Alice", "Bob", "Carol"]), mailer.clone());

        let report = engine.run().await.unwrap();

        assert!(!report.is_complete());
        assert_eq!(report.total(), 3);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].giver, "Bob");
        assert_eq!(mailer.sent.lock().await.len(), 2);
    }

    #[tokio::test]
    async fn test_no_email_when_draw_is_infeasible() {
        let mailer = MockMailer::default();
        let engine = SecretSantaEngine::new(
            MockSource {
                participants: vec![
                    Participant::new("A", "a@example.com").excluding(["B"]),
                    Participant::new("B", "b@example.com").excluding(["A"]),
                ],
            },
            mailer.clone(),
        );

        let result = engine.run().await;

        assert!(matches!(
            result,
            Err(SantaError::InfeasibleAssignment { .. })
        ));
        assert!(mailer.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_address_is_rejected_before_sending() {
        let mailer = MockMailer::default();
        let engine = SecretSantaEngine::new(
            MockSource {
                participants: vec![
                    Participant::new("A", "a@example.com"),
                    Participant::new("B", "not an address"),
                ],
            },
            mailer.clone(),
        );

        let result = engine.run().await;

        assert!(matches!(result, Err(SantaError::InvalidInput { .. })));
        assert!(mailer.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_explicit_attempt_limit_is_used() {
        let engine = SecretSantaEngine::new(
            MockSource {
                participants: vec![
                    Participant::new("A", "a@example.com").excluding(["B"]),
                    Participant::new("B", "b@example.com").excluding(["A"]),
                    Participant::new("C", "c@example.com"),
                ],
            },
            MockMailer::default(),
        )
        .with_max_attempts(Some(10));

        let result = engine.run().await;

        assert!(matches!(
            result,
            Err(SantaError::InfeasibleAssignment { attempts: 10 })
        ));
    }
}
