//! Email delivery over SMTP.
//!
//! Uses `lettre` with a STARTTLS relay and the credentials from [`SmtpConfig`].

use crate::config::SmtpConfig;
use crate::core::{Mailer, OutgoingEmail};
use crate::utils::error::{Result, SantaError};
use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let from: Mailbox =
            config
                .sender()
                .parse()
                .map_err(|e: lettre::address::AddressError| SantaError::InvalidConfigValue {
                    field: "smtp.from".to_string(),
                    value: config.sender().to_string(),
                    reason: e.to_string(),
                })?;

        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.server)
            .map_err(|e| SantaError::InvalidConfigValue {
                field: "smtp.server".to_string(),
                value: config.server.clone(),
                reason: format!("SMTP connection error: {}", e),
            })?
            .port(config.port)
            .credentials(credentials)
            .build();

        tracing::info!(
            "📮 SMTP relay {}:{} as {}",
            config.server,
            config.port,
            from
        );

        Ok(Self { transport, from })
    }

    fn build_message(&self, email: &OutgoingEmail) -> Result<Message> {
        let to: Mailbox = email.to.parse().map_err(|e| SantaError::Email {
            recipient: email.to.clone(),
            message: format!("invalid recipient: {}", e),
        })?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())
            .map_err(|e| SantaError::Email {
                recipient: email.to.clone(),
                message: format!("failed to build email: {}", e),
            })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<()> {
        let message = self.build_message(email)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| SantaError::Email {
                recipient: email.to.clone(),
                message: format!("SMTP send failed: {}", e),
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(from: Option<&str>) -> SmtpConfig {
        SmtpConfig {
            server: "smtp.example.com".to_string(),
            port: 587,
            username: "santa@example.com".to_string(),
            password: "hohoho".to_string(),
            from: from.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_message_headers() {
        let mailer = SmtpMailer::new(&config(None)).unwrap();
        let email = OutgoingEmail {
            to: "alice@example.com".to_string(),
            subject: "Your Secret Santa".to_string(),
            body: "You give to Bob".to_string(),
        };

        let message = mailer.build_message(&email).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("From: santa@example.com"));
        assert!(raw.contains("To: alice@example.com"));
        assert!(raw.contains("Subject: Your Secret Santa"));
        assert!(raw.contains("You give to Bob"));
    }

    #[tokio::test]
    async fn test_invalid_sender_is_rejected() {
        let result = SmtpMailer::new(&config(Some("not a mailbox")));
        assert!(matches!(
            result,
            Err(SantaError::InvalidConfigValue { .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_recipient_is_an_email_error() {
        let mailer = SmtpMailer::new(&config(None)).unwrap();
        let email = OutgoingEmail {
            to: "nobody".to_string(),
            subject: "s".to_string(),
            body: "b".to_string(),
        };

        let result = mailer.send(&email).await;
        assert!(matches!(result, Err(SantaError::Email { .. })));
    }
}
