use crate::domain::model::{OutgoingEmail, Pairing};
use chrono::Datelike;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SUBJECT: &str = "Your Secret Santa for {year} is ...";

pub const DEFAULT_BODY: &str = "Hi {giver},

This year you are the Secret Santa of: {recipient} 🎅

Keep it a secret until the exchange, and think of something special
that will make them smile.

Your Secret Santa organizer 🎄
";

/// Subject and body with `{giver}`, `{recipient}` and `{year}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTemplate {
    #[serde(default = "default_subject")]
    pub subject: String,
    #[serde(default = "default_body")]
    pub body: String,
}

fn default_subject() -> String {
    DEFAULT_SUBJECT.to_string()
}

fn default_body() -> String {
    DEFAULT_BODY.to_string()
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self {
            subject: default_subject(),
            body: default_body(),
        }
    }
}

impl MessageTemplate {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// 產生寄給送禮者的通知信
    pub fn render(&self, pairing: &Pairing) -> OutgoingEmail {
        self.render_for_year(pairing, chrono::Local::now().year())
    }

    pub fn render_for_year(&self, pairing: &Pairing, year: i32) -> OutgoingEmail {
        let fill = |text: &str| {
            text.replace("{giver}", &pairing.giver.name)
                .replace("{recipient}", &pairing.recipient.name)
                .replace("{year}", &year.to_string())
        };

        OutgoingEmail {
            to: pairing.giver.email.clone(),
            subject: fill(&self.subject),
            body: fill(&self.body),
        }
    }
}
