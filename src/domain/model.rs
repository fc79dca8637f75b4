use serde::Deserialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Participant {
    pub name: String,
    pub email: String,
    /// Names this participant must never draw.
    #[serde(default)]
    pub exclude: BTreeSet<String>,
}

impl Participant {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            exclude: BTreeSet::new(),
        }
    }

    pub fn excluding<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(names.into_iter().map(Into::into));
        self
    }

    /// `candidate` 是否可以成為此人的送禮對象
    pub fn may_give_to(&self, candidate: &str) -> bool {
        candidate != self.name && !self.exclude.contains(candidate)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    pub giver: Participant,
    pub recipient: Recipient,
}

/// Giver → recipient mapping, kept in the order participants were supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pairings: Vec<Pairing>,
}

impl Assignment {
    pub(crate) fn new(pairings: Vec<Pairing>) -> Self {
        Self { pairings }
    }

    pub fn recipient_of(&self, giver: &str) -> Option<&Recipient> {
        self.pairings
            .iter()
            .find(|p| p.giver.name == giver)
            .map(|p| &p.recipient)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pairing> {
        self.pairings.iter()
    }

    pub fn len(&self) -> usize {
        self.pairings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairings.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryFailure {
    pub giver: String,
    pub email: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Givers whose notification was accepted by the mailer.
    pub delivered: Vec<String>,
    pub failed: Vec<DeliveryFailure>,
}

impl DeliveryReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.delivered.len() + self.failed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_deserialize_without_exclusions() {
        let json = r#"[
            {"name": "Alice", "email": "alice@example.com", "exclude": ["Bob"]},
            {"name": "Bob", "email": "bob@example.com"}
        ]"#;

        let participants: Vec<Participant> = serde_json::from_str(json).unwrap();

        assert_eq!(participants.len(), 2);
        assert!(participants[0].exclude.contains("Bob"));
        assert!(participants[1].exclude.is_empty());
    }

    #[test]
    fn test_may_give_to() {
        let alice = Participant::new("Alice", "alice@example.com").excluding(["Bob"]);

        assert!(!alice.may_give_to("Alice"));
        assert!(!alice.may_give_to("Bob"));
        assert!(alice.may_give_to("Carol"));
    }

    #[test]
    fn test_recipient_lookup() {
        let assignment = Assignment::new(vec![Pairing {
            giver: Participant::new("Alice", "alice@example.com"),
            recipient: Recipient {
                name: "Bob".to_string(),
                email: "bob@example.com".to_string(),
            },
        }]);

        assert!(!assignment.is_empty());
        assert_eq!(assignment.len(), 1);
        assert_eq!(assignment.recipient_of("Alice").unwrap().name, "Bob");
        assert!(assignment.recipient_of("Bob").is_none());
    }
}
