use crate::domain::model::{Assignment, Pairing, Participant, Recipient};
use crate::utils::error::{Result, SantaError};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

/// How many shuffles the assigner may try before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptLimit {
    Bounded(usize),
    /// Only safe without exclusions: a derangement exists for every n >= 2
    /// and roughly 1 in e shuffles is one.
    Unbounded,
}

impl AttemptLimit {
    /// 有排除名單時限制次數，否則一直洗牌直到成功
    pub fn for_participants(participants: &[Participant]) -> Self {
        if participants.iter().any(|p| !p.exclude.is_empty()) {
            Self::Bounded(DEFAULT_MAX_ATTEMPTS)
        } else {
            Self::Unbounded
        }
    }
}

/// Draws Secret Santa pairs by rejection sampling: shuffle the participant
/// order until nobody draws themselves or anyone they exclude.
pub struct Assigner<R: Rng = StdRng> {
    rng: R,
    limit: Option<AttemptLimit>,
}

impl Assigner<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for Assigner<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Assigner<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng, limit: None }
    }

    /// Overrides the limit otherwise picked by [`AttemptLimit::for_participants`].
    /// `Unbounded` is ignored when any participant has exclusions.
    pub fn with_limit(mut self, limit: AttemptLimit) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn assign(&mut self, participants: &[Participant]) -> Result<Assignment> {
        validate_participants(participants)?;

        if let Some(stuck) = participants
            .iter()
            .find(|giver| !participants.iter().any(|c| giver.may_give_to(&c.name)))
        {
            tracing::warn!(
                "❌ {} excludes every other participant, no draw is possible",
                stuck.name
            );
            return Err(SantaError::InfeasibleAssignment { attempts: 0 });
        }

        let limit = match self.limit {
            // 有排除名單時一定要有上限
            Some(AttemptLimit::Unbounded) if participants.iter().any(|p| !p.exclude.is_empty()) => {
                AttemptLimit::Bounded(DEFAULT_MAX_ATTEMPTS)
            }
            Some(limit) => limit,
            None => AttemptLimit::for_participants(participants),
        };
        tracing::debug!(
            "Drawing pairs for {} participants (limit: {:?})",
            participants.len(),
            limit
        );

        let mut order: Vec<usize> = (0..participants.len()).collect();
        let mut attempts = 0usize;

        loop {
            if let AttemptLimit::Bounded(max) = limit {
                if attempts >= max {
                    tracing::warn!("❌ No valid draw found after {} shuffles", attempts);
                    return Err(SantaError::InfeasibleAssignment { attempts });
                }
            }

            attempts += 1;
            order.shuffle(&mut self.rng);

            if is_valid_draw(participants, &order) {
                break;
            }
        }

        tracing::debug!("Valid draw found after {} shuffle(s)", attempts);

        let pairings = participants
            .iter()
            .zip(order.iter())
            .map(|(giver, &target)| {
                let recipient = &participants[target];
                Pairing {
                    giver: giver.clone(),
                    recipient: Recipient {
                        name: recipient.name.clone(),
                        email: recipient.email.clone(),
                    },
                }
            })
            .collect();

        Ok(Assignment::new(pairings))
    }
}

/// Convenience wrapper around a fresh [`Assigner`] with the default limit.
pub fn assign(participants: &[Participant]) -> Result<Assignment> {
    Assigner::new().assign(participants)
}

fn is_valid_draw(participants: &[Participant], order: &[usize]) -> bool {
    participants
        .iter()
        .zip(order)
        .all(|(giver, &target)| giver.may_give_to(&participants[target].name))
}

fn validate_participants(participants: &[Participant]) -> Result<()> {
    if participants.len() < 2 {
        return Err(SantaError::invalid_input(format!(
            "at least 2 participants are required, found {}",
            participants.len()
        )));
    }

    let mut names = HashSet::with_capacity(participants.len());
    for participant in participants {
        if participant.name.trim().is_empty() {
            return Err(SantaError::invalid_input(format!(
                "participant with email '{}' has an empty name",
                participant.email
            )));
        }
        if !names.insert(participant.name.as_str()) {
            return Err(SantaError::invalid_input(format!(
                "duplicate participant name '{}'",
                participant.name
            )));
        }
    }

    for participant in participants {
        for excluded in &participant.exclude {
            if excluded == &participant.name {
                return Err(SantaError::invalid_input(format!(
                    "'{}' lists themselves in their exclusions",
                    participant.name
                )));
            }
            if !names.contains(excluded.as_str()) {
                return Err(SantaError::invalid_input(format!(
                    "'{}' excludes unknown participant '{}'",
                    participant.name, excluded
                )));
            }
        }
    }

    Ok(())
}
