//! Domain services

use rand::Rng;

use crate::domain::entity::card::Card;

/// Decides whether submitted evidence proves possession of a card.
///
/// `false` does not reject the card; it sends the attempt to manual review.
#[trait_variant::make(PossessionVerifier: Send)]
pub trait LocalPossessionVerifier {
    async fn verify(&self, card: &Card, evidence_url: Option<&str>) -> bool;
}

/// Stand-in for video analysis: passes with a fixed probability
#[derive(Debug, Clone, Copy)]
pub struct SimulatedVerifier {
    pass_rate: f64,
}

impl SimulatedVerifier {
    pub fn new(pass_rate: f64) -> Self {
        let pass_rate = if pass_rate.is_finite() {
            pass_rate.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self { pass_rate }
    }

    pub fn pass_rate(&self) -> f64 {
        self.pass_rate
    }
}

impl PossessionVerifier for SimulatedVerifier {
    async fn verify(&self, card: &Card, _evidence_url: Option<&str>) -> bool {
        let passed = rand::rng().random_bool(self.pass_rate);
        tracing::debug!(card_id = %card.id, passed, "Simulated possession check");
        passed
    }
}

/// Always returns the same answer
#[derive(Debug, Clone, Copy)]
pub struct FixedVerifier(pub bool);

impl PossessionVerifier for FixedVerifier {
    async fn verify(&self, _card: &Card, _evidence_url: Option<&str>) -> bool {
        self.0
    }
}
