//! Opponent AI - weighted random decisions plus a reflex dodge
//!
//! Difficulty only changes timing and weights, never the shape of the
//! algorithm.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::classifier::{ActionLabel, DECISION_LABELS};
use crate::config::OpponentConfig;

/// Opponent difficulty
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    /// Difficulty faced when playing as `character`. Unknown characters
    /// get a normal opponent.
    pub fn for_character(character: &str) -> Self {
        match character {
            "mac" => Difficulty::Normal,
            "don" => Difficulty::Hard,
            "king" => Difficulty::Easy,
            _ => Difficulty::Normal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// WEIGHTED SAMPLING
// ============================================================================

/// Probabilities over [`DECISION_LABELS`], summing to 1
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActionWeights([f64; 5]);

impl ActionWeights {
    pub fn new(weights: [f64; 5]) -> Self {
        Self(weights)
    }

    pub fn get(&self, label: ActionLabel) -> f64 {
        DECISION_LABELS
            .iter()
            .position(|l| *l == label)
            .map_or(0.0, |i| self.0[i])
    }

    /// Cumulative-weight pick for one uniform draw `u` in [0, 1)
    pub fn sample(&self, u: f64) -> ActionLabel {
        pick(&DECISION_LABELS, &self.0, u)
    }

    /// Same pick with dodge removed and the other four weights rescaled to
    /// sum to 1. Never returns dodge.
    pub fn sample_without_dodge(&self, u: f64) -> ActionLabel {
        let labels = &DECISION_LABELS[..4];
        let weights = &self.0[..4];
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return ActionLabel::Idle;
        }
        pick(labels, weights, u * total)
    }
}

/// First label whose cumulative weight exceeds `target`; idle if rounding
/// leaves the target past the last bucket
fn pick(labels: &[ActionLabel], weights: &[f64], target: f64) -> ActionLabel {
    let mut cumulative = 0.0;
    for (label, weight) in labels.iter().zip(weights) {
        cumulative += weight;
        if target < cumulative {
            return *label;
        }
    }
    ActionLabel::Idle
}

// ============================================================================
// PROFILE
// ============================================================================

/// Everything the policy needs for one round. Fixed once the round starts.
#[derive(Clone, Debug, PartialEq)]
pub struct OpponentProfile {
    pub difficulty: Difficulty,
    /// Base delay between decisions
    pub decision_interval_ms: f64,
    /// Random extra delay in [0, jitter)
    pub jitter_ms: f64,
    pub weights: ActionWeights,
    pub dodge_cooldown_ms: f64,
    pub reactive: bool,
    pub reaction_chance: f64,
    pub reaction_redecide_ms: f64,
}

impl OpponentProfile {
    pub fn new(difficulty: Difficulty, config: &OpponentConfig) -> Self {
        let tuning = config.difficulty(difficulty);
        Self {
            difficulty,
            decision_interval_ms: tuning.decision_interval_ms,
            jitter_ms: config.jitter_ms,
            weights: ActionWeights::new(tuning.weights),
            dodge_cooldown_ms: config.dodge_cooldown_ms,
            reactive: config.reactive,
            reaction_chance: config.reaction_chance,
            reaction_redecide_ms: config.reaction_redecide_ms,
        }
    }

    /// Profile for the opponent of the selected player character
    pub fn for_character(character: &str, config: &OpponentConfig) -> Self {
        Self::new(Difficulty::for_character(character), config)
    }
}

// ============================================================================
// POLICY
// ============================================================================

/// Decides the opponent's next requested action
pub struct OpponentPolicy<R> {
    profile: OpponentProfile,
    rng: R,
    /// Next regular decision happens once the clock passes this
    next_decision_at: f64,
    /// Dodge is off the table until the clock reaches this
    dodge_ready_at: f64,
}

impl<R: Rng> OpponentPolicy<R> {
    pub fn new(profile: OpponentProfile, rng: R) -> Self {
        Self {
            profile,
            rng,
            next_decision_at: f64::NEG_INFINITY,
            dodge_ready_at: f64::NEG_INFINITY,
        }
    }

    pub fn is_due(&self, now: f64) -> bool {
        now > self.next_decision_at
    }

    pub fn dodge_ready(&self, now: f64) -> bool {
        now >= self.dodge_ready_at
    }

    /// Regular decision, if one is due
    pub fn poll(&mut self, now: f64) -> Option<ActionLabel> {
        self.is_due(now).then(|| self.decide(now))
    }

    /// Pick the next action and schedule the following decision.
    /// The dodge cooldown starts only once the entity accepts (`accepted`).
    pub fn decide(&mut self, now: f64) -> ActionLabel {
        let weights = self.profile.weights;

        let mut label = weights.sample(self.rng.random());
        if label == ActionLabel::Dodge && !self.dodge_ready(now) {
            label = weights.sample_without_dodge(self.rng.random());
        }

        let jitter = if self.profile.jitter_ms > 0.0 {
            self.rng.random_range(0.0..self.profile.jitter_ms)
        } else {
            0.0
        };
        self.next_decision_at = now + self.profile.decision_interval_ms + jitter;

        log::debug!("opponent ({}) action: {}", self.profile.difficulty, label);
        label
    }

    /// Reflex counter to the player's latest accepted action.
    ///
    /// When the player throws a punch, the opponent is not mid-action and
    /// dodge is off cooldown, dodge with `reaction_chance` probability.
    /// Nothing is committed until `countered` reports the dodge accepted.
    pub fn react(&mut self, player_action: ActionLabel, opponent_busy: bool, now: f64) -> Option<ActionLabel> {
        if !self.profile.reactive || !player_action.is_punch() || opponent_busy || !self.dodge_ready(now) {
            return None;
        }
        if self.rng.random::<f64>() >= self.profile.reaction_chance {
            return None;
        }

        log::debug!("opponent ({}) counters {} with dodge", self.profile.difficulty, player_action);
        Some(ActionLabel::Dodge)
    }

    /// The entity accepted a scheduled decision
    pub fn accepted(&mut self, label: ActionLabel, now: f64) {
        if label == ActionLabel::Dodge {
            self.start_dodge_cooldown(now);
        }
    }

    /// The entity accepted a counter dodge: cool it down and push the next
    /// regular decision back
    pub fn countered(&mut self, now: f64) {
        self.start_dodge_cooldown(now);
        self.next_decision_at = now + self.profile.reaction_redecide_ms;
    }

    fn start_dodge_cooldown(&mut self, now: f64) {
        self.dodge_ready_at = now + self.profile.dodge_cooldown_ms;
    }

    pub fn profile(&self) -> &OpponentProfile {
        &self.profile
    }

    pub fn next_decision_at(&self) -> f64 {
        self.next_decision_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DifficultyConfig;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn make_policy(difficulty: Difficulty, config: &OpponentConfig) -> OpponentPolicy<SmallRng> {
        OpponentPolicy::new(OpponentProfile::new(difficulty, config), SmallRng::seed_from_u64(7))
    }

    #[test]
    fn test_character_mapping() {
        assert_eq!(Difficulty::for_character("mac"), Difficulty::Normal);
        assert_eq!(Difficulty::for_character("don"), Difficulty::Hard);
        assert_eq!(Difficulty::for_character("king"), Difficulty::Easy);
        assert_eq!(Difficulty::for_character("tyson"), Difficulty::Normal);
    }

    #[test]
    fn test_cumulative_sampling() {
        // hard: idle 0.2, left 0.3, right 0.3, block 0.1, dodge 0.1
        let weights = ActionWeights::new([0.2, 0.3, 0.3, 0.1, 0.1]);
        assert_eq!(weights.sample(0.0), ActionLabel::Idle);
        assert_eq!(weights.sample(0.19), ActionLabel::Idle);
        assert_eq!(weights.sample(0.2), ActionLabel::LeftPunch);
        assert_eq!(weights.sample(0.55), ActionLabel::RightPunch);
        assert_eq!(weights.sample(0.85), ActionLabel::Block);
        assert_eq!(weights.sample(0.95), ActionLabel::Dodge);
    }

    #[test]
    fn test_resample_renormalizes_without_dodge() {
        // Remaining four sum to 0.9
        let weights = ActionWeights::new([0.2, 0.3, 0.3, 0.1, 0.1]);
        assert_eq!(weights.sample_without_dodge(0.0), ActionLabel::Idle);
        assert_eq!(weights.sample_without_dodge(0.25), ActionLabel::LeftPunch);
        assert_eq!(weights.sample_without_dodge(0.6), ActionLabel::RightPunch);
        assert_eq!(weights.sample_without_dodge(0.95), ActionLabel::Block);

        for i in 0..1000 {
            let u = i as f64 / 1000.0;
            assert_ne!(weights.sample_without_dodge(u), ActionLabel::Dodge);
        }
    }

    #[test]
    fn test_sampling_frequencies_follow_weights() {
        let weights = ActionWeights::new([0.2, 0.3, 0.3, 0.1, 0.1]);
        let mut rng = SmallRng::seed_from_u64(42);
        let draws = 20_000;
        let mut counts = [0usize; 5];
        for _ in 0..draws {
            let label = weights.sample(rng.random());
            let idx = DECISION_LABELS.iter().position(|l| *l == label).unwrap();
            counts[idx] += 1;
        }
        for (i, label) in DECISION_LABELS.iter().enumerate() {
            let observed = counts[i] as f64 / draws as f64;
            assert!((observed - weights.get(*label)).abs() < 0.02, "{label}: {observed}");
        }
    }

    #[test]
    fn test_hard_never_dodges_while_dodge_cools_down() {
        let config = OpponentConfig::default();
        let mut policy = make_policy(Difficulty::Hard, &config);
        policy.start_dodge_cooldown(0.0);

        let mut punches = 0;
        for i in 0..1000 {
            let label = policy.decide(i as f64);
            assert_ne!(label, ActionLabel::Dodge);
            if label.is_punch() {
                punches += 1;
            }
        }
        // Dodge's share went to the other four, punches included
        assert!(punches > 500);

        // Cooldown over: dodge is back in the pool
        let dodged = (0..1000).any(|i| policy.decide(2000.0 + i as f64) == ActionLabel::Dodge);
        assert!(dodged);
    }

    #[test]
    fn test_unaccepted_dodge_keeps_cooldown_ready() {
        let config = OpponentConfig {
            normal: DifficultyConfig { decision_interval_ms: 1500.0, weights: [0.0, 0.0, 0.0, 0.0, 1.0] },
            ..OpponentConfig::default()
        };
        let mut policy = make_policy(Difficulty::Normal, &config);

        assert_eq!(policy.decide(0.0), ActionLabel::Dodge);
        assert!(policy.dodge_ready(1.0));

        policy.accepted(ActionLabel::Dodge, 10.0);
        assert!(!policy.dodge_ready(2009.0));
        assert!(policy.dodge_ready(2010.0));
    }

    #[test]
    fn test_decision_schedule_with_jitter() {
        let config = OpponentConfig::default();
        let mut policy = make_policy(Difficulty::Easy, &config);
        assert!(policy.is_due(0.0));

        for _ in 0..100 {
            policy.decide(10_000.0);
            let next = policy.next_decision_at();
            assert!(next >= 12_000.0 && next < 13_000.0, "{next}");
        }
        assert_eq!(policy.poll(12_000.0 - 1.0), None);
    }

    #[test]
    fn test_zero_jitter_is_exact() {
        let config = OpponentConfig { jitter_ms: 0.0, ..OpponentConfig::default() };
        let mut policy = make_policy(Difficulty::Hard, &config);
        policy.decide(500.0);
        assert_eq!(policy.next_decision_at(), 1500.0);
    }

    #[test]
    fn test_react_dodges_punches() {
        let config = OpponentConfig { reaction_chance: 1.0, ..OpponentConfig::default() };
        let mut policy = make_policy(Difficulty::Normal, &config);

        assert_eq!(policy.react(ActionLabel::Block, false, 0.0), None);
        assert_eq!(policy.react(ActionLabel::RightPunch, true, 0.0), None);
        assert_eq!(policy.react(ActionLabel::RightPunch, false, 0.0), Some(ActionLabel::Dodge));
        policy.countered(0.0);
        assert_eq!(policy.next_decision_at(), 1000.0);

        // Dodge on cooldown for 2s
        assert_eq!(policy.react(ActionLabel::LeftPunch, false, 1999.0), None);
        assert_eq!(policy.react(ActionLabel::LeftPunch, false, 2000.0), Some(ActionLabel::Dodge));
    }

    #[test]
    fn test_react_respects_chance_and_flag() {
        let never = OpponentConfig { reaction_chance: 0.0, ..OpponentConfig::default() };
        let mut policy = make_policy(Difficulty::Hard, &never);
        assert!((0..100).all(|i| policy.react(ActionLabel::LeftPunch, false, i as f64 * 5000.0).is_none()));

        let off = OpponentConfig { reactive: false, reaction_chance: 1.0, ..OpponentConfig::default() };
        let mut policy = make_policy(Difficulty::Hard, &off);
        assert_eq!(policy.react(ActionLabel::LeftPunch, false, 0.0), None);
    }

    #[test]
    fn test_react_rate_near_chance() {
        let config = OpponentConfig::default();
        let mut policy = make_policy(Difficulty::Normal, &config);
        let trials = 2000;
        let dodges = (0..trials)
            .filter(|i| policy.react(ActionLabel::LeftPunch, false, *i as f64 * 5000.0).is_some())
            .count();
        let rate = dodges as f64 / trials as f64;
        assert!((rate - 0.7).abs() < 0.05, "{rate}");
    }
}
