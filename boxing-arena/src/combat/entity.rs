//! Fighter state machine
//!
//! Owns action, cooldown and health state for one side. Requests from any
//! producer (debounced poses, opponent AI) go through `request_action`; the
//! cooldowns are what keeps bursts of requests from all landing.

use serde::{Deserialize, Serialize};

use crate::classifier::ActionLabel;
use crate::config::CombatConfig;

/// Which fighter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn other(&self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Opponent => "opponent",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Health bar colour band
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthTier {
    High,
    Medium,
    Low,
}

impl HealthTier {
    pub fn from_health(health: i32) -> Self {
        if health > 60 {
            HealthTier::High
        } else if health > 30 {
            HealthTier::Medium
        } else {
            HealthTier::Low
        }
    }
}

/// One fighter
#[derive(Clone, Debug)]
pub struct CombatEntity {
    side: Side,

    /// Render position only, no combat meaning
    position: (f32, f32),
    x_bounds: Option<(f32, f32)>,

    /// May go negative internally; clamp with `display_health`
    health: i32,

    current_action: ActionLabel,
    /// Counts down to 0, then the action reverts to idle
    action_remaining: f64,

    /// None until the first accepted request
    last_action_accepted_at: Option<f64>,
    action_cooldown: f64,

    /// None until the first accepted hit
    last_hit_accepted_at: Option<f64>,
    hit_cooldown: f64,

    action_duration: f64,
    hit_duration: f64,
}

impl CombatEntity {
    pub fn new(side: Side, config: &CombatConfig) -> Self {
        let entity = match side {
            Side::Player => &config.player,
            Side::Opponent => &config.opponent,
        };

        Self {
            side,
            position: entity.start,
            x_bounds: entity.x_bounds,
            health: config.max_health,
            current_action: ActionLabel::Idle,
            action_remaining: 0.0,
            last_action_accepted_at: None,
            action_cooldown: entity.action_cooldown_ms,
            last_hit_accepted_at: None,
            hit_cooldown: entity.hit_cooldown_ms,
            action_duration: config.action_duration_ms,
            hit_duration: config.hit_duration_ms,
        }
    }

    // ========================================================================
    // TRANSITIONS
    // ========================================================================

    /// Ask to start `label` at `now`.
    ///
    /// Accepted only once the action cooldown has elapsed since the last
    /// accepted request. Rejected requests are dropped, not queued.
    /// Idle is always accepted and leaves the cooldown untouched.
    pub fn request_action(&mut self, label: ActionLabel, now: f64) -> bool {
        if label == ActionLabel::Idle {
            self.current_action = ActionLabel::Idle;
            self.action_remaining = 0.0;
            return true;
        }
        if !self.can_act(now) {
            log::trace!("{} rejected {} (action cooldown)", self.side, label);
            return false;
        }

        self.current_action = label;
        self.action_remaining = self.duration_of(label);
        self.last_action_accepted_at = Some(now);
        true
    }

    /// Advance the action timer by `delta` ms.
    ///
    /// Zero, negative and non-finite deltas change nothing.
    pub fn tick(&mut self, delta: f64) {
        if !(delta > 0.0 && delta.is_finite()) {
            return;
        }
        if self.action_remaining <= 0.0 {
            return;
        }

        self.action_remaining -= delta;
        if self.action_remaining <= 0.0 {
            self.action_remaining = 0.0;
            self.current_action = ActionLabel::Idle;
        }
    }

    /// Take `amount` damage at `now`.
    ///
    /// Accepted only outside the hit cooldown of the previous accepted hit.
    /// On acceptance the fighter is put into hit-stun.
    pub fn apply_damage(&mut self, amount: i32, now: f64) -> bool {
        if !self.can_be_hit(now) {
            log::trace!("{} ignored hit (hit cooldown)", self.side);
            return false;
        }

        self.health -= amount;
        self.current_action = ActionLabel::Hit;
        self.action_remaining = self.hit_duration;
        self.last_hit_accepted_at = Some(now);
        true
    }

    /// Put the fighter down for good (round lost)
    pub fn knock_out(&mut self) {
        self.current_action = ActionLabel::Out;
        self.action_remaining = f64::INFINITY;
    }

    /// Shift horizontally, clamped to this fighter's bounds
    pub fn move_horizontal(&mut self, distance: f32) {
        let mut x = self.position.0 + distance;
        if let Some((min, max)) = self.x_bounds {
            x = x.clamp(min, max);
        }
        self.position.0 = x;
    }

    fn duration_of(&self, label: ActionLabel) -> f64 {
        match label {
            ActionLabel::Idle => 0.0,
            ActionLabel::Hit => self.hit_duration,
            ActionLabel::Out => f64::INFINITY,
            ActionLabel::LeftPunch | ActionLabel::RightPunch | ActionLabel::Block | ActionLabel::Dodge => {
                self.action_duration
            }
        }
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn can_act(&self, now: f64) -> bool {
        self.last_action_accepted_at
            .map_or(true, |at| now - at >= self.action_cooldown)
    }

    pub fn can_be_hit(&self, now: f64) -> bool {
        self.last_hit_accepted_at
            .map_or(true, |at| now - at >= self.hit_cooldown)
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn current_action(&self) -> ActionLabel {
        self.current_action
    }

    pub fn action_remaining(&self) -> f64 {
        self.action_remaining
    }

    /// Still inside an action window
    pub fn is_busy(&self) -> bool {
        self.action_remaining > 0.0
    }

    /// Raw health, possibly negative
    pub fn health(&self) -> i32 {
        self.health
    }

    /// Health as shown to the user, never below 0
    pub fn display_health(&self) -> i32 {
        self.health.max(0)
    }

    pub fn health_tier(&self) -> HealthTier {
        HealthTier::from_health(self.display_health())
    }

    pub fn is_down(&self) -> bool {
        self.health <= 0
    }

    pub fn position(&self) -> (f32, f32) {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> CombatEntity {
        CombatEntity::new(Side::Player, &CombatConfig::default())
    }

    fn opponent() -> CombatEntity {
        CombatEntity::new(Side::Opponent, &CombatConfig::default())
    }

    #[test]
    fn test_starts_idle_at_full_health() {
        let entity = player();
        assert_eq!(entity.current_action(), ActionLabel::Idle);
        assert_eq!(entity.health(), 100);
        assert!(!entity.is_busy());
    }

    #[test]
    fn test_action_cooldown_gate() {
        let mut entity = player(); // 300ms cooldown
        assert!(entity.request_action(ActionLabel::LeftPunch, 0.0));
        assert!(!entity.request_action(ActionLabel::Block, 100.0));
        assert_eq!(entity.current_action(), ActionLabel::LeftPunch);
        assert!(entity.request_action(ActionLabel::Block, 300.0));
        assert_eq!(entity.current_action(), ActionLabel::Block);
    }

    #[test]
    fn test_action_expires_to_idle() {
        let mut entity = player();
        entity.request_action(ActionLabel::RightPunch, 0.0);
        assert_eq!(entity.action_remaining(), 500.0);

        entity.tick(300.0);
        assert_eq!(entity.current_action(), ActionLabel::RightPunch);

        entity.tick(200.0);
        assert_eq!(entity.current_action(), ActionLabel::Idle);
        assert_eq!(entity.action_remaining(), 0.0);
    }

    #[test]
    fn test_idle_request_keeps_invariant() {
        let mut entity = player();
        entity.request_action(ActionLabel::Dodge, 0.0);
        assert!(entity.request_action(ActionLabel::Idle, 400.0));
        assert_eq!(entity.current_action(), ActionLabel::Idle);
        assert!(!entity.is_busy());
    }

    #[test]
    fn test_idle_skips_cooldown() {
        let mut entity = player(); // 300ms cooldown
        assert!(entity.request_action(ActionLabel::RightPunch, 0.0));
        assert!(entity.request_action(ActionLabel::Idle, 100.0));
        assert_eq!(entity.current_action(), ActionLabel::Idle);
        assert!(!entity.is_busy());

        // Cooldown still counts from the punch, not from the idle
        assert!(!entity.request_action(ActionLabel::LeftPunch, 299.0));
        assert!(entity.request_action(ActionLabel::LeftPunch, 300.0));
        assert_eq!(entity.current_action(), ActionLabel::LeftPunch);
    }

    #[test]
    fn test_tick_zero_is_idempotent() {
        let mut entity = player();
        entity.request_action(ActionLabel::Block, 0.0);
        for _ in 0..10 {
            entity.tick(0.0);
        }
        assert_eq!(entity.current_action(), ActionLabel::Block);
        assert_eq!(entity.action_remaining(), 500.0);
    }

    #[test]
    fn test_bad_delta_ignored() {
        let mut entity = player();
        entity.request_action(ActionLabel::Block, 0.0);
        entity.tick(-50.0);
        entity.tick(f64::NAN);
        entity.tick(f64::INFINITY);
        assert_eq!(entity.action_remaining(), 500.0);
    }

    #[test]
    fn test_hit_cooldown_gate() {
        let mut entity = opponent(); // 500ms hit cooldown
        assert!(entity.apply_damage(10, 0.0));
        assert_eq!(entity.health(), 90);
        assert_eq!(entity.current_action(), ActionLabel::Hit);
        assert_eq!(entity.action_remaining(), 300.0);

        assert!(!entity.apply_damage(10, 16.0));
        assert!(!entity.apply_damage(10, 499.0));
        assert_eq!(entity.health(), 90);

        assert!(entity.apply_damage(10, 500.0));
        assert_eq!(entity.health(), 80);
    }

    #[test]
    fn test_hit_stun_expires() {
        let mut entity = player();
        entity.apply_damage(15, 0.0);
        entity.tick(300.0);
        assert_eq!(entity.current_action(), ActionLabel::Idle);
    }

    #[test]
    fn test_health_may_go_negative_but_displays_clamped() {
        let mut entity = player();
        for i in 0..8 {
            entity.apply_damage(15, i as f64 * 1000.0);
        }
        assert_eq!(entity.health(), -20);
        assert_eq!(entity.display_health(), 0);
        assert!(entity.is_down());
        assert_eq!(entity.health_tier(), HealthTier::Low);
    }

    #[test]
    fn test_knock_out_never_expires() {
        let mut entity = player();
        entity.knock_out();
        entity.tick(1e9);
        assert_eq!(entity.current_action(), ActionLabel::Out);
    }

    #[test]
    fn test_health_tiers() {
        assert_eq!(HealthTier::from_health(100), HealthTier::High);
        assert_eq!(HealthTier::from_health(61), HealthTier::High);
        assert_eq!(HealthTier::from_health(60), HealthTier::Medium);
        assert_eq!(HealthTier::from_health(31), HealthTier::Medium);
        assert_eq!(HealthTier::from_health(30), HealthTier::Low);
    }

    #[test]
    fn test_opponent_movement_bounded() {
        let mut entity = opponent();
        assert_eq!(entity.position(), (420.0, 300.0));
        entity.move_horizontal(-100.0);
        assert_eq!(entity.position().0, 400.0);
        entity.move_horizontal(1000.0);
        assert_eq!(entity.position().0, 700.0);

        let mut unbounded = player();
        unbounded.move_horizontal(-1000.0);
        assert_eq!(unbounded.position().0, -700.0);
    }
}
