//! Game configuration
//!
//! Every constant the core uses, with the shipped values as defaults. JS can
//! override any subset by passing a JSON object with camelCase keys.

use serde::{Deserialize, Serialize};

use crate::combat::Difficulty;
use crate::error::ConfigError;

/// Weights must sum to 1 within this tolerance
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Full configuration for one round
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub classifier: ClassifierConfig,
    pub debounce: DebounceConfig,
    pub combat: CombatConfig,
    pub opponent: OpponentConfig,
    pub countdown: CountdownConfig,
}

/// Pose classifier thresholds
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassifierConfig {
    /// Required keypoints below this confidence make the pose idle
    pub min_confidence: f32,
    /// Elbow angle (degrees) above which an arm is extended
    pub punch_angle_deg: f32,
    /// Shoulder spread (pixels) below which the torso is turned away
    pub dodge_shoulder_px: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.3,
            punch_angle_deg: 140.0,
            dodge_shoulder_px: 50.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DebounceConfig {
    pub interval_ms: f64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self { interval_ms: 100.0 }
    }
}

/// Timings and damage shared by both fighters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CombatConfig {
    /// How long a punch, block or dodge stays in effect
    pub action_duration_ms: f64,
    /// Hit-stun duration
    pub hit_duration_ms: f64,
    pub max_health: i32,
    /// Damage a landed player punch deals to the opponent
    pub player_punch_damage: i32,
    /// Damage a landed opponent punch deals to the player
    pub opponent_punch_damage: i32,
    pub player: EntityConfig,
    #[serde(default = "EntityConfig::opponent")]
    pub opponent: EntityConfig,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            action_duration_ms: 500.0,
            hit_duration_ms: 300.0,
            max_health: 100,
            player_punch_damage: 10,
            opponent_punch_damage: 15,
            player: EntityConfig::player(),
            opponent: EntityConfig::opponent(),
        }
    }
}

/// Per-fighter cooldowns and placement
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EntityConfig {
    /// Minimum spacing between accepted action requests
    pub action_cooldown_ms: f64,
    /// Invulnerability window after taking a hit
    pub hit_cooldown_ms: f64,
    /// Render position at round start
    pub start: (f32, f32),
    /// Horizontal movement limits, if any
    pub x_bounds: Option<(f32, f32)>,
}

impl EntityConfig {
    pub fn player() -> Self {
        Self {
            action_cooldown_ms: 300.0,
            hit_cooldown_ms: 500.0,
            start: (300.0, 300.0),
            x_bounds: None,
        }
    }

    pub fn opponent() -> Self {
        Self {
            action_cooldown_ms: 400.0,
            hit_cooldown_ms: 500.0,
            start: (420.0, 300.0),
            x_bounds: Some((400.0, 700.0)),
        }
    }
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self::player()
    }
}

/// Decision timing and action weights for one difficulty
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyConfig {
    /// Base delay between two decisions
    pub decision_interval_ms: f64,
    /// Probabilities for idle, left punch, right punch, block, dodge
    pub weights: [f64; 5],
}

impl DifficultyConfig {
    pub fn easy() -> Self {
        Self {
            decision_interval_ms: 2000.0,
            weights: [0.3, 0.2, 0.2, 0.2, 0.1],
        }
    }

    pub fn normal() -> Self {
        Self {
            decision_interval_ms: 1500.0,
            weights: [0.25, 0.25, 0.25, 0.15, 0.1],
        }
    }

    pub fn hard() -> Self {
        Self {
            decision_interval_ms: 1000.0,
            weights: [0.2, 0.3, 0.3, 0.1, 0.1],
        }
    }
}

/// Opponent AI settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OpponentConfig {
    #[serde(default = "DifficultyConfig::easy")]
    pub easy: DifficultyConfig,
    #[serde(default = "DifficultyConfig::normal")]
    pub normal: DifficultyConfig,
    #[serde(default = "DifficultyConfig::hard")]
    pub hard: DifficultyConfig,
    /// Upper bound of the random delay added to every decision interval
    pub jitter_ms: f64,
    pub dodge_cooldown_ms: f64,
    /// Counter player punches with a dodge
    pub reactive: bool,
    /// Probability of countering a player punch
    pub reaction_chance: f64,
    /// Delay before the next regular decision after a counter
    pub reaction_redecide_ms: f64,
}

impl OpponentConfig {
    pub fn difficulty(&self, difficulty: Difficulty) -> &DifficultyConfig {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Normal => &self.normal,
            Difficulty::Hard => &self.hard,
        }
    }
}

impl Default for OpponentConfig {
    fn default() -> Self {
        Self {
            easy: DifficultyConfig::easy(),
            normal: DifficultyConfig::normal(),
            hard: DifficultyConfig::hard(),
            jitter_ms: 1000.0,
            dodge_cooldown_ms: 2000.0,
            reactive: true,
            reaction_chance: 0.7,
            reaction_redecide_ms: 1000.0,
        }
    }
}

/// "3, 2, 1, FIGHT!" before the round starts
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CountdownConfig {
    pub steps: u32,
    pub step_ms: f64,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self { steps: 3, step_ms: 1000.0 }
    }
}

// ============================================================================
// LOADING & VALIDATION
// ============================================================================

impl GameConfig {
    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.classifier;
        check("classifier.minConfidence", c.min_confidence as f64, (0.0..=1.0).contains(&c.min_confidence))?;
        check("classifier.punchAngleDeg", c.punch_angle_deg as f64, c.punch_angle_deg > 0.0 && c.punch_angle_deg <= 180.0)?;
        check("classifier.dodgeShoulderPx", c.dodge_shoulder_px as f64, c.dodge_shoulder_px >= 0.0)?;

        non_negative("debounce.intervalMs", self.debounce.interval_ms)?;

        let combat = &self.combat;
        positive("combat.actionDurationMs", combat.action_duration_ms)?;
        positive("combat.hitDurationMs", combat.hit_duration_ms)?;
        check("combat.maxHealth", combat.max_health as f64, combat.max_health > 0)?;
        check("combat.playerPunchDamage", combat.player_punch_damage as f64, combat.player_punch_damage >= 0)?;
        check("combat.opponentPunchDamage", combat.opponent_punch_damage as f64, combat.opponent_punch_damage >= 0)?;
        for (name, entity) in [("player", &combat.player), ("opponent", &combat.opponent)] {
            entity.validate(name)?;
        }

        let opponent = &self.opponent;
        for difficulty in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            opponent.difficulty(difficulty).validate(difficulty)?;
        }
        non_negative("opponent.jitterMs", opponent.jitter_ms)?;
        non_negative("opponent.dodgeCooldownMs", opponent.dodge_cooldown_ms)?;
        check("opponent.reactionChance", opponent.reaction_chance, (0.0..=1.0).contains(&opponent.reaction_chance))?;
        non_negative("opponent.reactionRedecideMs", opponent.reaction_redecide_ms)?;

        non_negative("countdown.stepMs", self.countdown.step_ms)?;

        Ok(())
    }
}

impl EntityConfig {
    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        let (action_field, hit_field, bounds_field) = match name {
            "player" => ("combat.player.actionCooldownMs", "combat.player.hitCooldownMs", "combat.player.xBounds"),
            _ => ("combat.opponent.actionCooldownMs", "combat.opponent.hitCooldownMs", "combat.opponent.xBounds"),
        };
        non_negative(action_field, self.action_cooldown_ms)?;
        non_negative(hit_field, self.hit_cooldown_ms)?;
        if let Some((min, max)) = self.x_bounds {
            check(bounds_field, (max - min) as f64, min <= max)?;
        }
        Ok(())
    }
}

impl DifficultyConfig {
    fn validate(&self, difficulty: Difficulty) -> Result<(), ConfigError> {
        let field = match difficulty {
            Difficulty::Easy => "opponent.easy.decisionIntervalMs",
            Difficulty::Normal => "opponent.normal.decisionIntervalMs",
            Difficulty::Hard => "opponent.hard.decisionIntervalMs",
        };
        positive(field, self.decision_interval_ms)?;

        let sum: f64 = self.weights.iter().sum();
        let all_valid = self.weights.iter().all(|w| w.is_finite() && *w >= 0.0);
        if !all_valid || (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::InvalidWeights { difficulty: difficulty.as_str(), sum });
        }
        Ok(())
    }
}

fn check(field: &'static str, value: f64, ok: bool) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    check(field, value, value.is_finite() && value >= 0.0)
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    check(field, value, value.is_finite() && value > 0.0)
}
