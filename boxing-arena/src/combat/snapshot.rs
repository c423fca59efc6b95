//! What the renderer and audio layer read each frame

use serde::Serialize;

use crate::classifier::ActionLabel;

use super::{CombatEntity, HealthTier, Side};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundPhase {
    Countdown,
    Fighting,
    Finished,
    Aborted,
}

/// Final result of a finished round, healths clamped to ≥ 0
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub winner: Side,
    pub player_health: i32,
    pub opponent_health: i32,
}

impl Outcome {
    pub fn new(winner: Side, player: &CombatEntity, opponent: &CombatEntity) -> Self {
        Self {
            winner,
            player_health: player.display_health(),
            opponent_health: opponent.display_health(),
        }
    }
}

/// Something the presentation layer should react to once
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    Countdown,
    /// Countdown over, "FIGHT!"
    Fight,
    ActionStarted { side: Side, action: ActionLabel },
    Hit { side: Side, damage: i32, health: i32 },
    RoundOver { winner: Side },
}

impl GameEvent {
    /// Sound cue, from the player's point of view for round end
    pub fn sound_key(&self) -> Option<&'static str> {
        match self {
            GameEvent::Countdown => Some("countdown"),
            GameEvent::Fight => None,
            GameEvent::ActionStarted { action, .. } => action.sound_key(),
            GameEvent::Hit { .. } => ActionLabel::Hit.sound_key(),
            GameEvent::RoundOver { winner: Side::Player } => Some("victory"),
            GameEvent::RoundOver { winner: Side::Opponent } => Some("defeat"),
        }
    }
}

/// HUD view of one fighter
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityView {
    pub health: i32,
    pub action: ActionLabel,
    pub status: &'static str,
    pub animation: &'static str,
    pub tier: HealthTier,
    pub x: f32,
    pub y: f32,
}

impl From<&CombatEntity> for EntityView {
    fn from(entity: &CombatEntity) -> Self {
        let action = entity.current_action();
        let (x, y) = entity.position();
        Self {
            health: entity.display_health(),
            action,
            status: action.display_name(),
            animation: action.animation_key(),
            tier: entity.health_tier(),
            x,
            y,
        }
    }
}

/// Everything needed to draw one frame
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSnapshot {
    pub phase: RoundPhase,
    /// 3, 2, 1 during the countdown
    pub countdown: Option<u32>,
    pub time_ms: f64,
    pub player: EntityView,
    pub opponent: EntityView,
    /// Most recent classifier output, before debouncing
    pub pose_label: ActionLabel,
    pub outcome: Option<Outcome>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatConfig;

    #[test]
    fn test_event_sounds() {
        assert_eq!(GameEvent::Countdown.sound_key(), Some("countdown"));
        assert_eq!(GameEvent::Fight.sound_key(), None);
        let punch = GameEvent::ActionStarted { side: Side::Opponent, action: ActionLabel::LeftPunch };
        assert_eq!(punch.sound_key(), Some("punch"));
        let block = GameEvent::ActionStarted { side: Side::Player, action: ActionLabel::Block };
        assert_eq!(block.sound_key(), None);
        let hit = GameEvent::Hit { side: Side::Player, damage: 15, health: 85 };
        assert_eq!(hit.sound_key(), Some("hit"));
        assert_eq!(GameEvent::RoundOver { winner: Side::Player }.sound_key(), Some("victory"));
        assert_eq!(GameEvent::RoundOver { winner: Side::Opponent }.sound_key(), Some("defeat"));
    }

    #[test]
    fn test_event_json_shape() {
        let event = GameEvent::Hit { side: Side::Opponent, damage: 10, health: 90 };
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(json["type"], "hit");
        assert_eq!(json["side"], "opponent");
        assert_eq!(json["health"], 90);
        assert_eq!(serde_json::to_value(GameEvent::Fight).unwrap()["type"], "fight");
    }

    #[test]
    fn test_outcome_clamps_health() {
        let config = CombatConfig::default();
        let mut player = CombatEntity::new(Side::Player, &config);
        let opponent = CombatEntity::new(Side::Opponent, &config);
        player.apply_damage(120, 0.0);

        let outcome = Outcome::new(Side::Opponent, &player, &opponent);
        assert_eq!(outcome.player_health, 0);
        assert_eq!(outcome.opponent_health, 100);
    }

    #[test]
    fn test_entity_view() {
        let config = CombatConfig::default();
        let mut opponent = CombatEntity::new(Side::Opponent, &config);
        opponent.request_action(ActionLabel::RightPunch, 0.0);

        let view = EntityView::from(&opponent);
        assert_eq!(view.animation, "rightJab");
        assert_eq!(view.status, "RIGHT PUNCH");
        assert_eq!(view.tier, HealthTier::High);
        assert_eq!((view.x, view.y), (420.0, 300.0));

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["action"], "rightPunch");
        assert_eq!(json["tier"], "high");
    }
}
