//! Hit resolution - runs once per frame after both fighters were ticked
//!
//! A punch lands when the defender is neither blocking nor dodging. The
//! defender's hit cooldown is the only thing stopping one punch window from
//! landing on every frame it overlaps.

use serde::Serialize;

use crate::classifier::ActionLabel;
use crate::config::CombatConfig;

use super::{CombatEntity, Side};

/// One landed punch
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HitReport {
    pub attacker: Side,
    pub defender: Side,
    pub damage: i32,
    /// Defender health after the hit, clamped for display
    pub defender_health: i32,
}

/// Result of one resolver pass
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resolution {
    pub hits: Vec<HitReport>,
    /// Set once either fighter is down
    pub winner: Option<Side>,
}

/// Per-frame hit arbitration with a fixed damage pair
#[derive(Clone, Debug)]
pub struct CombatResolver {
    /// Damage of a landed player punch
    player_damage: i32,
    /// Damage of a landed opponent punch
    opponent_damage: i32,
}

impl CombatResolver {
    pub fn new(config: &CombatConfig) -> Self {
        Self {
            player_damage: config.player_punch_damage,
            opponent_damage: config.opponent_punch_damage,
        }
    }

    /// Evaluate both directions, then the round-end condition.
    ///
    /// Eligibility is read from the actions both fighters held when the pass
    /// started, so a hit landed in one direction does not cancel the other.
    pub fn resolve(&self, player: &mut CombatEntity, opponent: &mut CombatEntity, now: f64) -> Resolution {
        let player_action = player.current_action();
        let opponent_action = opponent.current_action();

        let hits = [
            Self::exchange(player_action, opponent_action, opponent, self.player_damage, now),
            Self::exchange(opponent_action, player_action, player, self.opponent_damage, now),
        ]
        .into_iter()
        .flatten()
        .collect();

        Resolution {
            hits,
            winner: Self::winner(player, opponent),
        }
    }

    fn exchange(
        attack: ActionLabel,
        defense: ActionLabel,
        defender: &mut CombatEntity,
        damage: i32,
        now: f64,
    ) -> Option<HitReport> {
        if !attack.is_punch() || defense.is_defensive() {
            return None;
        }
        if !defender.apply_damage(damage, now) {
            return None;
        }

        Some(HitReport {
            attacker: defender.side().other(),
            defender: defender.side(),
            damage,
            defender_health: defender.display_health(),
        })
    }

    /// Winner once someone is down. The player is checked first, so a double
    /// knock-out counts as a player loss.
    pub fn winner(player: &CombatEntity, opponent: &CombatEntity) -> Option<Side> {
        if player.is_down() {
            Some(Side::Opponent)
        } else if opponent.is_down() {
            Some(Side::Player)
        } else {
            None
        }
    }
}

impl Default for CombatResolver {
    fn default() -> Self {
        Self::new(&CombatConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fighters(config: &CombatConfig) -> (CombatEntity, CombatEntity) {
        (
            CombatEntity::new(Side::Player, config),
            CombatEntity::new(Side::Opponent, config),
        )
    }

    #[test]
    fn test_punch_lands_once_per_window() {
        let config = CombatConfig::default();
        let resolver = CombatResolver::new(&config);
        let (mut player, mut opponent) = fighters(&config);

        assert!(player.request_action(ActionLabel::LeftPunch, 0.0));

        let first = resolver.resolve(&mut player, &mut opponent, 0.0);
        assert_eq!(first.hits.len(), 1);
        assert_eq!(first.hits[0].attacker, Side::Player);
        assert_eq!(opponent.health(), 90);

        player.tick(16.0);
        opponent.tick(16.0);
        let second = resolver.resolve(&mut player, &mut opponent, 16.0);
        assert!(second.hits.is_empty());
        assert_eq!(opponent.health(), 90);
        assert_eq!(opponent.current_action(), ActionLabel::Hit);
    }

    #[test]
    fn test_block_and_dodge_stop_punches() {
        let config = CombatConfig::default();
        let resolver = CombatResolver::new(&config);

        for defense in [ActionLabel::Block, ActionLabel::Dodge] {
            let (mut player, mut opponent) = fighters(&config);
            opponent.request_action(defense, 0.0);
            player.request_action(ActionLabel::RightPunch, 0.0);

            let resolution = resolver.resolve(&mut player, &mut opponent, 0.0);
            assert!(resolution.hits.is_empty());
            assert_eq!(opponent.health(), 100);
        }
    }

    #[test]
    fn test_damage_is_asymmetric() {
        let config = CombatConfig::default();
        let resolver = CombatResolver::new(&config);
        let (mut player, mut opponent) = fighters(&config);
        player.request_action(ActionLabel::LeftPunch, 0.0);
        opponent.request_action(ActionLabel::RightPunch, 0.0);

        let resolution = resolver.resolve(&mut player, &mut opponent, 0.0);
        assert_eq!(resolution.hits.len(), 2);
        assert_eq!(opponent.health(), 90);
        assert_eq!(player.health(), 85);
    }

    #[test]
    fn test_idle_and_hit_do_not_attack() {
        let config = CombatConfig::default();
        let resolver = CombatResolver::new(&config);
        let (mut player, mut opponent) = fighters(&config);
        player.apply_damage(0, 0.0);

        let resolution = resolver.resolve(&mut player, &mut opponent, 1000.0);
        assert!(resolution.hits.is_empty());
        assert_eq!(resolution.winner, None);
    }

    #[test]
    fn test_double_knockout_is_player_loss() {
        let config = CombatConfig {
            max_health: 10,
            player_punch_damage: 10,
            opponent_punch_damage: 10,
            ..CombatConfig::default()
        };
        let resolver = CombatResolver::new(&config);
        let (mut player, mut opponent) = fighters(&config);
        player.request_action(ActionLabel::LeftPunch, 0.0);
        opponent.request_action(ActionLabel::RightPunch, 0.0);

        let resolution = resolver.resolve(&mut player, &mut opponent, 0.0);
        assert_eq!(player.health(), 0);
        assert_eq!(opponent.health(), 0);
        assert_eq!(resolution.winner, Some(Side::Opponent));
    }

    #[test]
    fn test_knockout_winner() {
        let config = CombatConfig { max_health: 10, ..CombatConfig::default() };
        let resolver = CombatResolver::new(&config);
        let (mut player, mut opponent) = fighters(&config);
        player.request_action(ActionLabel::RightPunch, 0.0);

        let resolution = resolver.resolve(&mut player, &mut opponent, 0.0);
        assert_eq!(resolution.winner, Some(Side::Player));
        assert_eq!(resolution.hits[0].defender_health, 0);
    }
}
