//! Action debouncer between the classifier and the player entity
//!
//! Per-frame classification chatters near rule boundaries (idle ↔ dodge while
//! the shoulders hover around the threshold). Only label changes that are at
//! least one update interval apart get through.

use crate::combat::CombatEntity;

use super::ActionLabel;

/// Throttles classifier output and drops repeated labels
#[derive(Clone, Debug)]
pub struct ActionDebouncer {
    /// Minimum spacing between two emitted changes (ms)
    update_interval: f64,
    last_emitted: ActionLabel,
    /// None until the first change was emitted
    last_emit_at: Option<f64>,
}

impl ActionDebouncer {
    pub fn new(update_interval: f64) -> Self {
        Self {
            update_interval,
            last_emitted: ActionLabel::Idle,
            last_emit_at: None,
        }
    }

    /// Feed one classification. Returns the new label if it is a change
    /// that may be emitted now.
    pub fn on_pose_classified(&mut self, label: ActionLabel, now: f64) -> Option<ActionLabel> {
        if label == self.last_emitted {
            return None;
        }

        let interval_elapsed = self
            .last_emit_at
            .map_or(true, |at| now - at >= self.update_interval);
        if !interval_elapsed {
            return None;
        }

        self.last_emitted = label;
        self.last_emit_at = Some(now);
        Some(label)
    }

    /// Feed one classification and forward a change to the bound entity.
    ///
    /// `live` is the owning round's running flag, read when the (possibly
    /// late) inference result arrives. A stopped round gets nothing.
    /// Returns the emitted label and whether the entity accepted it.
    ///
    /// A change the entity rejects is rolled back, so a held pose is retried
    /// on the next sample past the update interval.
    pub fn forward(
        &mut self,
        label: ActionLabel,
        now: f64,
        live: bool,
        entity: &mut CombatEntity,
    ) -> Option<(ActionLabel, bool)> {
        if !live {
            log::debug!("discarding pose result, round not live: {}", label);
            return None;
        }

        let previous = (self.last_emitted, self.last_emit_at);
        let change = self.on_pose_classified(label, now)?;
        let accepted = entity.request_action(change, now);
        if !accepted {
            (self.last_emitted, self.last_emit_at) = previous;
        }
        Some((change, accepted))
    }

    /// Last label let through
    pub fn last_emitted(&self) -> ActionLabel {
        self.last_emitted
    }

    /// Clear history (new round)
    pub fn reset(&mut self) {
        self.last_emitted = ActionLabel::Idle;
        self.last_emit_at = None;
    }
}

impl Default for ActionDebouncer {
    fn default() -> Self {
        Self::new(100.0)
    }
}
