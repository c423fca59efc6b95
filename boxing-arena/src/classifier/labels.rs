//! Action labels and their collaborator resource keys
//!
//! Every table here is an exhaustive `match`, so a new label does not
//! compile until each collaborator has a key for it.

use serde::{Deserialize, Serialize};

/// Combat action an entity can be performing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionLabel {
    #[default]
    Idle,
    LeftPunch,
    RightPunch,
    Block,
    Dodge,
    /// Hit-stun, assigned by the resolver
    Hit,
    /// Knocked out, assigned at round end
    Out,
}

/// Labels the opponent policy chooses from, in weight-vector order
pub const DECISION_LABELS: [ActionLabel; 5] = [
    ActionLabel::Idle,
    ActionLabel::LeftPunch,
    ActionLabel::RightPunch,
    ActionLabel::Block,
    ActionLabel::Dodge,
];

impl ActionLabel {
    pub fn is_punch(&self) -> bool {
        matches!(self, ActionLabel::LeftPunch | ActionLabel::RightPunch)
    }

    /// Block or dodge: incoming punches do not land
    pub fn is_defensive(&self) -> bool {
        matches!(self, ActionLabel::Block | ActionLabel::Dodge)
    }

    /// Labels only the combat layer assigns, never the classifier
    pub fn is_resolver_assigned(&self) -> bool {
        matches!(self, ActionLabel::Hit | ActionLabel::Out)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionLabel::Idle => "idle",
            ActionLabel::LeftPunch => "leftPunch",
            ActionLabel::RightPunch => "rightPunch",
            ActionLabel::Block => "block",
            ActionLabel::Dodge => "dodge",
            ActionLabel::Hit => "hit",
            ActionLabel::Out => "out",
        }
    }

    /// Status text shown next to the camera feed
    pub fn display_name(&self) -> &'static str {
        match self {
            ActionLabel::Idle => "IDLE",
            ActionLabel::LeftPunch => "LEFT PUNCH",
            ActionLabel::RightPunch => "RIGHT PUNCH",
            ActionLabel::Block => "BLOCK",
            ActionLabel::Dodge => "DODGE",
            ActionLabel::Hit => "HIT",
            ActionLabel::Out => "OUT",
        }
    }

    /// Sprite animation name
    pub fn animation_key(&self) -> &'static str {
        match self {
            ActionLabel::Idle => "idle",
            ActionLabel::LeftPunch => "leftJab",
            ActionLabel::RightPunch => "rightJab",
            ActionLabel::Block => "block",
            ActionLabel::Dodge => "dodge",
            ActionLabel::Hit => "hit",
            ActionLabel::Out => "out",
        }
    }

    /// Sound played when an entity enters this action
    pub fn sound_key(&self) -> Option<&'static str> {
        match self {
            ActionLabel::LeftPunch | ActionLabel::RightPunch => Some("punch"),
            ActionLabel::Hit => Some("hit"),
            ActionLabel::Idle | ActionLabel::Block | ActionLabel::Dodge | ActionLabel::Out => None,
        }
    }
}

impl std::fmt::Display for ActionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
