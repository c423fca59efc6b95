//! Combat module - fighters, opponent AI, hit resolution and the round driver
//!
//! Re-exports only. All logic in submodules.

mod countdown;
mod entity;
mod opponent;
mod resolver;
mod round;
mod snapshot;

pub use countdown::Countdown;
pub use entity::{CombatEntity, HealthTier, Side};
pub use opponent::{ActionWeights, Difficulty, OpponentPolicy, OpponentProfile};
pub use resolver::{CombatResolver, HitReport, Resolution};
pub use round::Round;
pub use snapshot::{EntityView, GameEvent, Outcome, RoundPhase, RoundSnapshot};
