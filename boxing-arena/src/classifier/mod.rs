//! Classifier module - pose → action label, then debounced
//!
//! Re-exports only. All logic in submodules.

mod labels;
mod rules;
mod debounce;

pub use labels::{ActionLabel, DECISION_LABELS};
pub use rules::PoseClassifier;
pub use debounce::ActionDebouncer;
