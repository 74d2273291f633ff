//! Core state machine types.
//!
//! Everything in this module is pure data and pure functions:
//! - States via the `State` trait
//! - Transition graphs and their merge
//! - Guard outcomes
//! - Graph validation
//! - Immutable transition history

mod graph;
mod history;
mod outcome;
mod state;
mod validation;

pub use graph::{merge_transitions, StateTransitions, TransitionGraph};
pub use history::{StateHistory, StateTransition};
pub use outcome::{first_settled, TransitionOutcome};
pub use state::State;
pub use validation::{validate_transition_graph, GraphViolation};
