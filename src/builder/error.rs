//! Errors raised while building a state machine configuration.

use crate::core::GraphViolation;
use thiserror::Error;

/// Errors that can occur when building a [`StateMachineConfig`](crate::fsm::StateMachineConfig).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Transitions not specified. Call .transitions(graph) before .build()")]
    MissingTransitions,

    #[error("Transition graph is invalid: {}", format_violations(.0))]
    InvalidGraph(Vec<GraphViolation>),
}

fn format_violations(violations: &[GraphViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
