//! Structural validation of transition graphs.
//!
//! Every violation is collected rather than stopping at the first one, so
//! a misconfigured override reports all of its dangling states at once.

use super::graph::TransitionGraph;
use super::state::State;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A structural problem in a transition graph.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GraphViolation {
    #[error("state '{from}' transitions to '{to}', which has no entry in the graph")]
    UndefinedTarget { from: String, to: String },

    #[error("initial state '{state}' has no entry in the graph")]
    UndefinedInitialState { state: String },
}

/// Check that every destination is itself a declared state and, when
/// given, that the initial state is declared.
///
/// # Example
///
/// ```rust
/// use lifecycle_fsm::core::{validate_transition_graph, TransitionGraph};
/// use lifecycle_fsm::order::OrderState::*;
///
/// let graph = TransitionGraph::new()
///     .with(AddingItems, [ArrangingPayment])
///     .with(ArrangingPayment, [PaymentSettled]);
///
/// // PaymentSettled is reachable but never declared.
/// assert!(validate_transition_graph(&graph, Some(&AddingItems)).is_failure());
/// ```
pub fn validate_transition_graph<S: State>(
    graph: &TransitionGraph<S>,
    initial: Option<&S>,
) -> Validation<(), NonEmptyVec<GraphViolation>> {
    let mut checks: Vec<Validation<(), NonEmptyVec<GraphViolation>>> = Vec::new();

    if let Some(initial) = initial {
        let check = if graph.contains_state(initial) {
            Validation::success(())
        } else {
            Validation::fail(GraphViolation::UndefinedInitialState {
                state: initial.name().to_string(),
            })
        };
        checks.push(check);
    }

    for (from, destinations) in graph.iter() {
        for to in destinations {
            let check = if graph.contains_state(to) {
                Validation::success(())
            } else {
                Validation::fail(GraphViolation::UndefinedTarget {
                    from: from.name().to_string(),
                    to: to.name().to_string(),
                })
            };
            checks.push(check);
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_enum;

    state_enum! {
        enum Doc {
            Draft,
            Review,
            Published,
            Archived,
        }
        final: [Archived]
    }

    #[test]
    fn closed_graph_is_valid() {
        let graph = TransitionGraph::new()
            .with(Doc::Draft, [Doc::Review])
            .with(Doc::Review, [Doc::Draft, Doc::Published])
            .with(Doc::Published, []);

        assert!(validate_transition_graph(&graph, Some(&Doc::Draft)).is_success());
    }

    #[test]
    fn empty_graph_without_initial_is_valid() {
        let graph: TransitionGraph<Doc> = TransitionGraph::new();
        assert!(validate_transition_graph(&graph, None).is_success());
    }

    #[test]
    fn collects_every_violation() {
        let graph = TransitionGraph::new()
            .with(Doc::Review, [Doc::Published, Doc::Archived])
            .with(Doc::Published, []);

        match validate_transition_graph(&graph, Some(&Doc::Draft)) {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, GraphViolation::UndefinedInitialState { .. })));
                assert!(errors.iter().any(|e| *e
                    == GraphViolation::UndefinedTarget {
                        from: "Review".to_string(),
                        to: "Archived".to_string(),
                    }));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }
}
