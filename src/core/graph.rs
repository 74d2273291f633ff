//! Transition graphs and the merge of a base graph with an override fragment.
//!
//! A graph maps every state to the ordered list of states it may move to.
//! Declaration order is kept everywhere (keys and destinations) because
//! callers present `next_states` to users as-is.

use super::state::State;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// Destinations reachable from one state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransitions<S: State> {
    pub to: Vec<S>,
}

/// Directed graph of legal transitions.
///
/// Serializes as a map `{ "State": { "to": [...] } }`, preserving the order
/// in which states were declared.
///
/// # Example
///
/// ```rust
/// use lifecycle_fsm::core::TransitionGraph;
/// use lifecycle_fsm::order::OrderState::*;
///
/// let graph = TransitionGraph::new()
///     .with(AddingItems, [ArrangingPayment, Cancelled])
///     .with(ArrangingPayment, [AddingItems])
///     .with(Cancelled, []);
///
/// assert!(graph.can_transition(&AddingItems, &Cancelled));
/// assert!(!graph.can_transition(&Cancelled, &AddingItems));
/// assert_eq!(graph.next_states(&AddingItems), &[ArrangingPayment, Cancelled]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionGraph<S: State> {
    entries: Vec<(S, StateTransitions<S>)>,
}

impl<S: State> Default for TransitionGraph<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> TransitionGraph<S> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add (or replace) the destinations of `state`, builder style.
    pub fn with(mut self, state: S, to: impl IntoIterator<Item = S>) -> Self {
        self.insert(state, to.into_iter().collect());
        self
    }

    /// Set the destinations of `state`, replacing any previous entry.
    pub fn insert(&mut self, state: S, to: Vec<S>) {
        match self.get_mut(&state) {
            Some(existing) => existing.to = to,
            None => self.entries.push((state, StateTransitions { to })),
        }
    }

    pub fn get(&self, state: &S) -> Option<&StateTransitions<S>> {
        self.entries
            .iter()
            .find(|(key, _)| key == state)
            .map(|(_, transitions)| transitions)
    }

    fn get_mut(&mut self, state: &S) -> Option<&mut StateTransitions<S>> {
        self.entries
            .iter_mut()
            .find(|(key, _)| key == state)
            .map(|(_, transitions)| transitions)
    }

    pub fn contains_state(&self, state: &S) -> bool {
        self.get(state).is_some()
    }

    /// Destinations of `from`, in declaration order.
    ///
    /// A state with no entry has no destinations.
    pub fn next_states(&self, from: &S) -> &[S] {
        self.get(from).map(|t| t.to.as_slice()).unwrap_or(&[])
    }

    pub fn can_transition(&self, from: &S, to: &S) -> bool {
        self.next_states(from).contains(to)
    }

    /// Declared states, in declaration order.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.entries.iter().map(|(state, _)| state)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, &[S])> {
        self.entries
            .iter()
            .map(|(state, transitions)| (state, transitions.to.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: State> FromIterator<(S, Vec<S>)> for TransitionGraph<S> {
    fn from_iter<I: IntoIterator<Item = (S, Vec<S>)>>(iter: I) -> Self {
        let mut graph = Self::new();
        for (state, to) in iter {
            graph.insert(state, to);
        }
        graph
    }
}

impl<S: State> Serialize for TransitionGraph<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (state, transitions) in &self.entries {
            map.serialize_entry(state, transitions)?;
        }
        map.end()
    }
}

impl<'de, S: State> Deserialize<'de> for TransitionGraph<S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GraphVisitor<S>(PhantomData<S>);

        impl<'de, S: State> Visitor<'de> for GraphVisitor<S> {
            type Value = TransitionGraph<S>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map from state to { \"to\": [states] }")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut graph = TransitionGraph::new();
                while let Some((state, transitions)) =
                    map.next_entry::<S, StateTransitions<S>>()?
                {
                    graph.insert(state, transitions.to);
                }
                Ok(graph)
            }
        }

        deserializer.deserialize_map(GraphVisitor(PhantomData))
    }
}

/// Merge an override fragment into a base graph.
///
/// For a state declared in both, the override's destinations are appended
/// after the base's (duplicates kept). A state only in the override is
/// added as declared. `base` is consumed and returned; `overrides` is
/// only read.
///
/// # Example
///
/// ```rust
/// use lifecycle_fsm::core::{merge_transitions, TransitionGraph};
/// use lifecycle_fsm::order::OrderState::*;
///
/// let base = TransitionGraph::new().with(PaymentSettled, [Fulfilled]);
/// let extra = TransitionGraph::new().with(PaymentSettled, [Cancelled]);
///
/// let merged = merge_transitions(base, Some(&extra));
/// assert_eq!(merged.next_states(&PaymentSettled), &[Fulfilled, Cancelled]);
/// ```
pub fn merge_transitions<S: State>(
    mut base: TransitionGraph<S>,
    overrides: Option<&TransitionGraph<S>>,
) -> TransitionGraph<S> {
    let Some(overrides) = overrides else {
        return base;
    };

    for (state, to) in overrides.iter() {
        match base.get_mut(state) {
            Some(existing) => existing.to.extend(to.iter().cloned()),
            None => base.insert(state.clone(), to.to_vec()),
        }
    }
    base
}
