//! The `State` trait implemented by every state an FSM can occupy.
//!
//! States are plain values. The engine compares them, clones them into
//! history records and serializes them into configuration, so the trait
//! bundles exactly those capabilities.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A position in a transition graph.
///
/// Unit-variant enums get an implementation from
/// [`state_enum!`](crate::state_enum). Implement it by hand when a state
/// carries data, as [`OrderState`](crate::order::OrderState) does for
/// configuration-defined states; `name` may borrow from that data.
///
/// ```rust
/// use lifecycle_fsm::core::{State, TransitionGraph};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Parcel {
///     Packed,
///     InTransit { carrier: String },
///     Returned,
/// }
///
/// impl State for Parcel {
///     fn name(&self) -> &str {
///         match self {
///             Self::Packed => "Packed",
///             Self::InTransit { carrier } => carrier,
///             Self::Returned => "Returned",
///         }
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Returned)
///     }
/// }
///
/// let dhl = Parcel::InTransit { carrier: "dhl".into() };
/// let graph = TransitionGraph::new().with(Parcel::Packed, [dhl.clone()]);
///
/// assert_eq!(dhl.name(), "dhl");
/// assert!(graph.can_transition(&Parcel::Packed, &dhl));
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// The state's name, used in logs and error messages.
    fn name(&self) -> &str;

    /// Whether this is a terminal state.
    ///
    /// Purely informational: the engine only follows the transition graph,
    /// so a terminal state is one whose destination list is empty.
    fn is_final(&self) -> bool {
        false
    }

    /// Whether this state represents a failure.
    fn is_error(&self) -> bool {
        false
    }
}
