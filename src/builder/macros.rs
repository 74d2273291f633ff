//! Macros for declaring state enums.

/// Declare a unit-variant enum and implement [`State`](crate::core::State) for it.
///
/// The generated enum derives `Clone`, `PartialEq`, `Debug`, `Serialize` and
/// `Deserialize`, and names each state after its variant.
///
/// # Example
///
/// ```
/// use lifecycle_fsm::core::{State, TransitionGraph};
/// use lifecycle_fsm::state_enum;
///
/// state_enum! {
///     pub enum ShipmentState {
///         Pending,
///         Shipped,
///         Delivered,
///         Lost,
///     }
///     final: [Delivered, Lost]
///     error: [Lost]
/// }
///
/// let graph = TransitionGraph::new()
///     .with(ShipmentState::Pending, [ShipmentState::Shipped])
///     .with(ShipmentState::Shipped, [ShipmentState::Delivered, ShipmentState::Lost]);
///
/// assert_eq!(ShipmentState::Lost.name(), "Lost");
/// assert!(graph.can_transition(&ShipmentState::Shipped, &ShipmentState::Lost));
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
                }
            }

            fn is_error(&self) -> bool {
                match self {
                    $($(Self::$error => true,)*)?
                    _ => false,
                }
            }
        }
    };
}
