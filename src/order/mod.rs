//! Order lifecycle on top of the generic engine.
//!
//! [`OrderStateMachine`] owns the built-in order graph merged with any
//! configured extension, layers strategy and configuration hooks over the
//! built-in order rules, and writes the new state back onto the [`Order`]
//! once a transition has fully succeeded.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use lifecycle_fsm::order::*;
//! use std::sync::Arc;
//!
//! struct Noop;
//!
//! #[async_trait]
//! impl StockMovementService for Noop {
//!     async fn create_sales_for_order(&self, _: &RequestContext, _: &Order) -> Result<(), ServiceError> {
//!         Ok(())
//!     }
//! }
//!
//! #[async_trait]
//! impl PromotionService for Noop {
//!     async fn add_promotions_to_order(&self, _: &RequestContext, _: &Order) -> Result<(), ServiceError> {
//!         Ok(())
//!     }
//! }
//!
//! #[async_trait]
//! impl HistoryService for Noop {
//!     async fn create_history_entry_for_order(&self, _: &RequestContext, _: OrderHistoryEntry) -> Result<(), ServiceError> {
//!         Ok(())
//!     }
//! }
//!
//! # futures::executor::block_on(async {
//! let services = OrderServices {
//!     stock_movements: Arc::new(Noop),
//!     promotions: Arc::new(Noop),
//!     history: Arc::new(Noop),
//! };
//! let machine = OrderStateMachine::new(OrderOptions::default(), services).unwrap();
//!
//! let mut order = Order::new("T_1");
//! let err = machine
//!     .transition(&RequestContext::default(), &mut order, OrderState::ArrangingPayment)
//!     .await
//!     .unwrap_err();
//!
//! assert_eq!(err.message(), Some(EMPTY_ORDER_PAYMENT));
//! assert_eq!(order.state, OrderState::AddingItems);
//! # });
//! ```

mod entity;
mod error;
mod machine;
mod options;
mod services;
mod state;

pub use entity::{Customer, Order, OrderLine, OrderTransitionData, RequestContext};
pub use error::{
    OrderStateError, ServiceError, CANNOT_TRANSITION, EMPTY_ORDER_PAYMENT, NO_CUSTOMER_PAYMENT,
};
pub use machine::OrderStateMachine;
pub use options::{OrderHooks, OrderOptions};
pub use services::{
    HistoryEntryType, HistoryService, OrderHistoryEntry, OrderServices, PromotionService,
    StockMovementService,
};
pub use state::{order_transitions, OrderState};
