//! Downstream services invoked after an order transition commits.
//!
//! The state machine only calls these; stock rules, promotion rules and
//! history storage live behind the traits.

use super::entity::{Order, RequestContext};
use super::error::ServiceError;
use super::state::OrderState;
use crate::core::StateTransition;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Creates stock movements for an order.
#[async_trait]
pub trait StockMovementService: Send + Sync {
    /// Record sales for every line of a freshly placed order.
    async fn create_sales_for_order(
        &self,
        ctx: &RequestContext,
        order: &Order,
    ) -> Result<(), ServiceError>;
}

/// Applies promotions to an order.
#[async_trait]
pub trait PromotionService: Send + Sync {
    /// Link the promotions in effect to a freshly placed order.
    async fn add_promotions_to_order(
        &self,
        ctx: &RequestContext,
        order: &Order,
    ) -> Result<(), ServiceError>;
}

/// Kinds of history entry the state machine produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HistoryEntryType {
    OrderStateTransition,
}

/// Audit record written for every committed order transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderHistoryEntry {
    pub order_id: Uuid,
    pub entry_type: HistoryEntryType,
    pub transition: StateTransition<OrderState>,
}

/// Stores audit history for orders.
#[async_trait]
pub trait HistoryService: Send + Sync {
    async fn create_history_entry_for_order(
        &self,
        ctx: &RequestContext,
        entry: OrderHistoryEntry,
    ) -> Result<(), ServiceError>;
}

/// The downstream services an [`OrderStateMachine`](super::OrderStateMachine) calls.
#[derive(Clone)]
pub struct OrderServices {
    pub stock_movements: Arc<dyn StockMovementService>,
    pub promotions: Arc<dyn PromotionService>,
    pub history: Arc<dyn HistoryService>,
}
