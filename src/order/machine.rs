//! The order state machine: the generic engine wired to order rules.

use super::entity::{Order, OrderTransitionData, RequestContext};
use super::error::{OrderStateError, ServiceError, EMPTY_ORDER_PAYMENT, NO_CUSTOMER_PAYMENT};
use super::options::OrderOptions;
use super::services::{HistoryEntryType, OrderHistoryEntry, OrderServices};
use super::state::{order_transitions, OrderState};
use crate::builder::StateMachineConfigBuilder;
use crate::core::{merge_transitions, StateTransition, TransitionGraph, TransitionOutcome};
use crate::fsm::{start_hook, Fsm, StartHook, StateMachineConfig};
use chrono::Utc;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::sync::Arc;
use tracing::info;

type OrderConfig = StateMachineConfig<OrderState, OrderTransitionData, OrderStateError>;
type OrderStartHook = StartHook<OrderState, OrderTransitionData>;

/// Drives orders through their lifecycle.
///
/// Holds the merged transition graph and the composed hooks. Each call
/// positions a fresh [`Fsm`] at the order's stored state.
///
/// Guards run in order, stopping at the first rejection:
/// 1. the process strategy's start hook, or else the configured one
/// 2. the built-in payment prerequisites (order has lines and a customer)
///
/// After a commit:
/// 1. the process strategy's end hook, or else the configured one
/// 2. built-in side effects (placing the order, deactivating on cancel)
/// 3. a history entry for the transition
#[derive(Clone)]
pub struct OrderStateMachine {
    config: OrderConfig,
}

impl OrderStateMachine {
    pub fn new(options: OrderOptions, services: OrderServices) -> Result<Self, OrderStateError> {
        let OrderOptions {
            transitions,
            hooks,
            process,
        } = options;
        let process = process.unwrap_or_default();

        let transitions = merge_transitions(order_transitions(), transitions.as_ref());

        let builtin: OrderStartHook = start_hook(require_payment_prerequisites);
        let guards: Arc<[OrderStartHook]> = process
            .on_transition_start
            .or(hooks.on_transition_start)
            .into_iter()
            .chain([builtin])
            .collect();
        let on_end = process.on_transition_end.or(hooks.on_transition_end);
        let on_error = process.on_error.or(hooks.on_error);

        let config = StateMachineConfigBuilder::<_, OrderTransitionData, OrderStateError>::new()
            .transitions(transitions)
            .initial(Self::initial_state())
            .on_transition_start(move |from, to, data| {
                let guards = guards.clone();
                async move { evaluate_guards(&guards, from, to, data).await }.boxed()
            })
            .on_transition_end(move |from, to, data| {
                let on_end = on_end.clone();
                let services = services.clone();
                async move {
                    if let Some(hook) = &on_end {
                        hook(from, to, &mut *data).await?;
                    }
                    apply_side_effects(&services, to, data).await?;
                    services
                        .history
                        .create_history_entry_for_order(
                            &data.ctx,
                            OrderHistoryEntry {
                                order_id: data.order.id,
                                entry_type: HistoryEntryType::OrderStateTransition,
                                transition: StateTransition::now(from.clone(), to.clone()),
                            },
                        )
                        .await?;
                    Ok(())
                }
                .boxed()
            })
            .on_error(move |from, to, message| {
                if let Some(hook) = &on_error {
                    hook(from, to, message)?;
                }
                Err(OrderStateError::illegal_transition(from, to, message))
            })
            .build()?;

        Ok(Self { config })
    }

    /// The state every new order starts in.
    pub fn initial_state() -> OrderState {
        OrderState::AddingItems
    }

    /// The merged transition graph.
    pub fn transitions(&self) -> &TransitionGraph<OrderState> {
        &self.config.transitions
    }

    pub fn can_transition(&self, current: &OrderState, target: &OrderState) -> bool {
        Fsm::new(&self.config, current.clone()).can_transition_to(target)
    }

    pub fn next_states(&self, order: &Order) -> Vec<OrderState> {
        Fsm::new(&self.config, order.state.clone())
            .next_states()
            .to_vec()
    }

    /// Move `order` to `state`.
    ///
    /// The hooks work on a copy of the order. It is written back, with its
    /// new state, only once the transition and every side effect succeeded;
    /// on any error `order` is left exactly as it was.
    pub async fn transition(
        &self,
        ctx: &RequestContext,
        order: &mut Order,
        state: OrderState,
    ) -> Result<(), OrderStateError> {
        let mut fsm = Fsm::new(&self.config, order.state.clone());
        let mut data = OrderTransitionData {
            ctx: ctx.clone(),
            order: order.clone(),
        };

        fsm.transition_to(state.clone(), &mut data).await?;

        if fsm.current_state() == &state {
            data.order.state = state;
            *order = data.order;
            info!(
                order = %order.code,
                from = %fsm.initial_state(),
                to = %order.state,
                "order state updated"
            );
        }
        Ok(())
    }
}

async fn evaluate_guards(
    guards: &[OrderStartHook],
    from: &OrderState,
    to: &OrderState,
    data: &OrderTransitionData,
) -> TransitionOutcome {
    for guard in guards {
        let outcome = guard(from, to, data).await;
        if outcome.is_reject() {
            return outcome;
        }
    }
    TransitionOutcome::Proceed
}

fn require_payment_prerequisites<'a>(
    _from: &'a OrderState,
    to: &'a OrderState,
    data: &'a OrderTransitionData,
) -> BoxFuture<'a, TransitionOutcome> {
    let outcome = if *to != OrderState::ArrangingPayment {
        TransitionOutcome::Proceed
    } else if data.order.is_empty() {
        TransitionOutcome::reject_with(EMPTY_ORDER_PAYMENT)
    } else if data.order.customer.is_none() {
        TransitionOutcome::reject_with(NO_CUSTOMER_PAYMENT)
    } else {
        TransitionOutcome::Proceed
    };
    async move { outcome }.boxed()
}

async fn apply_side_effects(
    services: &OrderServices,
    to: &OrderState,
    data: &mut OrderTransitionData,
) -> Result<(), ServiceError> {
    if to.is_payment_complete() {
        data.order.active = false;
        data.order.order_placed_at = Some(Utc::now());
        services
            .stock_movements
            .create_sales_for_order(&data.ctx, &data.order)
            .await?;
        services
            .promotions
            .add_promotions_to_order(&data.ctx, &data.order)
            .await?;
    }
    if *to == OrderState::Cancelled {
        data.order.active = false;
    }
    Ok(())
}
