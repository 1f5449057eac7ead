use thiserror::Error;

use super::stage::Stage;

/// Validation failures raised locally, before anything is sent upstream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("Unknown stage: {0}")]
    UnknownStage(String),

    #[error("Stage {0} is a control state and cannot be skipped")]
    ControlStageNotSkippable(Stage),

    #[error("Stage {stage} cannot carry an assignment on this item")]
    StageNotAssignable { stage: Stage },

    #[error("Transition from {from} to {to} is not permitted")]
    TransitionRejected { from: Stage, to: Stage },

    #[error("Item {item_id} is cancelled and cannot be claimed")]
    ItemCancelled { item_id: String },

    #[error("Item {item_id} not found on order {order_id}")]
    ItemNotFound { order_id: String, item_id: String },

    #[error("An order needs at least one item")]
    EmptyOrder,

    #[error("Item #{index} has quantity {quantity}; quantity must be at least 1")]
    InvalidQuantity { index: usize, quantity: u32 },
}
