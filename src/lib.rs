// inkflow library - print-shop order item workflow
// This exposes the core components for testing and integration

pub mod api;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod observability;
pub mod priority;
pub mod telemetry;
pub mod workflow;

// Re-export key types for easy access
pub use api::{ApiClient, ApiError, Order, OrdersApi, PageSettings, StatusUpdate};
pub use config::{config, init_config, InkflowConfig};
pub use dashboard::{aggregate_tasks, claim_stage, BoardError, Task, TaskBoard, Viewer};
pub use observability::{api_metrics, ApiMetrics, OperationTimer};
pub use priority::Priority;
pub use telemetry::{generate_correlation_id, init_telemetry};
pub use workflow::{
    prepare_items, resolve_assignments, Assignment, GuardedTransitions, OrderItem, Reference, Stage,
    TransitionPolicy, Unguarded, WorkflowError,
};
