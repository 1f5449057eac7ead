// Order item workflow: stage catalog, per-item skip sets and assignments,
// and the resolver that turns form state into the submitted assignment list

pub mod errors;
pub mod item;
pub mod model;
pub mod resolver;
pub mod stage;
pub mod submission;
pub mod transitions;

pub use errors::WorkflowError;
pub use model::{Assignment, Company, Customer, Employee, Identified, OrderItem, Product, Reference};
pub use resolver::{resolve_assignments, unassigned_required_stages};
pub use stage::Stage;
pub use submission::prepare_items;
pub use transitions::{GuardedTransitions, TransitionPolicy, Unguarded};
