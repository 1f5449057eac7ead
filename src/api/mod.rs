pub mod client;
pub mod errors;
pub mod pagination;
pub mod types;

pub use client::{ApiClient, OrdersApi};
#[cfg(test)]
pub use client::MockOrdersApi;
pub use errors::ApiError;
pub use pagination::fetch_all_orders;
pub use types::{Order, OrderPage, OrderQuery, PageSettings, StatusUpdate};
