use tracing::{debug, warn};

use super::client::OrdersApi;
use super::errors::ApiError;
use super::types::{Order, PageSettings};
use crate::observability::api_metrics;

/// Walk `GET /api/orders` page by page and concatenate the results.
///
/// Stops on a short page, once the reported `total` is reached, or after
/// `max_pages` pages.
pub async fn fetch_all_orders<A: OrdersApi + ?Sized>(api: &A, paging: &PageSettings) -> Result<Vec<Order>, ApiError> {
    let mut orders = Vec::new();

    for page in 1..=paging.max_pages {
        let result = api.fetch_orders_page(&paging.query(page)).await?;
        let received = result.data.len();
        orders.extend(result.data);
        debug!(page, received, collected = orders.len(), "Fetched order page");

        let reached_total = result.total.is_some_and(|total| orders.len() as u64 >= total);
        if received < paging.page_size as usize || reached_total {
            return Ok(orders);
        }
    }

    api_metrics().record_page_cap_hit();
    warn!(
        max_pages = paging.max_pages,
        collected = orders.len(),
        "Stopped paging orders at the page cap; the board may be incomplete"
    );
    Ok(orders)
}
