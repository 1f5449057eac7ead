use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{info, warn};

/// Orders API usage metrics
#[derive(Debug, Default)]
pub struct ApiMetrics {
    pub total_requests: AtomicU64,
    pub errors: AtomicU64,
    pub status_fallbacks: AtomicU64,
    pub page_cap_hits: AtomicU64,
}

impl ApiMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_status_fallback(&self) {
        self.status_fallbacks.fetch_add(1, Ordering::Relaxed);
        warn!("Status update fell back to the legacy payload");
    }

    pub fn record_page_cap_hit(&self) {
        self.page_cap_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_stats(&self) -> ApiStats {
        ApiStats {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            status_fallbacks: self.status_fallbacks.load(Ordering::Relaxed),
            page_cap_hits: self.page_cap_hits.load(Ordering::Relaxed),
        }
    }

    pub fn log_stats(&self) {
        let stats = self.get_stats();
        info!(
            requests = stats.total_requests,
            errors = stats.errors,
            status_fallbacks = stats.status_fallbacks,
            page_cap_hits = stats.page_cap_hits,
            "Orders API metrics"
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiStats {
    pub total_requests: u64,
    pub errors: u64,
    pub status_fallbacks: u64,
    pub page_cap_hits: u64,
}

/// Global metrics instance
static API_METRICS: std::sync::LazyLock<ApiMetrics> = std::sync::LazyLock::new(ApiMetrics::new);

pub fn api_metrics() -> &'static ApiMetrics {
    &API_METRICS
}

/// Span wrapping one task-board operation
pub fn create_board_span(operation: &str, order_id: &str, item_id: &str, correlation_id: &str) -> tracing::Span {
    tracing::info_span!(
        "task_board",
        operation = operation,
        order.id = order_id,
        item.id = item_id,
        correlation.id = correlation_id,
    )
}

/// Time an operation and log its duration
pub struct OperationTimer {
    operation: String,
    start: Instant,
}

impl OperationTimer {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            start: Instant::now(),
        }
    }

    pub fn finish(self) {
        let duration = self.start.elapsed();
        tracing::debug!(
            operation = %self.operation,
            duration_ms = duration.as_millis() as u64,
            "Operation completed"
        );
    }
}
