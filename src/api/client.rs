use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Jitter, Quota, RateLimiter};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::errors::ApiError;
use super::types::{Order, OrderPage, OrderQuery, StatusUpdate};
use crate::config::ApiConfig;
use crate::observability::{api_metrics, OperationTimer};

#[cfg(test)]
use mockall::automock;

/// Operations the workflow needs from the Orders API.
///
/// Full-order replacement lives behind this seam so a version check can be
/// added to `replace_order` without touching callers.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait OrdersApi: Send + Sync {
    /// One page of `GET /api/orders`
    async fn fetch_orders_page(&self, query: &OrderQuery) -> Result<OrderPage, ApiError>;

    /// `GET /api/orders/{orderId}`
    async fn fetch_order(&self, order_id: &str) -> Result<Order, ApiError>;

    /// `PATCH /api/orders/{orderId}/items/{itemId}/status`
    async fn update_item_status(&self, order_id: &str, item_id: &str, update: &StatusUpdate) -> Result<(), ApiError>;

    /// `PUT /api/orders/{orderId}` with the complete order
    async fn replace_order(&self, order: &Order) -> Result<(), ApiError>;
}

/// Rate-limited reqwest client for the Orders API
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
    rate_limiter: Arc<DefaultDirectRateLimiter>,
}

impl ApiClient {
    pub fn new(settings: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = settings
            .base_url
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .ok_or(ApiError::MissingBaseUrl)?
            .to_string();

        let per_second = NonZeroU32::new(settings.rate_limit.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(settings.rate_limit.burst_capacity).unwrap_or(per_second);
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_second(per_second).allow_burst(burst)));

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds.max(1)))
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            http,
            base_url,
            token: settings.token.clone().filter(|t| !t.trim().is_empty()),
            rate_limiter,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and return the raw body of a 2xx response
    async fn execute(
        &self,
        method: Method,
        path: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder + Send,
    ) -> Result<String, ApiError> {
        let url = self.url(path);
        let metrics = api_metrics();

        self.rate_limiter
            .until_ready_with_jitter(Jitter::up_to(Duration::from_millis(50)))
            .await;

        let timer = OperationTimer::new(&format!("{method} {path}"));
        metrics.record_request();
        debug!(%method, %url, "Sending Orders API request");

        let mut request = build(self.http.request(method.clone(), &url));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let result = async {
            let response = request.send().await.map_err(|source| ApiError::Http {
                url: url.clone(),
                source,
            })?;
            let status = response.status();
            let body = response.text().await.map_err(|source| ApiError::Http {
                url: url.clone(),
                source,
            })?;

            if status == StatusCode::NOT_FOUND {
                return Err(ApiError::NotFound { url: url.clone() });
            }
            if !status.is_success() {
                return Err(ApiError::Status {
                    method: method.to_string(),
                    url: url.clone(),
                    status: status.as_u16(),
                    body,
                });
            }
            Ok(body)
        }
        .await;

        timer.finish();
        if result.is_err() {
            metrics.record_error();
        }
        result
    }

    fn decode<T: DeserializeOwned>(url: String, body: &str) -> Result<T, ApiError> {
        serde_json::from_str(body).map_err(|source| ApiError::Decode { url, source })
    }
}

#[async_trait]
impl OrdersApi for ApiClient {
    async fn fetch_orders_page(&self, query: &OrderQuery) -> Result<OrderPage, ApiError> {
        let pairs = query.to_pairs();
        let body = self
            .execute(Method::GET, "/api/orders", |req| req.query(&pairs))
            .await?;
        Self::decode(self.url("/api/orders"), &body)
    }

    async fn fetch_order(&self, order_id: &str) -> Result<Order, ApiError> {
        let path = format!("/api/orders/{order_id}");
        let body = self.execute(Method::GET, &path, |req| req).await?;
        Self::decode(self.url(&path), &body)
    }

    async fn update_item_status(&self, order_id: &str, item_id: &str, update: &StatusUpdate) -> Result<(), ApiError> {
        let path = format!("/api/orders/{order_id}/items/{item_id}/status");
        self.execute(Method::PATCH, &path, |req| req.json(update)).await?;
        Ok(())
    }

    async fn replace_order(&self, order: &Order) -> Result<(), ApiError> {
        let path = format!("/api/orders/{}", order.id);
        let payload = order.normalized();
        self.execute(Method::PUT, &path, |req| req.json(&payload)).await?;
        Ok(())
    }
}
