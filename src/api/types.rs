use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::priority::Priority;
use crate::workflow::{Company, Customer, OrderItem, Reference, Stage};

/// An order as served by `GET /api/orders/{id}` and sent back on `PUT`.
///
/// Fields this crate does not model are kept in `extra` so a full-order
/// update does not drop them. Nullable fields distinguish absent (`None`)
/// from an explicit `null` (`Some(None)`) for the same reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    /// String or number, depending on the backend version
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub order_number: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub priority: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub customer: Option<Option<Reference<Customer>>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub customer_company: Option<Option<Reference<Company>>>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A key that appears in the payload, even as `null`, decodes to `Some`
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl Order {
    pub fn order_number_label(&self) -> String {
        match &self.order_number {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => self.id.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn due_date(&self) -> Option<&str> {
        self.due_date.as_ref()?.as_deref()
    }

    pub fn priority(&self) -> Priority {
        Priority::from_label(self.priority.as_ref().and_then(|p| p.as_deref()))
    }

    /// Company name, else the customer's full name
    pub fn client_name(&self) -> Option<String> {
        let company = self
            .customer_company
            .as_ref()
            .and_then(Option::as_ref)
            .and_then(Reference::embedded)
            .and_then(|c| c.name.clone())
            .filter(|name| !name.trim().is_empty());

        company.or_else(|| {
            self.customer
                .as_ref()
                .and_then(Option::as_ref)
                .and_then(Reference::embedded)
                .and_then(Customer::full_name)
        })
    }

    pub fn item(&self, item_id: &str) -> Option<&OrderItem> {
        self.items.iter().find(|i| i.id.as_deref() == Some(item_id))
    }

    pub fn item_mut(&mut self, item_id: &str) -> Option<&mut OrderItem> {
        self.items.iter_mut().find(|i| i.id.as_deref() == Some(item_id))
    }

    /// Copy of the order with every reference reduced to its bare id, as the
    /// full-update endpoint expects
    pub fn normalized(&self) -> Order {
        let mut order = self.clone();
        order.customer = order
            .customer
            .as_ref()
            .map(|c| c.as_ref().map(Reference::to_id_only));
        order.customer_company = order
            .customer_company
            .as_ref()
            .map(|c| c.as_ref().map(Reference::to_id_only));
        for item in &mut order.items {
            item.normalize_references();
        }
        order
    }
}

/// One page of `GET /api/orders`. The list arrives under `data`, `orders`
/// or `items` depending on the endpoint version.
///
/// Orders that fail to decode are logged and left out so one bad document
/// does not hide the whole board. `GET /api/orders/{id}` stays strict since
/// its result is written back.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderPage {
    #[serde(default, alias = "orders", alias = "items", deserialize_with = "decodable_orders")]
    pub data: Vec<Order>,
    #[serde(default)]
    pub total: Option<u64>,
}

fn decodable_orders<'de, D>(deserializer: D) -> Result<Vec<Order>, D::Error>
where
    D: Deserializer<'de>,
{
    let documents: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    let orders = documents
        .unwrap_or_default()
        .into_iter()
        .filter_map(|document| {
            let id = document.get("_id").and_then(Value::as_str).unwrap_or("-").to_string();
            serde_json::from_value::<Order>(document)
                .map_err(|error| warn!(order.id = %id, %error, "Skipping order that failed to decode"))
                .ok()
        })
        .collect();
    Ok(orders)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderQuery {
    pub page: u32,
    pub limit: u32,
    pub sort_by: String,
    pub order: String,
}

impl OrderQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("sortBy", self.sort_by.clone()),
            ("order", self.order.clone()),
        ]
    }
}

/// Paging parameters for walking the order list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSettings {
    pub page_size: u32,
    pub max_pages: u32,
    pub sort_by: String,
    pub sort_order: String,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            page_size: 50,
            max_pages: 20,
            sort_by: "dueDate".to_string(),
            sort_order: "asc".to_string(),
        }
    }
}

impl PageSettings {
    pub fn query(&self, page: u32) -> OrderQuery {
        OrderQuery {
            page,
            limit: self.page_size,
            sort_by: self.sort_by.clone(),
            order: self.sort_order.clone(),
        }
    }
}

/// Body of `PATCH /api/orders/{orderId}/items/{itemId}/status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusUpdate {
    #[serde(rename = "itemStatus")]
    ItemStatus(Stage),
    /// Shape accepted by older backends
    #[serde(rename = "stage")]
    Legacy(Stage),
}
