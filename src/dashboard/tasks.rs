use serde::Serialize;
use std::collections::BTreeMap;

use crate::api::Order;
use crate::priority::Priority;
use crate::workflow::{OrderItem, Stage};

pub const ALL_USERS: &str = "All Users";
pub const NOT_ASSIGNED: &str = "Not assigned to anyone";

/// Who is looking at the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub id: String,
    pub is_admin: bool,
}

impl Viewer {
    pub fn employee(id: &str) -> Self {
        Self {
            id: id.to_string(),
            is_admin: false,
        }
    }

    pub fn admin(id: &str) -> Self {
        Self {
            id: id.to_string(),
            is_admin: true,
        }
    }
}

/// One order item flattened into a board row. Derived on every fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub order_id: String,
    pub item_id: String,
    pub assignment_id: Option<String>,
    pub order_number: String,
    pub product_name: String,
    pub quantity: u32,
    pub client: String,
    pub due_date: Option<String>,
    pub current_stage: Stage,
    pub priority: Priority,
    pub assigned_to: String,
    pub is_unassigned: bool,
}

/// Flatten fetched orders into the viewer's task list.
///
/// Admins get one task per item. Everyone else gets items whose current
/// stage is assigned to them plus items nobody holds at their current stage.
pub fn aggregate_tasks(orders: &[Order], viewer: &Viewer) -> Vec<Task> {
    let mut tasks = Vec::new();

    for order in orders {
        for item in &order.items {
            let current = item.current_assignment();

            let (assigned_to, is_unassigned) = if viewer.is_admin {
                (ALL_USERS.to_string(), false)
            } else {
                match current.and_then(|a| a.assignee_id()) {
                    None => (NOT_ASSIGNED.to_string(), true),
                    Some(id) if id == viewer.id => (id.to_string(), false),
                    Some(_) => continue,
                }
            };

            tasks.push(build_task(order, item, assigned_to, is_unassigned));
        }
    }

    tasks
}

fn build_task(order: &Order, item: &OrderItem, assigned_to: String, is_unassigned: bool) -> Task {
    Task {
        order_id: order.id.clone(),
        item_id: item.id.clone().unwrap_or_default(),
        assignment_id: item
            .assignment_for(item.item_status)
            .and_then(|a| a.id.clone()),
        order_number: order.order_number_label(),
        product_name: item.product_name().unwrap_or("Unknown product").to_string(),
        quantity: item.quantity,
        client: order.client_name().unwrap_or_else(|| "Unknown client".to_string()),
        due_date: order.due_date().map(str::to_string),
        current_stage: item.item_status,
        priority: order.priority(),
        assigned_to,
        is_unassigned,
    }
}

/// Highest priority first, then earliest due date, then order number
pub fn sort_for_board(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| match (&a.due_date, &b.due_date) {
                (Some(x), Some(y)) => x.cmp(y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            })
            .then_with(|| a.order_number.cmp(&b.order_number))
    });
}

/// Board columns keyed by stage, in catalog order
pub fn group_by_stage(tasks: &[Task]) -> BTreeMap<Stage, Vec<&Task>> {
    let mut columns: BTreeMap<Stage, Vec<&Task>> = BTreeMap::new();
    for task in tasks {
        columns.entry(task.current_stage).or_default().push(task);
    }
    columns
}
