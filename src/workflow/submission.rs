use super::errors::WorkflowError;
use super::model::OrderItem;
use super::resolver::resolve_assignments;

/// Validate an order's items and replace each item's assignments with the
/// resolved list, ready for the create/update payload.
pub fn prepare_items(items: &[OrderItem], current_user: Option<&str>) -> Result<Vec<OrderItem>, WorkflowError> {
    if items.is_empty() {
        return Err(WorkflowError::EmptyOrder);
    }

    if let Some((index, item)) = items.iter().enumerate().find(|(_, item)| item.quantity == 0) {
        return Err(WorkflowError::InvalidQuantity {
            index: index + 1,
            quantity: item.quantity,
        });
    }

    Ok(items
        .iter()
        .map(|item| {
            let mut prepared = item.clone();
            prepared.assignments = resolve_assignments(item, current_user);
            prepared
        })
        .collect())
}
