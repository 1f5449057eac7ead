use std::collections::BTreeMap;

use super::model::{Assignment, OrderItem};
use super::stage::Stage;

/// Compute the assignment list to submit for an item.
///
/// Cancelled items submit nothing. Otherwise every assignable stage keeps its
/// existing assignee when one is named, and missing stages default to
/// `current_user` when that is known. Stages stay unassigned when no current
/// user is available. Output follows catalog order with one entry per stage.
pub fn resolve_assignments(item: &OrderItem, current_user: Option<&str>) -> Vec<Assignment> {
    if item.item_status == Stage::Cancelled {
        return Vec::new();
    }

    let required = item.assignable_stages();
    let mut resolved: BTreeMap<Stage, Assignment> = BTreeMap::new();

    for assignment in &item.assignments {
        if required.contains(&assignment.stage) && assignment.assignee_id().is_some() {
            resolved
                .entry(assignment.stage)
                .or_insert_with(|| assignment.clone());
        }
    }

    if let Some(user) = current_user.map(str::trim).filter(|u| !u.is_empty()) {
        for stage in &required {
            resolved.entry(*stage).or_insert_with(|| Assignment {
                stage_notes: Some(String::new()),
                ..Assignment::assigned(*stage, user)
            });
        }
    }

    resolved.into_values().collect()
}

/// Assignable stages that `resolved` leaves without an assignee
pub fn unassigned_required_stages(item: &OrderItem, resolved: &[Assignment]) -> Vec<Stage> {
    if item.item_status == Stage::Cancelled {
        return Vec::new();
    }
    item.assignable_stages()
        .into_iter()
        .filter(|stage| {
            !resolved
                .iter()
                .any(|a| a.stage == *stage && a.assignee_id().is_some())
        })
        .collect()
}
