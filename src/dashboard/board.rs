use thiserror::Error;
use tracing::{info, warn, Instrument};

use super::tasks::{aggregate_tasks, group_by_stage, sort_for_board, Task, Viewer};
use crate::api::{fetch_all_orders, ApiError, Order, OrdersApi, PageSettings, StatusUpdate};
use crate::observability::{api_metrics, create_board_span};
use crate::telemetry::generate_correlation_id;
use crate::workflow::{Assignment, Reference, Stage, WorkflowError};

#[derive(Debug, Error)]
pub enum BoardError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error("Self-assignment needs the acting user's employee id")]
    MissingUser,
}

/// Claim `stage` of an item for `user` on an in-memory order.
///
/// An existing assignment for the stage is taken over and marked active;
/// otherwise a new active assignment is appended.
pub fn claim_stage(order: &mut Order, item_id: &str, stage: Stage, user: &str) -> Result<(), WorkflowError> {
    let order_id = order.id.clone();
    let item = order.item_mut(item_id).ok_or_else(|| WorkflowError::ItemNotFound {
        order_id,
        item_id: item_id.to_string(),
    })?;

    if item.item_status == Stage::Cancelled {
        return Err(WorkflowError::ItemCancelled {
            item_id: item_id.to_string(),
        });
    }
    if item.disabled_stages.contains(&stage) {
        return Err(WorkflowError::StageNotAssignable { stage });
    }

    match item.assignments.iter_mut().find(|a| a.stage == stage) {
        Some(existing) => {
            existing.assigned_to = Some(Reference::from(user));
            existing.is_active = Some(true);
        }
        None => item.assignments.push(Assignment {
            is_active: Some(true),
            ..Assignment::assigned(stage, user)
        }),
    }
    Ok(())
}

/// The viewer's task list plus the mutations they can trigger from it.
///
/// Local tasks are only patched after the API confirms a change.
pub struct TaskBoard<A: OrdersApi> {
    api: A,
    viewer: Viewer,
    tasks: Vec<Task>,
}

impl<A: OrdersApi> TaskBoard<A> {
    pub fn new(api: A, viewer: Viewer) -> Self {
        Self {
            api,
            viewer,
            tasks: Vec::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn columns(&self) -> std::collections::BTreeMap<Stage, Vec<&Task>> {
        group_by_stage(&self.tasks)
    }

    pub fn task(&self, order_id: &str, item_id: &str) -> Option<&Task> {
        self.tasks
            .iter()
            .find(|t| t.order_id == order_id && t.item_id == item_id)
    }

    fn task_mut(&mut self, order_id: &str, item_id: &str) -> Option<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.order_id == order_id && t.item_id == item_id)
    }

    /// Re-fetch every order page and rebuild the task list
    pub async fn refresh(&mut self, paging: &PageSettings) -> Result<usize, BoardError> {
        let orders = fetch_all_orders(&self.api, paging).await?;
        let mut tasks = aggregate_tasks(&orders, &self.viewer);
        sort_for_board(&mut tasks);
        info!(orders = orders.len(), tasks = tasks.len(), "Task board refreshed");
        self.tasks = tasks;
        Ok(self.tasks.len())
    }

    /// Move an item to `new_stage`, retrying once with the legacy payload
    pub async fn update_status(&mut self, order_id: &str, item_id: &str, new_stage: Stage) -> Result<(), BoardError> {
        let correlation_id = generate_correlation_id();
        let span = create_board_span("update_status", order_id, item_id, &correlation_id);

        async {
            if let Err(first) = self
                .api
                .update_item_status(order_id, item_id, &StatusUpdate::ItemStatus(new_stage))
                .await
            {
                warn!(error = %first, "Status update rejected, retrying with legacy payload");
                api_metrics().record_status_fallback();
                self.api
                    .update_item_status(order_id, item_id, &StatusUpdate::Legacy(new_stage))
                    .await?;
            }

            if let Some(task) = self.task_mut(order_id, item_id) {
                task.current_stage = new_stage;
            }
            info!(stage = %new_stage, "Item status updated");
            Ok::<(), BoardError>(())
        }
        .instrument(span)
        .await
    }

    /// Claim a stage of an item for the viewer via a full-order update.
    ///
    /// Without an explicit `stage` the item's current status is claimed.
    /// Returns the stage that was claimed.
    pub async fn self_assign(
        &mut self,
        order_id: &str,
        item_id: &str,
        stage: Option<Stage>,
    ) -> Result<Stage, BoardError> {
        let user = self.viewer.id.trim().to_string();
        if user.is_empty() {
            return Err(BoardError::MissingUser);
        }

        let correlation_id = generate_correlation_id();
        let span = create_board_span("self_assign", order_id, item_id, &correlation_id);

        async {
            let mut order = self.api.fetch_order(order_id).await?;
            let stage = match stage {
                Some(stage) => stage,
                None => order
                    .item(item_id)
                    .map(|item| item.item_status)
                    .ok_or_else(|| WorkflowError::ItemNotFound {
                        order_id: order_id.to_string(),
                        item_id: item_id.to_string(),
                    })?,
            };
            claim_stage(&mut order, item_id, stage, &user)?;
            self.api.replace_order(&order).await?;

            if let Some(task) = self.task_mut(order_id, item_id) {
                task.assigned_to = user.clone();
                task.is_unassigned = false;
            }
            info!(stage = %stage, user = %user, "Stage claimed");
            Ok::<Stage, BoardError>(stage)
        }
        .instrument(span)
        .await
    }
}
