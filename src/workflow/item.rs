// Item workflow model: skip sets, status changes and lazily created assignments

use super::errors::WorkflowError;
use super::model::{Assignment, OrderItem, Reference};
use super::stage::Stage;
use super::transitions::TransitionPolicy;

impl OrderItem {
    /// Skip or un-skip a work stage. Disabling drops any assignment held for
    /// that stage. Redundant toggles are no-ops.
    pub fn toggle_disabled_stage(&mut self, stage: Stage, disabled: bool) -> Result<(), WorkflowError> {
        if !stage.is_work_state() {
            return Err(WorkflowError::ControlStageNotSkippable(stage));
        }

        if disabled {
            self.disabled_stages.insert(stage);
            self.assignments.retain(|a| a.stage != stage);
        } else {
            self.disabled_stages.remove(&stage);
        }
        Ok(())
    }

    /// Unguarded status setter. Cancelling clears every assignment.
    pub fn set_item_status(&mut self, stage: Stage) {
        self.item_status = stage;
        if stage == Stage::Cancelled {
            self.assignments.clear();
        }
    }

    /// Status change routed through a transition policy
    pub fn transition_to(&mut self, stage: Stage, policy: &dyn TransitionPolicy) -> Result<(), WorkflowError> {
        let from = self.item_status;
        if !policy.permits(self, from, stage) {
            return Err(WorkflowError::TransitionRejected { from, to: stage });
        }
        self.set_item_status(stage);
        Ok(())
    }

    /// Catalog stages minus the skipped ones, in catalog order
    pub fn available_stages(&self) -> Vec<Stage> {
        Stage::CATALOG
            .into_iter()
            .filter(|stage| !self.disabled_stages.contains(stage))
            .collect()
    }

    /// Available work stages, i.e. the stages that need an assignee
    pub fn assignable_stages(&self) -> Vec<Stage> {
        self.available_stages()
            .into_iter()
            .filter(|stage| stage.is_work_state())
            .collect()
    }

    pub fn is_assignable(&self, stage: Stage) -> bool {
        stage.is_work_state() && !self.disabled_stages.contains(&stage)
    }

    pub fn assignment_for(&self, stage: Stage) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.stage == stage)
    }

    /// Assignment for `stage`, created on first access
    pub fn assignment_mut_or_insert(&mut self, stage: Stage) -> Result<&mut Assignment, WorkflowError> {
        if !self.is_assignable(stage) {
            return Err(WorkflowError::StageNotAssignable { stage });
        }

        let index = match self.assignments.iter().position(|a| a.stage == stage) {
            Some(index) => index,
            None => {
                self.assignments.push(Assignment::new(stage));
                self.assignments.len() - 1
            }
        };
        Ok(&mut self.assignments[index])
    }

    /// Set assignee and notes for a work stage. A blank employee id unassigns.
    pub fn assign(&mut self, stage: Stage, employee_id: &str, notes: Option<&str>) -> Result<(), WorkflowError> {
        let assignment = self.assignment_mut_or_insert(stage)?;
        assignment.assigned_to = if employee_id.trim().is_empty() {
            None
        } else {
            Some(Reference::from(employee_id))
        };
        if let Some(notes) = notes {
            assignment.stage_notes = Some(notes.to_string());
        }
        Ok(())
    }

    /// Assignment held for the current status, if it names an employee
    pub fn current_assignment(&self) -> Option<&Assignment> {
        self.assignment_for(self.item_status)
            .filter(|a| a.assignee_id().is_some())
    }

    /// Derived: nobody holds the current stage, so anyone may pick it up
    pub fn is_unassigned(&self) -> bool {
        self.current_assignment().is_none()
    }
}
