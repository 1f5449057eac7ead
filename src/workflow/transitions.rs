use super::model::OrderItem;
use super::stage::Stage;

/// Decides whether an item may move from one stage to another.
///
/// Status changes go through `OrderItem::set_item_status` by default, which
/// accepts anything. Callers that want a stricter shop floor pass a policy to
/// `OrderItem::transition_to` instead.
pub trait TransitionPolicy: Send + Sync {
    fn permits(&self, item: &OrderItem, from: Stage, to: Stage) -> bool;
}

/// Every stage is reachable from every other stage
#[derive(Debug, Clone, Copy, Default)]
pub struct Unguarded;

impl TransitionPolicy for Unguarded {
    fn permits(&self, _item: &OrderItem, _from: Stage, _to: Stage) -> bool {
        true
    }
}

/// Forward-only production flow over the item's available stages.
///
/// `TO_DO` leads to the first available work stage, each work stage to the
/// next one, the last one to `DONE`. Any open stage may be parked on
/// `STANDBY` or `CANCELLED`, and `STANDBY` may resume anywhere still open.
/// `DONE` and `CANCELLED` are terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuardedTransitions;

impl GuardedTransitions {
    pub fn print_shop() -> Self {
        Self::default()
    }

    /// The stage after `from` in the item's production flow
    fn next_in_flow(item: &OrderItem, from: Stage) -> Option<Stage> {
        let flow: Vec<Stage> = item
            .available_stages()
            .into_iter()
            .filter(|s| *s == Stage::ToDo || *s == Stage::Done || s.is_work_state())
            .collect();
        let position = flow.iter().position(|s| *s == from)?;
        flow.get(position + 1).copied()
    }
}

impl TransitionPolicy for GuardedTransitions {
    fn permits(&self, item: &OrderItem, from: Stage, to: Stage) -> bool {
        if from == to {
            return true;
        }
        if item.disabled_stages.contains(&to) {
            return false;
        }

        match from {
            Stage::Done | Stage::Cancelled => false,
            Stage::Standby => true,
            _ if matches!(to, Stage::Standby | Stage::Cancelled) => true,
            _ => Self::next_in_flow(item, from) == Some(to),
        }
    }
}
