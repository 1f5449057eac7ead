use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::WorkflowError;

/// Production stages of a print-shop order item, in catalog order.
///
/// The derived `Ord` follows declaration order, so sorting or keying a
/// `BTreeMap` by `Stage` yields catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    #[default]
    ToDo,
    Graphics,
    Printing,
    Cutting,
    Finishing,
    Packing,
    Done,
    Standby,
    Cancelled,
}

impl Stage {
    pub const CATALOG: [Stage; 9] = [
        Stage::ToDo,
        Stage::Graphics,
        Stage::Printing,
        Stage::Cutting,
        Stage::Finishing,
        Stage::Packing,
        Stage::Done,
        Stage::Standby,
        Stage::Cancelled,
    ];

    /// Stages that represent actual production work and can carry an assignee
    pub const WORK_STATES: [Stage; 5] = [
        Stage::Graphics,
        Stage::Printing,
        Stage::Cutting,
        Stage::Finishing,
        Stage::Packing,
    ];

    pub fn is_work_state(self) -> bool {
        Self::WORK_STATES.contains(&self)
    }

    pub fn is_control_state(self) -> bool {
        !self.is_work_state()
    }

    /// Wire name as sent to and received from the Orders API
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::ToDo => "TO_DO",
            Stage::Graphics => "GRAPHICS",
            Stage::Printing => "PRINTING",
            Stage::Cutting => "CUTTING",
            Stage::Finishing => "FINISHING",
            Stage::Packing => "PACKING",
            Stage::Done => "DONE",
            Stage::Standby => "STANDBY",
            Stage::Cancelled => "CANCELLED",
        }
    }

    /// Human-readable label: `TO_DO` becomes "To do", `PRINTING` becomes "Printing"
    pub fn label(self) -> String {
        let spaced = self.as_str().replace('_', " ").to_lowercase();
        let mut chars = spaced.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Stage {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");
        Stage::CATALOG
            .into_iter()
            .find(|stage| stage.as_str() == normalized)
            .ok_or_else(|| WorkflowError::UnknownStage(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_matches_ord() {
        let mut shuffled = vec![Stage::Cancelled, Stage::ToDo, Stage::Packing, Stage::Graphics];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![Stage::ToDo, Stage::Graphics, Stage::Packing, Stage::Cancelled]
        );
    }

    #[test]
    fn test_work_and_control_states() {
        for stage in Stage::WORK_STATES {
            assert!(stage.is_work_state());
        }
        for stage in [Stage::ToDo, Stage::Done, Stage::Standby, Stage::Cancelled] {
            assert!(stage.is_control_state());
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Stage::ToDo.label(), "To do");
        assert_eq!(Stage::Printing.label(), "Printing");
        assert_eq!(Stage::Cancelled.to_string(), "Cancelled");
    }

    #[test]
    fn test_parse_is_lenient() {
        assert_eq!("TO_DO".parse::<Stage>().unwrap(), Stage::ToDo);
        assert_eq!("to-do".parse::<Stage>().unwrap(), Stage::ToDo);
        assert_eq!("finishing".parse::<Stage>().unwrap(), Stage::Finishing);
        assert!("laminating".parse::<Stage>().is_err());
    }

    #[test]
    fn test_wire_format() {
        assert_eq!(serde_json::to_string(&Stage::ToDo).unwrap(), "\"TO_DO\"");
        let parsed: Stage = serde_json::from_str("\"STANDBY\"").unwrap();
        assert_eq!(parsed, Stage::Standby);
    }
}
