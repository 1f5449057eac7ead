use serde::Serialize;
use std::fmt;

/// Order priority as shown on the task board
/// Higher values = earlier on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// "low"
    Low = 0,
    /// No priority set, or a value we do not recognise
    #[default]
    Normal = 1,
    /// "high"
    High = 2,
    /// "urgent" / "rush"
    Urgent = 3,
}

impl Priority {
    /// Determine priority from the order's raw `priority` field
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(|l| l.trim().to_lowercase()).as_deref() {
            Some("low") => Priority::Low,
            Some("high") => Priority::High,
            Some("urgent") | Some("rush") => Priority::Urgent,
            _ => Priority::Normal,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::Urgent => "URGENT",
            Priority::High => "HIGH",
            Priority::Normal => "NORMAL",
            Priority::Low => "LOW",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_from_label() {
        assert_eq!(Priority::from_label(Some("urgent")), Priority::Urgent);
        assert_eq!(Priority::from_label(Some("RUSH")), Priority::Urgent);
        assert_eq!(Priority::from_label(Some(" High ")), Priority::High);
        assert_eq!(Priority::from_label(Some("low")), Priority::Low);

        // Unknown or missing values fall back to normal
        assert_eq!(Priority::from_label(Some("medium")), Priority::Normal);
        assert_eq!(Priority::from_label(None), Priority::Normal);
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Urgent > Priority::High);
        assert!(Priority::High > Priority::Normal);
        assert!(Priority::Normal > Priority::Low);
        assert_eq!(serde_json::to_value(Priority::Urgent).unwrap(), serde_json::json!("urgent"));
    }

    #[test]
    fn test_priority_display() {
        assert_eq!(Priority::Urgent.to_string(), "URGENT");
        assert_eq!(Priority::Normal.to_string(), "NORMAL");
    }
}
