//! Task priority, assignment defaults and deadline derivation.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::Date;

// ---------------------------------------------------------------------------
// Field limits and defaults
// ---------------------------------------------------------------------------

/// Author recorded when a task is created without `created_by`.
pub const DEFAULT_CREATED_BY: &str = "Usuario";

/// Tasks due within this many days (inclusive) are "due soon".
pub const DUE_SOON_DAYS: i64 = 3;

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Task priority, stored as its lowercase label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

const VALID_PRIORITY_STRINGS: &[&str] = &["low", "medium", "high"];

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parse a stored/submitted priority label.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(CoreError::Validation(format!(
                "Invalid priority '{s}'. Must be one of: {}",
                VALID_PRIORITY_STRINGS.join(", ")
            ))),
        }
    }

    /// Parse a priority used as a list filter.
    ///
    /// Filters also accept the Spanish labels shown by the board UI
    /// (`baja`, `media`, `alta`), case-insensitively.
    pub fn from_filter_label(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" | "baja" => Some(Self::Low),
            "medium" | "media" => Some(Self::Medium),
            "high" | "alta" => Some(Self::High),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Deadline
// ---------------------------------------------------------------------------

/// Deadline classification of a task relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineStatus {
    NoDueDate,
    Overdue,
    DueSoon,
    OnTime,
}

impl DeadlineStatus {
    pub fn evaluate(due_date: Option<Date>, today: Date) -> Self {
        match days_until_due(due_date, today) {
            None => Self::NoDueDate,
            Some(days) if days < 0 => Self::Overdue,
            Some(days) if days <= DUE_SOON_DAYS => Self::DueSoon,
            Some(_) => Self::OnTime,
        }
    }
}

/// Signed number of days from `today` to `due_date`.
pub fn days_until_due(due_date: Option<Date>, today: Date) -> Option<i64> {
    due_date.map(|due| (due - today).num_days())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Days;

    use super::*;

    fn today() -> Date {
        Date::from_ymd_opt(2025, 10, 1).unwrap()
    }

    // -- TaskPriority ----------------------------------------------------------

    #[test]
    fn priority_round_trips_through_labels() {
        for label in VALID_PRIORITY_STRINGS {
            assert_eq!(TaskPriority::from_str(label).unwrap().as_str(), *label);
        }
    }

    #[test]
    fn priority_defaults_to_medium() {
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);
    }

    #[test]
    fn rejects_unknown_priority() {
        assert_matches!(
            TaskPriority::from_str("urgent"),
            Err(CoreError::Validation(_))
        );
        assert_matches!(TaskPriority::from_str("High"), Err(_));
    }

    #[test]
    fn filter_labels_accept_spanish_aliases() {
        assert_eq!(TaskPriority::from_filter_label("alta"), Some(TaskPriority::High));
        assert_eq!(TaskPriority::from_filter_label("Media"), Some(TaskPriority::Medium));
        assert_eq!(TaskPriority::from_filter_label(" baja "), Some(TaskPriority::Low));
        assert_eq!(TaskPriority::from_filter_label("low"), Some(TaskPriority::Low));
        assert_eq!(TaskPriority::from_filter_label("urgente"), None);
    }

    // -- Deadline --------------------------------------------------------------

    #[test]
    fn no_due_date() {
        assert_eq!(DeadlineStatus::evaluate(None, today()), DeadlineStatus::NoDueDate);
        assert_eq!(days_until_due(None, today()), None);
    }

    #[test]
    fn yesterday_is_overdue() {
        let due = today().checked_sub_days(Days::new(1));
        assert_eq!(DeadlineStatus::evaluate(due, today()), DeadlineStatus::Overdue);
        assert_eq!(days_until_due(due, today()), Some(-1));
    }

    #[test]
    fn due_today_is_due_soon() {
        assert_eq!(
            DeadlineStatus::evaluate(Some(today()), today()),
            DeadlineStatus::DueSoon
        );
    }

    #[test]
    fn two_and_three_days_out_are_due_soon() {
        for days in [2, 3] {
            let due = today().checked_add_days(Days::new(days));
            assert_eq!(DeadlineStatus::evaluate(due, today()), DeadlineStatus::DueSoon);
        }
    }

    #[test]
    fn four_and_ten_days_out_are_on_time() {
        for days in [4, 10] {
            let due = today().checked_add_days(Days::new(days));
            assert_eq!(DeadlineStatus::evaluate(due, today()), DeadlineStatus::OnTime);
        }
    }
}
