//! Column rules: default color and protection of the seeded columns.

use crate::error::CoreError;

/// Color assigned to columns created without one.
pub const DEFAULT_COLOR: &str = "#cccccc";

/// Whether a column was seeded with its board or added later by a user.
///
/// Stored as the `is_default` flag so protection survives renames of
/// user-defined columns to one of the seeded names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    System,
    UserDefined,
}

impl ColumnKind {
    pub fn from_is_default(is_default: bool) -> Self {
        if is_default {
            Self::System
        } else {
            Self::UserDefined
        }
    }

    /// System columns are locked only while protection is enabled.
    pub fn is_protected(self, protection_enabled: bool) -> bool {
        protection_enabled && self == Self::System
    }
}

/// Reject renaming a protected column.
///
/// Supplying the current name again is not a rename; color-only updates
/// (`requested_name == None`) are always allowed.
pub fn check_rename(
    kind: ColumnKind,
    protection_enabled: bool,
    current_name: &str,
    requested_name: Option<&str>,
) -> Result<(), CoreError> {
    match requested_name {
        Some(name) if name != current_name && kind.is_protected(protection_enabled) => Err(
            CoreError::Forbidden("Default columns cannot be renamed".to_string()),
        ),
        _ => Ok(()),
    }
}

/// Reject deleting a protected column.
pub fn check_delete(kind: ColumnKind, protection_enabled: bool) -> Result<(), CoreError> {
    if kind.is_protected(protection_enabled) {
        return Err(CoreError::Forbidden(
            "Default columns cannot be deleted".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn kind_follows_flag() {
        assert_eq!(ColumnKind::from_is_default(true), ColumnKind::System);
        assert_eq!(ColumnKind::from_is_default(false), ColumnKind::UserDefined);
    }

    #[test]
    fn rename_of_system_column_is_forbidden() {
        let result = check_rename(ColumnKind::System, true, "Pendiente", Some("Por Hacer"));
        assert_matches!(result, Err(CoreError::Forbidden(_)));
    }

    #[test]
    fn same_name_on_system_column_is_not_a_rename() {
        assert!(check_rename(ColumnKind::System, true, "Pendiente", Some("Pendiente")).is_ok());
    }

    #[test]
    fn color_only_update_on_system_column_is_allowed() {
        assert!(check_rename(ColumnKind::System, true, "Pendiente", None).is_ok());
    }

    #[test]
    fn rename_allowed_when_protection_disabled() {
        assert!(check_rename(ColumnKind::System, false, "Pendiente", Some("Por Hacer")).is_ok());
    }

    #[test]
    fn user_column_named_like_default_is_not_protected() {
        assert!(check_rename(ColumnKind::UserDefined, true, "Pendiente", Some("Otro")).is_ok());
        assert!(check_delete(ColumnKind::UserDefined, true).is_ok());
    }

    #[test]
    fn delete_of_system_column_is_forbidden() {
        assert_matches!(
            check_delete(ColumnKind::System, true),
            Err(CoreError::Forbidden(_))
        );
        assert!(check_delete(ColumnKind::System, false).is_ok());
    }
}
