//! Field validators plugged into `#[derive(Validate)]` request DTOs.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

use crate::task::TaskPriority;

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
        .expect("hex color pattern is valid")
});

/// Build a field error carrying a human-readable message.
pub fn field_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Accept `#rgb`, `#rrggbb` and `#rrggbbaa`.
pub fn validate_hex_color(value: &str) -> Result<(), ValidationError> {
    if HEX_COLOR.is_match(value) {
        Ok(())
    } else {
        Err(field_error(
            "hex_color",
            format!("'{value}' is not a hex color like #cccccc"),
        ))
    }
}

/// Accept the stored priority labels only.
pub fn validate_priority(value: &str) -> Result<(), ValidationError> {
    TaskPriority::from_str(value)
        .map(|_| ())
        .map_err(|_| field_error("priority", "The priority must be one of: low, medium, high."))
}
