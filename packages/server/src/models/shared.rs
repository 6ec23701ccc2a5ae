use std::collections::HashSet;

use crate::error::AppError;

/// Validate a trimmed title (1-256 Unicode characters).
pub fn validate_title(title: &str) -> Result<(), AppError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > 256 {
        return Err(AppError::Validation(
            "Title must be 1-256 characters".into(),
        ));
    }
    Ok(())
}

/// Validate a required free-text field (non-blank, at most `max_bytes`).
pub fn validate_text(value: &str, name: &str, max_bytes: usize) -> Result<(), AppError> {
    if value.trim().is_empty() || value.len() > max_bytes {
        return Err(AppError::Validation(format!(
            "{name} must be non-empty and at most {max_bytes} bytes"
        )));
    }
    Ok(())
}

/// Validate a list of ids that must not repeat.
pub fn validate_distinct_ids(ids: &[i32], name: &str) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for &id in ids {
        if !seen.insert(id) {
            return Err(AppError::Validation(format!("Duplicate {name} {id}")));
        }
    }
    Ok(())
}
