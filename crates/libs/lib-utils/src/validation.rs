//! # Validation Utilities
//!
//! Input validation helpers shared by the form validator.

/// Validate that a string is not empty after trimming.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} is required", field_name))
    } else {
        Ok(())
    }
}

/// Validate email format (basic `local@domain.tld` shape).
///
/// Requires exactly one `@`, a non-empty local part, no whitespace, and a domain
/// with at least one dot that has a character on both sides.
pub fn validate_email(email: &str) -> Result<(), String> {
    let invalid = || Err("email must be a valid email address".to_string());

    if email.chars().any(char::is_whitespace) {
        return invalid();
    }

    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return invalid(),
    };

    if local.is_empty() {
        return invalid();
    }

    // Some dot in the domain needs a label on each side: "a.b" passes, ".b" and "a." do not.
    let has_dotted_label = domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());

    if has_dotted_label {
        Ok(())
    } else {
        invalid()
    }
}
