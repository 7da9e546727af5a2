//! # Submission Validation
//!
//! Turns an untrusted JSON body into a [`NewSubmission`], or a list of field errors.
//!
//! Rules:
//! - `companyName`, `email`, `industry`, `challenges`, `goals` must be strings that
//!   are non-empty after trimming. Absent, `null`, and non-string values count as missing.
//! - `phone` is optional; blank means absent, a non-string value is an error.
//! - `email` is lowercased, then checked with [`lib_utils::validate_email`].
//!
//! All violations are collected, in field order, so the caller can render every
//! field error at once.

use crate::model::submission::NewSubmission;
use lib_utils::{validate_email, validate_not_empty};
use serde::Serialize;
use serde_json::{Map, Value};

/// One violated rule, addressed by its wire field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Non-empty, ordered list of field errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} validation error(s): {}", self.0.len(), self.messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    /// Wrap a single error that is not tied to a form field (e.g. unreadable body).
    pub fn body(message: impl Into<String>) -> Self {
        Self(vec![FieldError {
            field: "body",
            message: message.into(),
        }])
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Human-readable messages, one per violated rule.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(|e| e.message.clone()).collect()
    }

    /// Names of the fields with at least one violation, in order.
    pub fn fields(&self) -> Vec<&'static str> {
        let mut fields: Vec<&'static str> = Vec::new();
        for e in &self.0 {
            if !fields.contains(&e.field) {
                fields.push(e.field);
            }
        }
        fields
    }
}

/// Validate and normalize a raw form body.
pub fn validate(raw: &Value) -> Result<NewSubmission, ValidationErrors> {
    let empty = Map::new();
    let fields = raw.as_object().unwrap_or(&empty);
    let mut errors = Vec::new();

    let company_name = required(fields, "companyName", &mut errors);

    let email = required(fields, "email", &mut errors).map(|email| email.to_lowercase());
    if let Some(email) = &email {
        if let Err(message) = validate_email(email) {
            errors.push(FieldError { field: "email", message });
        }
    }

    let phone = optional(fields, "phone", &mut errors);
    let industry = required(fields, "industry", &mut errors);
    let challenges = required(fields, "challenges", &mut errors);
    let goals = required(fields, "goals", &mut errors);

    match (company_name, email, industry, challenges, goals) {
        (Some(company_name), Some(email), Some(industry), Some(challenges), Some(goals))
            if errors.is_empty() =>
        {
            Ok(NewSubmission {
                company_name,
                email,
                phone,
                industry,
                challenges,
                goals,
            })
        }
        _ => Err(ValidationErrors(errors)),
    }
}

/// Trimmed value of a required string field; records an error when missing or blank.
fn required(
    fields: &Map<String, Value>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let value = fields.get(field).and_then(Value::as_str).unwrap_or("");
    match validate_not_empty(value, field) {
        Ok(()) => Some(value.trim().to_string()),
        Err(message) => {
            errors.push(FieldError { field, message });
            None
        }
    }
}

fn optional(
    fields: &Map<String, Value>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match fields.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(value)) => {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        }
        Some(_) => {
            errors.push(FieldError {
                field,
                message: format!("{} must be a string", field),
            });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const REQUIRED: [&str; 5] = ["companyName", "email", "industry", "challenges", "goals"];

    fn acme() -> Value {
        json!({
            "companyName": "Acme",
            "email": "X@Acme.COM",
            "industry": "retail",
            "challenges": "growth",
            "goals": "scale"
        })
    }

    #[test]
    fn test_valid_submission_is_normalized() {
        let mut raw = acme();
        raw["companyName"] = json!("  Acme Corp \n");
        raw["phone"] = json!("  +34 600 000 000 ");

        let submission = validate(&raw).unwrap();

        assert_eq!(submission.company_name, "Acme Corp");
        assert_eq!(submission.email, "x@acme.com");
        assert_eq!(submission.phone.as_deref(), Some("+34 600 000 000"));
        assert_eq!(submission.goals, "scale");
    }

    #[test]
    fn test_each_missing_required_field_is_named() {
        for field in REQUIRED {
            let mut raw = acme();
            raw.as_object_mut().unwrap().remove(field);

            let errors = validate(&raw).unwrap_err();
            assert_eq!(errors.fields(), vec![field]);
            assert_eq!(errors.messages(), vec![format!("{} is required", field)]);
        }
    }

    #[test]
    fn test_every_missing_field_reported_at_once() {
        let errors = validate(&json!({ "phone": "123" })).unwrap_err();
        assert_eq!(errors.fields(), REQUIRED.to_vec());
    }

    #[test]
    fn test_non_string_and_null_values_count_as_missing() {
        let raw = json!({
            "companyName": 42,
            "email": null,
            "industry": ["retail"],
            "challenges": { "text": "growth" },
            "goals": true
        });

        let errors = validate(&raw).unwrap_err();
        assert_eq!(errors.fields(), REQUIRED.to_vec());
    }

    #[test]
    fn test_non_object_bodies_are_rejected_not_panicking() {
        for raw in [json!(null), json!("text"), json!(17), json!([1, 2, 3])] {
            let errors = validate(&raw).unwrap_err();
            assert_eq!(errors.errors().len(), REQUIRED.len());
        }
    }

    #[test]
    fn test_whitespace_only_required_field_is_missing() {
        let mut raw = acme();
        raw["industry"] = json!("   ");

        let errors = validate(&raw).unwrap_err();
        assert_eq!(errors.fields(), vec!["industry"]);
    }

    #[test]
    fn test_bad_email_formats() {
        for email in ["bad", "x@acme", "@acme.com", "x@@acme.com", "x@acme.", "x y@acme.com"] {
            let mut raw = acme();
            raw["email"] = json!(email);

            let errors = validate(&raw).unwrap_err();
            assert_eq!(
                errors.messages(),
                vec!["email must be a valid email address".to_string()],
                "email {email:?}"
            );
        }
    }

    #[test]
    fn test_empty_company_and_bad_email_give_two_messages() {
        let raw = json!({
            "companyName": "",
            "email": "bad",
            "industry": "x",
            "challenges": "y",
            "goals": "z"
        });

        let errors = validate(&raw).unwrap_err();
        assert_eq!(
            errors.messages(),
            vec![
                "companyName is required".to_string(),
                "email must be a valid email address".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_email_reports_only_required() {
        let mut raw = acme();
        raw["email"] = json!("  ");

        let errors = validate(&raw).unwrap_err();
        assert_eq!(errors.messages(), vec!["email is required".to_string()]);
    }

    #[test]
    fn test_phone_rules() {
        let mut raw = acme();
        raw["phone"] = json!("   ");
        assert_eq!(validate(&raw).unwrap().phone, None);

        raw["phone"] = json!(null);
        assert_eq!(validate(&raw).unwrap().phone, None);

        raw["phone"] = json!(600000000);
        let errors = validate(&raw).unwrap_err();
        assert_eq!(errors.messages(), vec!["phone must be a string".to_string()]);
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let mut raw = acme();
        raw["isAdmin"] = json!(true);
        assert!(validate(&raw).is_ok());
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let mut raw = acme();
        raw["phone"] = json!(" 555 ");
        raw["challenges"] = json!("\tlate payments  ");

        let once = validate(&raw).unwrap();
        let twice = validate(&serde_json::to_value(&once).unwrap()).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_body_error_is_single_entry() {
        let errors = ValidationErrors::body("request body must be valid JSON");
        assert_eq!(errors.fields(), vec!["body"]);
        assert_eq!(errors.messages().len(), 1);
    }
}
