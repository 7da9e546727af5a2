use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::FormRecord;
use sqlx::FromRow;

/// A validated, normalized inquiry that has not been stored yet.
///
/// Untrusted input must go through [`crate::model::validate::validate`], which
/// trims every field and lowercases the email. Stores persist whatever they are
/// given and do not re-validate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmission {
    pub company_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub industry: String,
    pub challenges: String,
    pub goals: String,
}

/// Submission entity as persisted by a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub company_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub industry: String,
    pub challenges: String,
    pub goals: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Submission {
    /// Stamp a new submission with its identifier and creation time.
    ///
    /// `updated_at` starts equal to `created_at`.
    pub fn create(new: NewSubmission, id: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            company_name: new.company_name,
            email: new.email,
            phone: new.phone,
            industry: new.industry,
            challenges: new.challenges,
            goals: new.goals,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<Submission> for FormRecord {
    fn from(s: Submission) -> Self {
        FormRecord {
            id: s.id,
            company_name: s.company_name,
            email: s.email,
            phone: s.phone,
            industry: s.industry,
            challenges: s.challenges,
            goals: s.goals,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_utils::now_utc;

    fn acme() -> NewSubmission {
        NewSubmission {
            company_name: "Acme".to_string(),
            email: "x@acme.com".to_string(),
            phone: None,
            industry: "retail".to_string(),
            challenges: "growth".to_string(),
            goals: "scale".to_string(),
        }
    }

    #[test]
    fn test_create_sets_equal_timestamps() {
        let now = now_utc();
        let submission = Submission::create(acme(), "id-1".to_string(), now);

        assert_eq!(submission.created_at, now);
        assert_eq!(submission.updated_at, submission.created_at);
        assert_eq!(submission.email, "x@acme.com");
    }

    #[test]
    fn test_serializes_camel_case_without_absent_phone() {
        let submission = Submission::create(acme(), "id-1".to_string(), now_utc());
        let json = serde_json::to_value(&submission).unwrap();

        assert_eq!(json["companyName"], "Acme");
        assert!(json.get("phone").is_none());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }
}
