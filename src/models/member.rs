//! Member model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Email addresses only have to carry an `@`; anything stricter rejects
/// addresses the system accepts.
fn email_contains_at(email: &str) -> Result<(), ValidationError> {
    if email.contains('@') {
        return Ok(());
    }
    let mut err = ValidationError::new("email");
    err.message = Some("Email must contain '@'".into());
    Err(err)
}

/// Member model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Member {
    pub id: i32,
    pub id_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub membership_date: NaiveDate,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Create member request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMember {
    #[validate(length(min = 1, message = "Identification number is required"))]
    pub id_number: String,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(custom(function = email_contains_at))]
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Update member request.
///
/// `active` is deliberately absent: deactivation goes through its own
/// operation and is irreversible.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateMember {
    #[validate(length(min = 1, message = "Identification number is required"))]
    pub id_number: String,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(custom(function = email_contains_at))]
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Member list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct MemberQuery {
    /// Case-insensitive substring match on first or last name
    pub name: Option<String>,
    /// Exact identification-number match
    pub id_number: Option<String>,
    /// When true, only active members are returned
    pub active: Option<bool>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member_with_email(email: Option<&str>) -> CreateMember {
        CreateMember {
            id_number: "M1".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: email.map(str::to_string),
            phone: None,
        }
    }

    #[test]
    fn email_is_optional() {
        assert!(member_with_email(None).validate().is_ok());
    }

    #[test]
    fn any_email_with_an_at_sign_is_accepted() {
        // Only '@' presence is required, not a full RFC address
        assert!(member_with_email(Some("john@example.com")).validate().is_ok());
        assert!(member_with_email(Some("john@")).validate().is_ok());
        assert!(member_with_email(Some("@")).validate().is_ok());
    }

    #[test]
    fn email_without_an_at_sign_is_rejected() {
        assert!(member_with_email(Some("john.example.com")).validate().is_err());
        let updated = UpdateMember {
            id_number: "M1".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: Some("not-an-address".to_string()),
            phone: None,
        };
        assert!(updated.validate().is_err());
    }
}
