//! Request validation for user payloads.

use crate::model::UserRequest;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// One failed rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// Every rule the payload broke, in field order.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("validation failed: {}", join(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|e| e.field)
    }
}

fn join(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(
            r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$",
        )
        .unwrap_or_else(|e| unreachable!("email pattern is a literal: {e}"))
    })
}

pub fn is_valid_email(s: &str) -> bool {
    email_regex().is_match(s)
}

/// Check a create/update payload. Runs before any store call.
pub fn validate_user(req: &UserRequest) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();
    if req.firstname.is_empty() {
        errors.push(FieldError { field: "firstname", message: "is required" });
    }
    if req.lastname.is_empty() {
        errors.push(FieldError { field: "lastname", message: "is required" });
    }
    if req.email.is_empty() {
        errors.push(FieldError { field: "email", message: "is required" });
    } else if !is_valid_email(&req.email) {
        errors.push(FieldError { field: "email", message: "must be a valid email" });
    }
    if req.age == 0 {
        errors.push(FieldError { field: "age", message: "is required" });
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> UserRequest {
        UserRequest {
            firstname: "Ivan".into(),
            lastname: "Ivanov".into(),
            email: "ivan@example.com".into(),
            age: 30,
        }
    }

    #[test]
    fn accepts_complete_payload() {
        assert!(validate_user(&valid()).is_ok());
    }

    #[test]
    fn empty_payload_reports_every_field() {
        let err = validate_user(&UserRequest::default()).unwrap_err();
        let fields: Vec<_> = err.fields().collect();
        assert_eq!(fields, vec!["firstname", "lastname", "email", "age"]);
    }

    #[test]
    fn zero_age_is_rejected() {
        let req = UserRequest { age: 0, ..valid() };
        let err = validate_user(&req).unwrap_err();
        assert_eq!(err.fields().collect::<Vec<_>>(), vec!["age"]);
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in ["ivan", "ivan@", "@example.com", "ivan@example", "ivan example@x.com", "ivan@@example.com"] {
            let req = UserRequest { email: email.into(), ..valid() };
            assert!(validate_user(&req).is_err(), "{email} should be rejected");
        }
    }

    #[test]
    fn well_formed_emails_are_accepted() {
        for email in ["ivan@example.com", "ivan.ivanov+tag@mail.example.co", "a_b@sub-domain.org"] {
            assert!(is_valid_email(email), "{email} should be accepted");
        }
    }

    #[test]
    fn message_lists_failed_fields() {
        let req = UserRequest { firstname: String::new(), ..valid() };
        let err = validate_user(&req).unwrap_err();
        assert_eq!(err.to_string(), "validation failed: firstname is required");
    }
}
