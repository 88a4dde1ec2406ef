use thiserror::Error;
use vitae_protocol::ContactFields;

use crate::util::validate::{is_blank, is_valid_email};

/// A single failed contact form rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Name is required")]
    NameRequired,
    #[error("Email is required")]
    EmailRequired,
    #[error("Please enter a valid email")]
    EmailInvalid,
    #[error("Subject is required")]
    SubjectRequired,
    #[error("Message is required")]
    MessageRequired,
}

/// Every rule a form violated, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_messages(.0))]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn contains(&self, error: FieldError) -> bool {
        self.0.contains(&error)
    }
}

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Contact form values that passed [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    fields: ContactFields,
}

impl Submission {
    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    pub fn into_fields(self) -> ContactFields {
        self.fields
    }
}

pub fn validate(fields: &ContactFields) -> Result<Submission, ValidationErrors> {
    let mut errors = Vec::new();
    if is_blank(&fields.name) {
        errors.push(FieldError::NameRequired);
    }
    if is_blank(&fields.email) {
        errors.push(FieldError::EmailRequired);
    } else if !is_valid_email(&fields.email) {
        errors.push(FieldError::EmailInvalid);
    }
    if is_blank(&fields.subject) {
        errors.push(FieldError::SubjectRequired);
    }
    if is_blank(&fields.message) {
        errors.push(FieldError::MessageRequired);
    }

    if errors.is_empty() {
        Ok(Submission {
            fields: fields.clone(),
        })
    } else {
        Err(ValidationErrors(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, email: &str, subject: &str, message: &str) -> ContactFields {
        ContactFields {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    #[test]
    fn valid_form_passes() {
        let submission = validate(&fields("Jo", "jo@x.com", "Hi", "Hello"));
        assert_eq!(
            submission.map(|s| s.into_fields().name),
            Ok("Jo".to_string())
        );
    }

    #[test]
    fn collects_every_violation_in_order() {
        let Err(errors) = validate(&fields("", "bad", "hi", "hi")) else {
            panic!("expected validation to fail");
        };
        assert_eq!(
            errors.errors(),
            &[FieldError::NameRequired, FieldError::EmailInvalid]
        );
        assert_eq!(errors.to_string(), "Name is required, Please enter a valid email");
    }

    #[test]
    fn blank_means_whitespace_only() {
        let Err(errors) = validate(&fields("  ", "\t", "\n", " ")) else {
            panic!("expected validation to fail");
        };
        assert_eq!(
            errors.to_string(),
            "Name is required, Email is required, Subject is required, Message is required"
        );
        assert!(!errors.contains(FieldError::EmailInvalid));
    }
}
