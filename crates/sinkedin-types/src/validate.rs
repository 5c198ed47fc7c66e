//! Validation layer
//!
//! Pure shape checks applied after deserialization and before any store
//! call. A failed check yields a [`ValidationError`] carrying field-level
//! detail so the route layer can return it verbatim in the 400 body.

use serde::Serialize;

use crate::entity::{Credentials, NewComment, NewFollow, NewLike, NewPost, NewUser};

pub const MIN_USERNAME_LEN: usize = 3;
pub const MAX_USERNAME_LEN: usize = 50;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_CONTENT_LEN: usize = 10;
pub const MAX_CONTENT_LEN: usize = 5000;

/// A single violated constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All constraints violated by one payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("validation failed: {}", describe(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Typed payload check; side-effect free and independent of the store.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

#[derive(Default)]
struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn require(&mut self, field: &'static str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.push(FieldError {
                field,
                message: "is required".to_string(),
            });
        }
        self
    }

    fn min_len(&mut self, field: &'static str, value: &str, min: usize) -> &mut Self {
        if value.chars().count() < min {
            self.errors.push(FieldError {
                field,
                message: format!("must be at least {} characters", min),
            });
        }
        self
    }

    fn max_len(&mut self, field: &'static str, value: &str, max: usize) -> &mut Self {
        if value.chars().count() > max {
            self.errors.push(FieldError {
                field,
                message: format!("must be at most {} characters", max),
            });
        }
        self
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                errors: self.errors,
            })
        }
    }
}

impl Validate for NewUser {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut c = Checker::default();
        c.min_len("username", &self.username, MIN_USERNAME_LEN)
            .max_len("username", &self.username, MAX_USERNAME_LEN)
            .min_len("password", &self.password, MIN_PASSWORD_LEN)
            .require("name", &self.name)
            .require("role", &self.role)
            .require("avatar", &self.avatar);
        c.finish()
    }
}

impl Validate for Credentials {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut c = Checker::default();
        c.require("username", &self.username)
            .require("password", &self.password);
        c.finish()
    }
}

impl Validate for NewPost {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut c = Checker::default();
        c.min_len("content", &self.content, MIN_CONTENT_LEN)
            .max_len("content", &self.content, MAX_CONTENT_LEN);
        c.finish()
    }
}

impl Validate for NewComment {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut c = Checker::default();
        c.min_len("content", &self.content, MIN_CONTENT_LEN)
            .max_len("content", &self.content, MAX_CONTENT_LEN);
        c.finish()
    }
}

// Foreign keys are plain integers and deliberately not checked against the
// store here; referential integrity is out of scope for validation.
impl Validate for NewLike {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl Validate for NewFollow {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}
