//! SinkedIn Types - Pure data types for the SinkedIn API
//!
//! This crate contains only entity and payload definitions plus the
//! validation layer. It has no async runtime or HTTP dependencies, so it
//! can be reused by clients and tooling.

pub mod entity;
pub mod validate;

pub use entity::*;
pub use validate::{FieldError, Validate, ValidationError};
