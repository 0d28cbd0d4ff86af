//! `estatecms-core` — domain building blocks shared by the content backend.
//!
//! This crate contains **pure domain** primitives (no framework or storage concerns).

pub mod document;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use document::{DocumentStatus, Slug};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{DocumentId, UserId};
pub use value_object::ValueObject;
