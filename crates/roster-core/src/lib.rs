//! Core types and trait definitions for the Roster contacts backend.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::ContactStore`]; transports drive a
//! [`registry::ContactRegistry`].

pub mod contact;
pub mod error;
pub mod registry;
pub mod store;
pub mod validate;

pub use contact::{Contact, ContactId, ContactPatch, NewContact};
pub use error::{Error, Result};
pub use registry::ContactRegistry;
pub use validate::{FieldViolation, ValidatedContact, ValidationError, validate};
