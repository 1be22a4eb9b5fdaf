//! Adapters that turn document models into JSON, plain mappings, schemas and forms.
//!
//! This crate is the core of the docform project and provides:
//!
//! - **Field declarations** ([`field`]) - Field kinds and the ordered declarations a document exposes
//! - **Type mapping** ([`typemap`]) - The table from field kinds to schema types
//! - **Document traits** ([`document`]) - The `Document` trait and the adapter capabilities built on it
//! - **JSON conversion** ([`json`]) - The closed set of JSON-encodable shapes and their conversion
//! - **Schemas** ([`schema`]) - Schema trees derived from field declarations
//! - **Forms** ([`form`]) - Form descriptors with create or edit button sets
//! - **Error handling** ([`error`]) - Error types and result types
//!
//! # Example
//!
//! ```ignore
//! use docform::prelude::*;
//! use serde::Serialize;
//!
//! #[derive(Serialize, Document)]
//! pub struct Person {
//!     #[field(string, required)]
//!     pub firstname: String,
//!     #[field(string, required)]
//!     pub lastname: String,
//!     #[field(datetime)]
//!     pub dob: Option<bson::DateTime>,
//! }
//!
//! let person = Person { /* ... */ };
//! let json = person.to_json()?;
//! let form = person.make_form(false, None);
//! ```

#[allow(unused_extern_crates)]
extern crate self as docform_core;

pub mod document;
pub mod error;
pub mod field;
pub mod form;
pub mod json;
pub mod schema;
pub mod typemap;
