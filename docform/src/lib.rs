//! Main docform crate: JSON, dict, schema and form adapters for document models.
//!
//! This crate is the primary entry point for users of the docform framework. It re-exports
//! the core types and the `#[derive(Document)]` macro.
//!
//! # Features
//!
//! - **JSON hook** - Convert documents, query results and grouped values into JSON-safe values
//! - **Dict conversion** - Flatten a document into a plain mapping, recursing into list sub-documents
//! - **Schema derivation** - Map field kinds to schema types and build a schema tree
//! - **Form descriptors** - Bind a schema to create or edit buttons for CRUD forms
//!
//! # Quick Start
//!
//! ```ignore
//! use docform::prelude::*;
//! use docform::bson::{DateTime, oid::ObjectId};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize, Document)]
//! pub struct Address {
//!     #[field(string, required)]
//!     pub street: String,
//!     #[field(string)]
//!     pub city: String,
//! }
//!
//! #[derive(Debug, Clone, Serialize, Document)]
//! pub struct Person {
//!     #[field(object_id)]
//!     pub id: ObjectId,
//!     #[field(string, required)]
//!     pub firstname: String,
//!     #[field(string, required)]
//!     pub lastname: String,
//!     #[field(datetime)]
//!     pub dob: Option<DateTime>,
//!     #[field(list, nested)]
//!     pub addresses: Vec<Address>,
//! }
//!
//! fn main() -> DocumentResult<()> {
//!     let person = Person {
//!         id: ObjectId::new(),
//!         firstname: "Ada".to_string(),
//!         lastname: "Lovelace".to_string(),
//!         dob: None,
//!         addresses: vec![],
//!     };
//!
//!     // JSON-safe value with the id as a hex string
//!     let json = person.to_json()?;
//!
//!     // Plain mapping, addresses converted element by element
//!     let dict = person.to_dict()?;
//!
//!     // Schema without the list field, and an edit form bound to it
//!     let schema = person.schema();
//!     let form = person.make_form(false, Some(schema));
//!
//!     println!("{json}\n{dict}\n{:?}", form.button_names());
//!     Ok(())
//! }
//! ```
//!
//! # Collections
//!
//! Query results and grouped values go through [`json::JsonSource`]:
//!
//! ```ignore
//! use docform::json::JsonSource;
//!
//! let people: Vec<Person> = load_people();
//! let listing = JsonSource::query(&people).to_json()?;
//! let by_name = JsonSource::group_by(&people, |p| p.lastname.clone().into()).to_json()?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as docform;

pub mod prelude;

pub use docform_core::{document, error, field, form, json, schema, typemap};
pub use docform_macros::Document;

// Re-export BSON types for convenience
pub use bson;
