//! Convenient re-exports of commonly used types from docform.
//!
//! ```ignore
//! use docform::prelude::*;
//! ```
//!
//! This provides access to:
//! - Document traits and the derive macro
//! - Field declarations and the type map
//! - JSON sources, schemas and forms
//! - Error types

pub use docform_core::{
    document::{AnyDocument, Document, DocumentAdapter, IntoAnyDocument, ToDict},
    error::{DocumentError, DocumentResult},
    field::{FieldDecl, FieldKind},
    form::{Button, ButtonSet, Form, FormOptions},
    json::{JsonSource, QueryResult},
    schema::SchemaNode,
    typemap::{SchemaType, TypeMap},
};
pub use docform_macros::Document;
