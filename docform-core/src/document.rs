//! Core traits for documents and the adapter capabilities layered on top of them.
//!
//! A type becomes a [`Document`] by listing its field declarations. Every document then gets
//! [`DocumentAdapter`] (JSON, schema and form conversion) and [`ToDict`] for free through
//! blanket implementations.

use bson::{Bson, ser::serialize_to_bson};
use serde::Serialize;
use serde_json::Value;
use std::any::{Any, type_name};

use crate::{
    error::{DocumentError, DocumentResult},
    field::FieldDecl,
    form::{ButtonSet, Form, FormOptions},
    json::{JsonSource, document_to_json},
    schema::SchemaNode,
    typemap::TypeMap,
};

/// Core trait that every adaptable document implements.
///
/// A document is any serializable type that can enumerate its declared fields. Field values
/// are read by serializing the document to BSON and picking each declared field by name, so
/// declaration names must match serialized names.
///
/// Usually derived with `#[derive(Document)]` from the `docform` crate.
///
/// # Example
///
/// ```ignore
/// use docform::prelude::*;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// pub struct Person {
///     pub firstname: String,
///     pub lastname: String,
///     pub dob: Option<bson::DateTime>,
/// }
///
/// impl Document for Person {
///     fn fields() -> Vec<FieldDecl> {
///         vec![
///             FieldDecl::new("firstname", FieldKind::String).required(),
///             FieldDecl::new("lastname", FieldKind::String).required(),
///             FieldDecl::new("dob", FieldKind::DateTime),
///         ]
///     }
/// }
/// ```
pub trait Document: Serialize + Send + Sync + 'static {
    /// Returns the declared fields, in declaration order.
    fn fields() -> Vec<FieldDecl>;

    /// Returns the table used to map this document's field kinds to schema types.
    ///
    /// Override this to return a table built with [`TypeMap::builder`], kept in a static.
    fn type_map() -> &'static TypeMap {
        TypeMap::standard()
    }

    /// Returns a human-readable name for this document type, used in diagnostics.
    fn document_name() -> &'static str {
        type_name::<Self>()
    }
}

/// Capability for values that can flatten themselves into a plain mapping.
///
/// Every [`Document`] has it. List fields declared with
/// [`FieldDecl::list_of`](crate::field::FieldDecl::list_of) use the element type's
/// implementation to convert each element; other list elements are copied as-is.
pub trait ToDict {
    /// Converts this value into a mapping from field name to value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized or a list field does not hold a list.
    fn to_dict(&self) -> DocumentResult<bson::Document>;
}

impl<D: Document> ToDict for D {
    fn to_dict(&self) -> DocumentResult<bson::Document> {
        let values = self.field_values()?;
        let mut dict = bson::Document::new();

        for field in D::fields() {
            let value = values.get(field.name).cloned().unwrap_or(Bson::Null);

            if !field.kind.is_list() {
                dict.insert(field.name, value);
                continue;
            }

            let items = match value {
                Bson::Array(items) => items,
                Bson::Null => Vec::new(),
                other => {
                    return Err(DocumentError::InvalidDeclaration(format!(
                        "field '{}' of {} is declared as {} but holds {:?}",
                        field.name,
                        D::document_name(),
                        field.kind,
                        other.element_type(),
                    )));
                }
            };

            let converted = match field.items {
                Some(convert) => items
                    .iter()
                    .map(convert)
                    .collect::<DocumentResult<Vec<_>>>()?,
                None => items,
            };

            dict.insert(field.name, Bson::Array(converted));
        }

        Ok(dict)
    }
}

/// Extension trait providing the JSON, schema and form conversions for documents.
///
/// This trait is automatically implemented for all types that implement [`Document`].
pub trait DocumentAdapter: Document {
    /// Reads the current value of every declared field, in declaration order.
    ///
    /// Fields missing from the serialized document read as `Null`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the document does not serialize to a map.
    fn field_values(&self) -> DocumentResult<bson::Document>;

    /// Converts this document into a JSON-safe value.
    ///
    /// Object ids, UUIDs and datetimes become strings; everything else passes through.
    ///
    /// # Errors
    ///
    /// Returns an error if the field values cannot be read.
    fn to_json(&self) -> DocumentResult<Value>;

    /// Derives a schema from this document's field declarations.
    ///
    /// Fields whose kind has no schema type are left out. The schema is built fresh on
    /// every call.
    fn schema(&self) -> SchemaNode;

    /// Builds a form for this document.
    ///
    /// `entry` selects the create buttons (`submit`, `cancel`) instead of the edit buttons
    /// (`submit`, `cancel`, `delete`). When `schema` is `None` it is derived with
    /// [`DocumentAdapter::schema`].
    fn make_form(&self, entry: bool, schema: Option<SchemaNode>) -> Form;

    /// Builds a form like [`DocumentAdapter::make_form`], applying the given form options.
    fn make_form_with(&self, entry: bool, schema: Option<SchemaNode>, options: &FormOptions) -> Form;
}

impl<D: Document> DocumentAdapter for D {
    fn field_values(&self) -> DocumentResult<bson::Document> {
        let serialized = match serialize_to_bson(self)? {
            Bson::Document(document) => document,
            other => {
                return Err(DocumentError::InvalidDeclaration(format!(
                    "{} serializes to {:?}, expected a document",
                    D::document_name(),
                    other.element_type(),
                )));
            }
        };

        Ok(
            D::fields()
                .into_iter()
                .map(|field| {
                    let value = serialized.get(field.name).cloned().unwrap_or(Bson::Null);
                    (field.name.to_string(), value)
                })
                .collect()
        )
    }

    fn to_json(&self) -> DocumentResult<Value> {
        JsonSource::from(self).to_json()
    }

    fn schema(&self) -> SchemaNode {
        SchemaNode::derive(&D::fields(), D::type_map())
    }

    fn make_form(&self, entry: bool, schema: Option<SchemaNode>) -> Form {
        self.make_form_with(entry, schema, &FormOptions::default())
    }

    fn make_form_with(&self, entry: bool, schema: Option<SchemaNode>, options: &FormOptions) -> Form {
        let schema = schema.unwrap_or_else(|| self.schema());
        Form::with_options(schema, ButtonSet::for_entry(entry), options)
    }
}

/// Type-erased document trait that allows working with documents of different types uniformly.
///
/// Query results and grouped values hold documents through this trait so that a single
/// JSON conversion can cover several document types.
pub trait AnyDocument: Send + Sync {
    /// Returns the human-readable name of the document type.
    fn document_type(&self) -> &'static str;

    /// Returns the declared fields of the document type.
    fn document_fields(&self) -> Vec<FieldDecl>;

    /// Reads the current value of every declared field.
    fn document_values(&self) -> DocumentResult<bson::Document>;

    /// Returns a reference to the document as a generic `Any` type.
    fn as_any(&self) -> &dyn Any;

    /// Converts this document to JSON format.
    fn to_any_json(&self) -> DocumentResult<Value>;
}

impl dyn AnyDocument {
    /// Attempts to downcast a reference to a specific document type.
    ///
    /// Returns `Some(&D)` if this trait object contains a `D`, otherwise `None`.
    pub fn downcast_ref<D: Document>(&self) -> Option<&D> {
        self.as_any().downcast_ref::<D>()
    }
}

impl<D: Document> AnyDocument for D {
    fn document_type(&self) -> &'static str {
        D::document_name()
    }

    fn document_fields(&self) -> Vec<FieldDecl> {
        D::fields()
    }

    fn document_values(&self) -> DocumentResult<bson::Document> {
        self.field_values()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn to_any_json(&self) -> DocumentResult<Value> {
        Ok(document_to_json(self.field_values()?))
    }
}

/// Conversion trait for converting any document into a boxed `AnyDocument`.
///
/// # Example
///
/// ```ignore
/// use docform::document::IntoAnyDocument;
/// let person = Person { /* ... */ };
/// let any_doc: Box<dyn AnyDocument> = person.into_any_document();
/// ```
pub trait IntoAnyDocument {
    /// Converts this value into a boxed `AnyDocument`.
    fn into_any_document(self) -> Box<dyn AnyDocument>;
}

impl<D: Document> IntoAnyDocument for D {
    fn into_any_document(self) -> Box<dyn AnyDocument> {
        Box::new(self) as Box<dyn AnyDocument>
    }
}

impl IntoAnyDocument for Box<dyn AnyDocument> {
    fn into_any_document(self) -> Box<dyn AnyDocument> {
        self
    }
}
