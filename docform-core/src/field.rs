//! Field kinds and field declarations.
//!
//! A document describes itself through an ordered list of [`FieldDecl`]s. Each declaration
//! names a serialized field and the [`FieldKind`] it was declared with; the adapter reads
//! nothing else about the document's type.

use std::fmt;

use bson::{Bson, de::deserialize_from_bson};
use serde::de::DeserializeOwned;

use crate::{document::ToDict, error::DocumentResult};

/// The declared type of a document field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    String,
    Url,
    Email,
    Int,
    Float,
    Decimal,
    DateTime,
    /// A datetime stored with sub-millisecond precision.
    ComplexDateTime,
    List,
    /// A list kept sorted on save. Behaves as a list everywhere in this crate.
    SortedList,
    Dict,
    Map,
    ObjectId,
    Reference,
    GenericReference,
    EmbeddedDocument,
    GenericEmbeddedDocument,
    Boolean,
    File,
    Binary,
    GeoPoint,
    Sequence,
    /// An application-defined kind. Has no entry in the standard type map.
    Custom(&'static str),
}

impl FieldKind {
    /// Every kind with an entry in the standard type map, in table order.
    pub const STANDARD: [FieldKind; 22] = [
        FieldKind::String,
        FieldKind::Url,
        FieldKind::Email,
        FieldKind::Int,
        FieldKind::Float,
        FieldKind::Decimal,
        FieldKind::DateTime,
        FieldKind::ComplexDateTime,
        FieldKind::List,
        FieldKind::SortedList,
        FieldKind::Dict,
        FieldKind::Map,
        FieldKind::ObjectId,
        FieldKind::Reference,
        FieldKind::GenericReference,
        FieldKind::EmbeddedDocument,
        FieldKind::GenericEmbeddedDocument,
        FieldKind::Boolean,
        FieldKind::File,
        FieldKind::Binary,
        FieldKind::GeoPoint,
        FieldKind::Sequence,
    ];

    /// Returns the snake_case name of this kind, as used in `#[field(...)]` attributes.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Url => "url",
            FieldKind::Email => "email",
            FieldKind::Int => "int",
            FieldKind::Float => "float",
            FieldKind::Decimal => "decimal",
            FieldKind::DateTime => "datetime",
            FieldKind::ComplexDateTime => "complex_datetime",
            FieldKind::List => "list",
            FieldKind::SortedList => "sorted_list",
            FieldKind::Dict => "dict",
            FieldKind::Map => "map",
            FieldKind::ObjectId => "object_id",
            FieldKind::Reference => "reference",
            FieldKind::GenericReference => "generic_reference",
            FieldKind::EmbeddedDocument => "embedded_document",
            FieldKind::GenericEmbeddedDocument => "generic_embedded_document",
            FieldKind::Boolean => "boolean",
            FieldKind::File => "file",
            FieldKind::Binary => "binary",
            FieldKind::GeoPoint => "geo_point",
            FieldKind::Sequence => "sequence",
            FieldKind::Custom(name) => *name,
        }
    }

    /// Returns `true` for list-valued kinds (`List` and `SortedList`).
    pub fn is_list(&self) -> bool {
        matches!(self, FieldKind::List | FieldKind::SortedList)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Converts one element of a list field into its dict form.
///
/// Set on a declaration by [`FieldDecl::list_of`] when the element type opts into [`ToDict`].
pub type ItemConverter = fn(&Bson) -> DocumentResult<Bson>;

fn convert_item<T: ToDict + DeserializeOwned>(item: &Bson) -> DocumentResult<Bson> {
    let element: T = deserialize_from_bson(item.clone())?;
    Ok(Bson::Document(element.to_dict()?))
}

/// Declaration of a single document field.
///
/// # Example
///
/// ```ignore
/// use docform::field::{FieldDecl, FieldKind};
///
/// let fields = vec![
///     FieldDecl::new("firstname", FieldKind::String).required(),
///     FieldDecl::new("dob", FieldKind::DateTime),
///     FieldDecl::list_of::<Comment>("comments"),
/// ];
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FieldDecl {
    /// The serialized name of the field.
    pub name: &'static str,
    /// The declared kind of the field.
    pub kind: FieldKind,
    /// Whether the field must be supplied.
    pub required: bool,
    /// Element conversion for list fields whose elements opt into [`ToDict`].
    pub items: Option<ItemConverter>,
}

impl FieldDecl {
    /// Declares an optional field of the given kind.
    pub fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            items: None,
        }
    }

    /// Declares a list field whose elements are copied as-is.
    pub fn list(name: &'static str) -> Self {
        Self::new(name, FieldKind::List)
    }

    /// Declares a list field whose elements are converted with `T`'s [`ToDict`].
    pub fn list_of<T: ToDict + DeserializeOwned>(name: &'static str) -> Self {
        Self::new(name, FieldKind::List).with_items::<T>()
    }

    /// Declares a sorted list field whose elements are converted with `T`'s [`ToDict`].
    pub fn sorted_list_of<T: ToDict + DeserializeOwned>(name: &'static str) -> Self {
        Self::new(name, FieldKind::SortedList).with_items::<T>()
    }

    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Converts list elements with `T`'s [`ToDict`] during dict conversion.
    pub fn with_items<T: ToDict + DeserializeOwned>(mut self) -> Self {
        self.items = Some(convert_item::<T>);
        self
    }
}
