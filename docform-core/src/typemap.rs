//! Mapping from document field kinds to schema node types.
//!
//! The standard table is built once per process and never mutated. Documents that need a
//! different mapping build their own with [`TypeMap::builder`] and return it from
//! [`Document::type_map`](crate::document::Document::type_map).

use std::fmt;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::field::FieldKind;

/// The type of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaType {
    String,
    Integer,
    Float,
    Decimal,
    DateTime,
    Boolean,
    /// A node holding named child nodes.
    Mapping,
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SchemaType::String => "string",
            SchemaType::Integer => "integer",
            SchemaType::Float => "float",
            SchemaType::Decimal => "decimal",
            SchemaType::DateTime => "date_time",
            SchemaType::Boolean => "boolean",
            SchemaType::Mapping => "mapping",
        };
        f.write_str(name)
    }
}

static STANDARD: Lazy<TypeMap> = Lazy::new(|| {
    TypeMap::empty()
        .map(FieldKind::String, SchemaType::String)
        .map(FieldKind::Url, SchemaType::String)
        .map(FieldKind::Email, SchemaType::String)
        .map(FieldKind::Int, SchemaType::Integer)
        .map(FieldKind::Float, SchemaType::Float)
        .map(FieldKind::Decimal, SchemaType::Decimal)
        .map(FieldKind::DateTime, SchemaType::DateTime)
        .map(FieldKind::ComplexDateTime, SchemaType::DateTime)
        // No obvious way to present a list in a flat form.
        .unsupported(FieldKind::List)
        .unsupported(FieldKind::SortedList)
        .unsupported(FieldKind::Dict)
        .unsupported(FieldKind::Map)
        .map(FieldKind::ObjectId, SchemaType::String)
        .unsupported(FieldKind::Reference)
        .unsupported(FieldKind::GenericReference)
        .map(FieldKind::EmbeddedDocument, SchemaType::Mapping)
        .map(FieldKind::GenericEmbeddedDocument, SchemaType::Mapping)
        .map(FieldKind::Boolean, SchemaType::Boolean)
        .unsupported(FieldKind::File)
        .unsupported(FieldKind::Binary)
        .unsupported(FieldKind::GeoPoint)
        .map(FieldKind::Sequence, SchemaType::Integer)
        .build()
});

/// Lookup table from [`FieldKind`] to [`SchemaType`].
///
/// An entry is either a schema type or an explicit "unsupported" marker. Kinds without any
/// entry (such as [`FieldKind::Custom`]) are treated the same as unsupported ones.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeMap {
    entries: IndexMap<FieldKind, Option<SchemaType>>,
}

impl TypeMap {
    /// Returns the process-wide standard table.
    pub fn standard() -> &'static TypeMap {
        &STANDARD
    }

    /// Creates a builder seeded with the standard entries.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use docform::typemap::{TypeMap, SchemaType};
    /// use docform::field::FieldKind;
    ///
    /// let map = TypeMap::builder()
    ///     .map(FieldKind::Custom("money"), SchemaType::Decimal)
    ///     .unsupported(FieldKind::ObjectId)
    ///     .build();
    /// ```
    pub fn builder() -> TypeMapBuilder {
        TypeMapBuilder {
            entries: STANDARD.entries.clone(),
        }
    }

    /// Creates a builder with no entries at all.
    pub fn empty() -> TypeMapBuilder {
        TypeMapBuilder {
            entries: IndexMap::new(),
        }
    }

    /// Returns the schema type for `kind`, or `None` when the kind is unsupported or has no entry.
    pub fn get(&self, kind: &FieldKind) -> Option<SchemaType> {
        self.entries.get(kind).copied().flatten()
    }

    /// Returns `true` if the table has an entry for `kind`, supported or not.
    pub fn contains(&self, kind: &FieldKind) -> bool {
        self.entries.contains_key(kind)
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldKind, &Option<SchemaType>)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TypeMap {
    fn default() -> Self {
        TypeMap::standard().clone()
    }
}

/// Builder for constructing [`TypeMap`] instances.
pub struct TypeMapBuilder {
    entries: IndexMap<FieldKind, Option<SchemaType>>,
}

impl TypeMapBuilder {
    /// Maps `kind` to `schema_type`, replacing any existing entry.
    pub fn map(mut self, kind: FieldKind, schema_type: SchemaType) -> Self {
        self.entries.insert(kind, Some(schema_type));
        self
    }

    /// Marks `kind` as having no schema representation.
    pub fn unsupported(mut self, kind: FieldKind) -> Self {
        self.entries.insert(kind, None);
        self
    }

    /// Removes any entry for `kind`.
    pub fn remove(mut self, kind: FieldKind) -> Self {
        self.entries.shift_remove(&kind);
        self
    }

    /// Builds and returns the final [`TypeMap`].
    pub fn build(self) -> TypeMap {
        TypeMap {
            entries: self.entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_covers_every_standard_kind() {
        let map = TypeMap::standard();
        assert_eq!(map.len(), FieldKind::STANDARD.len());
        for kind in FieldKind::STANDARD {
            assert!(map.contains(&kind), "missing entry for {kind}");
        }
    }

    #[test]
    fn scalar_kinds_map_to_scalar_types() {
        let map = TypeMap::standard();
        assert_eq!(map.get(&FieldKind::String), Some(SchemaType::String));
        assert_eq!(map.get(&FieldKind::Url), Some(SchemaType::String));
        assert_eq!(map.get(&FieldKind::Email), Some(SchemaType::String));
        assert_eq!(map.get(&FieldKind::ObjectId), Some(SchemaType::String));
        assert_eq!(map.get(&FieldKind::Int), Some(SchemaType::Integer));
        assert_eq!(map.get(&FieldKind::Sequence), Some(SchemaType::Integer));
        assert_eq!(map.get(&FieldKind::Float), Some(SchemaType::Float));
        assert_eq!(map.get(&FieldKind::Decimal), Some(SchemaType::Decimal));
        assert_eq!(map.get(&FieldKind::DateTime), Some(SchemaType::DateTime));
        assert_eq!(map.get(&FieldKind::ComplexDateTime), Some(SchemaType::DateTime));
        assert_eq!(map.get(&FieldKind::Boolean), Some(SchemaType::Boolean));
        assert_eq!(map.get(&FieldKind::EmbeddedDocument), Some(SchemaType::Mapping));
        assert_eq!(map.get(&FieldKind::GenericEmbeddedDocument), Some(SchemaType::Mapping));
    }

    #[test]
    fn composite_kinds_are_unsupported() {
        let map = TypeMap::standard();
        for kind in [
            FieldKind::List,
            FieldKind::SortedList,
            FieldKind::Dict,
            FieldKind::Map,
            FieldKind::Reference,
            FieldKind::GenericReference,
            FieldKind::File,
            FieldKind::Binary,
            FieldKind::GeoPoint,
        ] {
            assert!(map.contains(&kind));
            assert_eq!(map.get(&kind), None, "{kind} should be unsupported");
        }
    }

    #[test]
    fn custom_kinds_have_no_entry() {
        let map = TypeMap::standard();
        assert!(!map.contains(&FieldKind::Custom("money")));
        assert_eq!(map.get(&FieldKind::Custom("money")), None);
    }

    #[test]
    fn builder_overrides_standard_entries() {
        let map = TypeMap::builder()
            .map(FieldKind::Custom("money"), SchemaType::Decimal)
            .unsupported(FieldKind::ObjectId)
            .remove(FieldKind::Url)
            .build();

        assert_eq!(map.get(&FieldKind::Custom("money")), Some(SchemaType::Decimal));
        assert_eq!(map.get(&FieldKind::ObjectId), None);
        assert!(map.contains(&FieldKind::ObjectId));
        assert!(!map.contains(&FieldKind::Url));
        // The standard table itself is untouched.
        assert_eq!(TypeMap::standard().get(&FieldKind::ObjectId), Some(SchemaType::String));
    }
}
