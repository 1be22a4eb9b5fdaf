//! Schema trees derived from document field declarations.

use heck::ToTitleCase;
use serde::Serialize;
use tracing::debug;

use crate::{
    field::FieldDecl,
    typemap::{SchemaType, TypeMap},
};

/// A typed node in a schema tree.
///
/// Only [`SchemaType::Mapping`] nodes carry children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaNode {
    /// The field name this node reads from. Empty for the root.
    pub name: String,
    /// Human-readable label derived from the name.
    pub title: String,
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    pub required: bool,
    pub children: Vec<SchemaNode>,
}

impl SchemaNode {
    /// Creates a required node of the given type, titled after its name.
    pub fn new(schema_type: SchemaType, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            title: title_from_name(&name),
            name,
            schema_type,
            required: true,
            children: Vec::new(),
        }
    }

    /// Creates an unnamed mapping node, the usual schema root.
    pub fn root() -> Self {
        Self::new(SchemaType::Mapping, "")
    }

    /// Sets whether a value must be supplied for this node.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Overrides the derived title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Appends a child node.
    pub fn add(&mut self, child: SchemaNode) {
        self.children.push(child);
    }

    /// Returns the child with the given name, if any.
    pub fn child(&self, name: &str) -> Option<&SchemaNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Builds a mapping schema from field declarations.
    ///
    /// Each declaration whose kind has a schema type in `type_map` becomes one child, in
    /// declaration order. Declarations without one are skipped.
    pub fn derive(fields: &[FieldDecl], type_map: &TypeMap) -> Self {
        let mut root = Self::root();

        for field in fields {
            let Some(schema_type) = type_map.get(&field.kind) else {
                debug!(field = field.name, kind = %field.kind, "skipping field without a schema type");
                continue;
            };

            root.add(SchemaNode::new(schema_type, field.name).with_required(field.required));
        }

        root
    }
}

/// `first_name` -> `First Name`
fn title_from_name(name: &str) -> String {
    name.to_title_case()
}
