//! JSON conversion for documents and collection-like values.
//!
//! [`JsonSource`] is the closed set of shapes the JSON hook accepts. Anything else is
//! rejected when the source is constructed, so [`JsonSource::to_json`] only fails when a
//! document's field values cannot be read.
//!
//! # Example
//!
//! ```ignore
//! use docform::json::JsonSource;
//!
//! // A single document
//! let value = JsonSource::from(&person).to_json()?;
//!
//! // Query results, materialized in order
//! let value = JsonSource::query(&people).to_json()?;
//!
//! // Consecutive groups keyed by a JSON value
//! let value = JsonSource::group_by(&people, |p| p.lastname.clone().into()).to_json()?;
//! ```

use bson::{Bson, DateTime, spec::BinarySubtype};
use chrono::Utc;
use serde_json::{Map, Value};
use tracing::trace;

use crate::{
    document::{AnyDocument, Document},
    error::{DocumentError, DocumentResult},
};

/// Lazily materialized sequence of documents returned by a query.
pub struct QueryResult<'a> {
    cursor: Box<dyn Iterator<Item = &'a dyn AnyDocument> + 'a>,
}

impl<'a> QueryResult<'a> {
    /// Wraps any iterator of documents.
    pub fn new<D: Document>(documents: impl IntoIterator<Item = &'a D> + 'a) -> Self {
        Self {
            cursor: Box::new(documents.into_iter().map(|document| document as &dyn AnyDocument)),
        }
    }

    /// Wraps an iterator of type-erased documents, which may mix document types.
    pub fn from_any(documents: impl IntoIterator<Item = &'a dyn AnyDocument> + 'a) -> Self {
        Self {
            cursor: Box::new(documents.into_iter()),
        }
    }

    /// Materializes the results into an ordered JSON array.
    pub fn materialize(self) -> DocumentResult<Vec<Value>> {
        self.cursor
            .map(|document| document.to_any_json())
            .collect()
    }
}

/// One group of a grouped value: a key and the items that shared it.
pub struct Group<'a> {
    pub key: Value,
    pub items: Vec<JsonSource<'a>>,
}

/// The values accepted by the JSON hook.
pub enum JsonSource<'a> {
    /// A document or embedded document.
    Document(&'a dyn AnyDocument),
    /// The results of a query.
    QueryResult(QueryResult<'a>),
    /// A namespace or module value. Always encodes as `null`.
    Namespace,
    /// Groups of values sharing a key.
    Grouped(Vec<Group<'a>>),
    /// A JSON array or object, encoded unchanged.
    Plain(Value),
}

impl<'a> JsonSource<'a> {
    /// Creates a source for a type-erased document.
    pub fn document(document: &'a dyn AnyDocument) -> Self {
        JsonSource::Document(document)
    }

    /// Creates a source for the results of a query.
    pub fn query<D: Document>(documents: impl IntoIterator<Item = &'a D> + 'a) -> Self {
        JsonSource::QueryResult(QueryResult::new(documents))
    }

    /// Creates a source for a namespace value.
    pub fn namespace() -> Self {
        JsonSource::Namespace
    }

    /// Groups consecutive items that share a key.
    ///
    /// Like a streaming group-by, only adjacent items with equal keys end up in the same
    /// group; sort the input first to get one group per key.
    pub fn group_by<T, F>(items: impl IntoIterator<Item = T>, mut key: F) -> Self
    where
        T: Into<JsonSource<'a>>,
        F: FnMut(&T) -> Value,
    {
        let mut groups: Vec<Group<'a>> = Vec::new();

        for item in items {
            let item_key = key(&item);
            match groups.last_mut() {
                Some(group) if group.key == item_key => group.items.push(item.into()),
                _ => groups.push(Group {
                    key: item_key,
                    items: vec![item.into()],
                }),
            }
        }

        JsonSource::Grouped(groups)
    }

    /// Creates a source for a JSON array or object.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::UnsupportedType`] for any other JSON value.
    pub fn plain(value: Value) -> DocumentResult<Self> {
        match value {
            Value::Array(_) | Value::Object(_) => Ok(JsonSource::Plain(value)),
            other => Err(DocumentError::unsupported(json_type_name(&other), other.to_string())),
        }
    }

    /// Converts this source into a JSON-safe value.
    ///
    /// # Errors
    ///
    /// Returns an error if a document's field values cannot be read.
    pub fn to_json(self) -> DocumentResult<Value> {
        match self {
            JsonSource::Document(document) => {
                trace!(document = document.document_type(), "encoding document");
                document.to_any_json()
            },
            JsonSource::QueryResult(result) => {
                trace!("materializing query result");
                Ok(Value::Array(result.materialize()?))
            },
            JsonSource::Namespace => Ok(Value::Null),
            JsonSource::Grouped(groups) => {
                trace!(groups = groups.len(), "expanding groups");
                let mut out = Vec::with_capacity(groups.len());
                for group in groups {
                    let items = group.items
                        .into_iter()
                        .map(JsonSource::to_json)
                        .collect::<DocumentResult<Vec<_>>>()?;
                    out.push(Value::Array(vec![group.key, Value::Array(items)]));
                }
                Ok(Value::Array(out))
            },
            JsonSource::Plain(value) => Ok(value),
        }
    }
}

impl<'a, D: Document> From<&'a D> for JsonSource<'a> {
    fn from(document: &'a D) -> Self {
        JsonSource::Document(document)
    }
}

impl<'a> From<QueryResult<'a>> for JsonSource<'a> {
    fn from(result: QueryResult<'a>) -> Self {
        JsonSource::QueryResult(result)
    }
}

impl TryFrom<Value> for JsonSource<'_> {
    type Error = DocumentError;

    fn try_from(value: Value) -> DocumentResult<Self> {
        JsonSource::plain(value)
    }
}

impl TryFrom<Bson> for JsonSource<'_> {
    type Error = DocumentError;

    fn try_from(value: Bson) -> DocumentResult<Self> {
        match value {
            Bson::Array(_) | Bson::Document(_) => Ok(JsonSource::Plain(value.into_relaxed_extjson())),
            other => Err(DocumentError::unsupported(
                format!("{:?}", other.element_type()),
                other.to_string(),
            )),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(number) if number.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Formats a datetime as `YYYY-MM-DD HH:MM:SS`, adding `.ffffff` when there is a
/// sub-second part.
pub fn format_datetime(datetime: DateTime) -> String {
    let datetime: chrono::DateTime<Utc> = datetime.to_chrono();
    if datetime.timestamp_subsec_micros() == 0 {
        datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        datetime.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
    }
}

/// Converts one field value, stringifying identifiers and datetimes at any depth.
pub(crate) fn value_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(datetime) => Value::String(format_datetime(datetime)),
        Bson::Binary(binary) if binary.subtype == BinarySubtype::Uuid => match binary.to_uuid() {
            Ok(uuid) => Value::String(uuid.to_string()),
            Err(_) => Bson::Binary(binary).into_relaxed_extjson(),
        },
        Bson::Array(items) => Value::Array(items.into_iter().map(value_to_json).collect()),
        Bson::Document(document) => Value::Object(
            document
                .into_iter()
                .map(|(key, value)| (key, value_to_json(value)))
                .collect::<Map<_, _>>()
        ),
        other => other.into_relaxed_extjson(),
    }
}

/// Converts a document's field values into a JSON object.
pub(crate) fn document_to_json(values: bson::Document) -> Value {
    value_to_json(Bson::Document(values))
}
