//! Conversion between documents and `serde_json` values.

use crate::types::{Document, DocumentKind, Scalar};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        let kind = match value {
            Value::Null => DocumentKind::Scalar(Scalar::Null),
            Value::Bool(b) => DocumentKind::Scalar(Scalar::Bool(b)),
            Value::Number(n) => DocumentKind::Scalar(Scalar::Number(n)),
            Value::String(s) => DocumentKind::Scalar(Scalar::String(s)),
            Value::Array(items) => {
                DocumentKind::List(items.into_iter().map(Document::from).collect())
            }
            Value::Object(entries) => DocumentKind::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Document::from(v)))
                    .collect(),
            ),
        };
        Document::new(kind)
    }
}

impl From<&Document> for Value {
    fn from(doc: &Document) -> Self {
        match doc.kind() {
            DocumentKind::Scalar(Scalar::Null) => Value::Null,
            DocumentKind::Scalar(Scalar::Bool(b)) => Value::Bool(*b),
            DocumentKind::Scalar(Scalar::Number(n)) => Value::Number(n.clone()),
            DocumentKind::Scalar(Scalar::String(s)) => Value::String(s.clone()),
            DocumentKind::List(items) => Value::Array(items.iter().map(Value::from).collect()),
            DocumentKind::Map(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Document {
    fn from(value: &str) -> Self {
        Document::string(value)
    }
}

impl From<String> for Document {
    fn from(value: String) -> Self {
        Document::string(value)
    }
}

impl From<bool> for Document {
    fn from(value: bool) -> Self {
        Document::new(DocumentKind::Scalar(Scalar::Bool(value)))
    }
}

impl From<i64> for Document {
    fn from(value: i64) -> Self {
        Document::new(DocumentKind::Scalar(Scalar::Number(value.into())))
    }
}

impl Document {
    /// Deep-copy this tree into a `serde_json::Value`.
    pub fn to_json(&self) -> Value {
        Value::from(self)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.kind() {
            DocumentKind::Scalar(Scalar::Null) => serializer.serialize_unit(),
            DocumentKind::Scalar(Scalar::Bool(b)) => serializer.serialize_bool(*b),
            DocumentKind::Scalar(Scalar::Number(n)) => n.serialize(serializer),
            DocumentKind::Scalar(Scalar::String(s)) => serializer.serialize_str(s),
            DocumentKind::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            DocumentKind::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Document::from)
    }
}
