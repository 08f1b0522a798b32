//! Core document tree types.

use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

/// The shape of a document node.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentKind {
    /// Atomic values (string, number, boolean, null).
    Scalar(Scalar),

    /// Ordered sequence of child documents.
    List(Vec<Document>),

    /// Ordered set of named child documents.
    Map(IndexMap<String, Document>),
}

/// A shared, immutable document node.
///
/// Equality (`==`) is deep structural equality. Use [`Document::ptr_eq`] to
/// ask whether two handles point at the very same node.
#[derive(Clone)]
pub struct Document(Arc<DocumentKind>);

impl Document {
    /// Wrap a node kind into a new document with a fresh identity.
    pub fn new(kind: DocumentKind) -> Self {
        Document(Arc::new(kind))
    }

    /// Create a null scalar.
    pub fn null() -> Self {
        Self::new(DocumentKind::Scalar(Scalar::Null))
    }

    /// Create a string scalar.
    pub fn string(value: impl Into<String>) -> Self {
        Self::new(DocumentKind::Scalar(Scalar::String(value.into())))
    }

    /// Create a map from `(key, value)` pairs, keeping their order.
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Document)>) -> Self {
        Self::new(DocumentKind::Map(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Create a list from items.
    pub fn list(items: impl IntoIterator<Item = Document>) -> Self {
        Self::new(DocumentKind::List(items.into_iter().collect()))
    }

    /// Borrow the node kind.
    pub fn kind(&self) -> &DocumentKind {
        &self.0
    }

    /// True when both handles refer to the same node.
    pub fn ptr_eq(a: &Document, b: &Document) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.kind(), DocumentKind::Scalar(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self.kind(), DocumentKind::List(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self.kind(), DocumentKind::Map(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self.kind(), DocumentKind::Scalar(Scalar::Null))
    }

    /// Get the string value if this is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self.kind() {
            DocumentKind::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Get the items if this is a list.
    pub fn as_list(&self) -> Option<&[Document]> {
        match self.kind() {
            DocumentKind::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get the entries if this is a map.
    pub fn as_map(&self) -> Option<&IndexMap<String, Document>> {
        match self.kind() {
            DocumentKind::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a map key. Returns `None` for non-maps.
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.as_map()?.get(key)
    }

    /// Look up a list index. Returns `None` for non-lists.
    pub fn get_index(&self, index: usize) -> Option<&Document> {
        self.as_list()?.get(index)
    }

    /// Number of children (map entries or list items); zero for scalars.
    pub fn len(&self) -> usize {
        match self.kind() {
            DocumentKind::List(items) => items.len(),
            DocumentKind::Map(entries) => entries.len(),
            DocumentKind::Scalar(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return a copy of this map with `key` set to `value`.
    ///
    /// An existing key keeps its position; a new key is appended. A non-map
    /// node is replaced by a single-entry map.
    pub fn with_entry(&self, key: impl Into<String>, value: Document) -> Document {
        let mut entries = self.as_map().cloned().unwrap_or_default();
        entries.insert(key.into(), value);
        Self::new(DocumentKind::Map(entries))
    }

    /// Return a copy of this map without `key`, preserving the order of the
    /// remaining entries. Non-maps and absent keys return the same node.
    pub fn without_entry(&self, key: &str) -> Document {
        match self.as_map() {
            Some(entries) if entries.contains_key(key) => {
                let mut entries = entries.clone();
                entries.shift_remove(key);
                Self::new(DocumentKind::Map(entries))
            }
            _ => self.clone(),
        }
    }

    /// Return a copy of this list with the item at `index` replaced.
    ///
    /// Out-of-range indices and non-lists return the same node.
    pub fn with_item(&self, index: usize, value: Document) -> Document {
        match self.as_list() {
            Some(items) if index < items.len() => {
                let mut items = items.to_vec();
                items[index] = value;
                Self::new(DocumentKind::List(items))
            }
            _ => self.clone(),
        }
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        Document::ptr_eq(self, other) || self.kind() == other.kind()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            DocumentKind::Scalar(Scalar::Null) => write!(f, "null"),
            DocumentKind::Scalar(Scalar::Bool(b)) => write!(f, "{}", b),
            DocumentKind::Scalar(Scalar::Number(n)) => write!(f, "{}", n),
            DocumentKind::Scalar(Scalar::String(s)) => write!(f, "{:?}", s),
            DocumentKind::List(items) => f.debug_list().entries(items).finish(),
            DocumentKind::Map(entries) => f.debug_map().entries(entries).finish(),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Document {
        Document::string(v)
    }

    #[test]
    fn test_clone_shares_identity() {
        let doc = Document::map([("title", s("Hello"))]);
        let copy = doc.clone();
        assert!(Document::ptr_eq(&doc, &copy));
    }

    #[test]
    fn test_equal_values_have_distinct_identity() {
        let a = s("x");
        let b = s("x");
        assert_eq!(a, b);
        assert!(!Document::ptr_eq(&a, &b));
    }

    #[test]
    fn test_with_entry_shares_untouched_children() {
        let body = Document::list([s("a"), s("b")]);
        let doc = Document::map([("title", s("Old")), ("body", body.clone())]);

        let edited = doc.with_entry("title", s("New"));

        assert!(!Document::ptr_eq(&doc, &edited));
        assert!(Document::ptr_eq(edited.get("body").unwrap(), &body));
        assert_eq!(edited.get("title").unwrap().as_str(), Some("New"));
        // Original is untouched
        assert_eq!(doc.get("title").unwrap().as_str(), Some("Old"));
    }

    #[test]
    fn test_with_entry_keeps_key_position() {
        let doc = Document::map([("a", s("1")), ("b", s("2")), ("c", s("3"))]);
        let edited = doc.with_entry("b", s("two")).with_entry("d", s("4"));
        let keys: Vec<_> = edited.as_map().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_without_entry() {
        let doc = Document::map([("a", s("1")), ("b", s("2")), ("c", s("3"))]);
        let removed = doc.without_entry("b");
        let keys: Vec<_> = removed.as_map().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["a", "c"]);

        let same = doc.without_entry("missing");
        assert!(Document::ptr_eq(&doc, &same));
    }

    #[test]
    fn test_with_item() {
        let list = Document::list([s("a"), s("b")]);
        let edited = list.with_item(1, s("B"));
        assert_eq!(edited.get_index(1).unwrap().as_str(), Some("B"));
        assert!(Document::ptr_eq(
            edited.get_index(0).unwrap(),
            list.get_index(0).unwrap()
        ));
        assert!(Document::ptr_eq(&list.with_item(5, s("z")), &list));
    }

    #[test]
    fn test_accessors_on_wrong_kind() {
        let scalar = s("x");
        assert!(scalar.get("key").is_none());
        assert!(scalar.as_list().is_none());
        assert_eq!(scalar.len(), 0);
        assert!(Document::null().is_null());
    }
}
