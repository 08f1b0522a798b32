/*
 * memo.rs
 * Copyright (c) 2025 Quire contributors
 *
 * Identity-keyed memoization of resolved subtrees.
 */

use quire_document::Document;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct MemoEntry {
    input: Document,
    output: Document,
}

/// Previously resolved subtrees, keyed by structural path.
///
/// A lookup hits only when the node at a path is the very node (by
/// identity) recorded there last time. Deep-equal replacements miss.
#[derive(Debug, Default)]
pub struct MemoTable {
    entries: HashMap<String, MemoEntry>,
}

impl MemoTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached result for `input` at `path`, if `input` is unchanged.
    pub fn lookup(&self, path: &str, input: &Document) -> Option<Document> {
        let entry = self.entries.get(path)?;
        Document::ptr_eq(&entry.input, input).then(|| entry.output.clone())
    }

    /// Record the result of resolving `input` at `path`.
    pub fn record(&mut self, path: String, input: Document, output: Document) {
        self.entries.insert(path, MemoEntry { input, output });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
