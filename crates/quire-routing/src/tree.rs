//! Slug hierarchies.
//!
//! Nested entries express depth through their slugs: `docs/setup/index` is
//! the parent of `docs/setup/linux`, which is a sibling of
//! `docs/setup/macos`. [`Hierarchy`] derives those relationships from a flat
//! slice of items after stripping the index token from every slug.
//!
//! All listings are sorted by slug. When a current slug is set, each result
//! is marked `active` if the current entry is that item or lies beneath it.

use quire_document::Document;

use crate::router::strip_index;

/// Anything that carries a slug.
pub trait Slugged {
    fn slug(&self) -> &str;
}

impl Slugged for Document {
    /// The `slug` entry of a resolved map; empty if absent.
    fn slug(&self) -> &str {
        self.get("slug").and_then(|s| s.as_str()).unwrap_or("")
    }
}

impl Slugged for String {
    fn slug(&self) -> &str {
        self
    }
}

impl Slugged for &str {
    fn slug(&self) -> &str {
        self
    }
}

/// One item of a listing.
#[derive(Debug)]
pub struct TreeItem<'a, T> {
    pub item: &'a T,
    /// The slug with the index token stripped.
    pub path: &'a str,
    pub active: bool,
}

/// One node of a recursive tree build.
#[derive(Debug)]
pub struct TreeNode<'a, T> {
    pub item: &'a T,
    pub path: &'a str,
    pub active: bool,
    pub children: Vec<TreeNode<'a, T>>,
}

/// Parent/child/sibling queries over a flat set of items.
#[derive(Debug, Clone, Copy)]
pub struct Hierarchy<'a, T> {
    items: &'a [T],
    index_file: &'a str,
    current: Option<&'a str>,
}

impl<'a, T: Slugged> Hierarchy<'a, T> {
    pub fn new(items: &'a [T], index_file: &'a str) -> Self {
        Hierarchy {
            items,
            index_file,
            current: None,
        }
    }

    /// Mark items on the path to `slug` as active.
    pub fn with_current(mut self, slug: &'a str) -> Self {
        self.current = Some(slug);
        self
    }

    fn stripped<'s>(&self, slug: &'s str) -> &'s str {
        strip_index(slug, self.index_file)
    }

    /// Items directly beneath the root (stripped slugs without `/`).
    pub fn top_level(&self) -> Vec<TreeItem<'a, T>> {
        self.children_of_path("")
    }

    /// Items directly beneath `slug`.
    pub fn children(&self, slug: &str) -> Vec<TreeItem<'a, T>> {
        self.children_of_path(strip_index(slug, self.index_file))
    }

    /// Items sharing `slug`'s parent, the item itself included.
    pub fn siblings(&self, slug: &str) -> Vec<TreeItem<'a, T>> {
        self.children_of_path(parent_path(strip_index(slug, self.index_file)))
    }

    /// The item directly above `slug`, if the set contains it.
    pub fn parent(&self, slug: &str) -> Option<&'a T> {
        let path = strip_index(slug, self.index_file);
        if path.is_empty() {
            return None;
        }
        let parent = parent_path(path);
        self.items
            .iter()
            .find(|item| self.stripped(item.slug()) == parent)
    }

    /// Recursive tree of everything beneath `slug` (use `""` for the root).
    pub fn tree(&self, slug: &str) -> Vec<TreeNode<'a, T>> {
        self.tree_of_path(strip_index(slug, self.index_file))
    }

    /// `parent` is already stripped and must not be stripped again.
    fn tree_of_path(&self, parent: &str) -> Vec<TreeNode<'a, T>> {
        self.children_of_path(parent)
            .into_iter()
            .map(|child| TreeNode {
                children: self.tree_of_path(child.path),
                item: child.item,
                path: child.path,
                active: child.active,
            })
            .collect()
    }

    fn children_of_path(&self, parent: &str) -> Vec<TreeItem<'a, T>> {
        let mut result: Vec<_> = self
            .items
            .iter()
            .filter_map(|item| {
                let path = self.stripped(item.slug());
                is_child(parent, path).then(|| TreeItem {
                    item,
                    path,
                    active: self.is_active(path),
                })
            })
            .collect();
        result.sort_by(|a, b| a.item.slug().cmp(b.item.slug()));
        result
    }

    fn is_active(&self, path: &str) -> bool {
        let Some(current) = self.current else {
            return false;
        };
        let current = strip_index(current, self.index_file);
        if path.is_empty() {
            return current.is_empty();
        }
        current == path
            || current
                .strip_prefix(path)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Everything before the last `/`, or `""` for top-level paths.
fn parent_path(path: &str) -> &str {
    path.rfind('/').map_or("", |i| &path[..i])
}

/// `path` is directly beneath `parent`: one more segment, no further `/`.
fn is_child(parent: &str, path: &str) -> bool {
    let rest = if parent.is_empty() {
        path
    } else {
        match path.strip_prefix(parent).and_then(|r| r.strip_prefix('/')) {
            Some(rest) => rest,
            None => return false,
        }
    };
    !rest.is_empty() && !rest.contains('/')
}
