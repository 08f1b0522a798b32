//! Virtual field hints.
//!
//! A hidden field is never edited. When its `hint` contains one of the
//! following calls, the resolver computes its value instead:
//!
//! - `loadAll(C)`: every entry of collection `C`
//! - `load(C, S)`: the entry `S` of collection `C` (`S` is a literal slug)

use once_cell::sync::Lazy;
use regex::Regex;

static HINT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"loadAll\(\s*([^,()]+?)\s*\)|load\(\s*([^,()]+?)\s*,\s*([^,()]+?)\s*\)")
        .expect("hint pattern is valid")
});

/// A computation encoded in a hidden field hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VirtualField {
    LoadAll { collection: String },
    Load { collection: String, slug: String },
}

impl VirtualField {
    /// Parse a hint. Hints without a recognized call yield `None`.
    pub fn parse(hint: &str) -> Option<VirtualField> {
        let caps = HINT_RE.captures(hint)?;
        if let Some(collection) = caps.get(1) {
            return Some(VirtualField::LoadAll {
                collection: collection.as_str().to_string(),
            });
        }
        match (caps.get(2), caps.get(3)) {
            (Some(collection), Some(slug)) => Some(VirtualField::Load {
                collection: collection.as_str().to_string(),
                slug: slug.as_str().to_string(),
            }),
            _ => None,
        }
    }

    /// The collection this computation reads from.
    pub fn collection(&self) -> &str {
        match self {
            VirtualField::LoadAll { collection } | VirtualField::Load { collection, .. } => {
                collection
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_load_all() {
        assert_eq!(
            VirtualField::parse("loadAll(posts)"),
            Some(VirtualField::LoadAll {
                collection: "posts".to_string()
            })
        );
    }

    #[test]
    fn test_parse_load_trims_arguments() {
        assert_eq!(
            VirtualField::parse("load(settings, site)"),
            Some(VirtualField::Load {
                collection: "settings".to_string(),
                slug: "site".to_string()
            })
        );
        assert_eq!(
            VirtualField::parse("load( pages ,  home )"),
            Some(VirtualField::Load {
                collection: "pages".to_string(),
                slug: "home".to_string()
            })
        );
    }

    #[test]
    fn test_parse_hint_with_surrounding_text() {
        let parsed = VirtualField::parse("Filled in at build time: loadAll(authors)");
        assert_eq!(parsed.unwrap().collection(), "authors");
    }

    #[test]
    fn test_parse_unrelated_hint() {
        assert_eq!(VirtualField::parse("Shown in the page footer"), None);
        assert_eq!(VirtualField::parse("loadAll()"), None);
        assert_eq!(VirtualField::parse("load(posts)"), None);
    }
}
