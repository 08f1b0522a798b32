//! Template-based slug routing.

use once_cell::sync::Lazy;
use quire_schema::{Collection, CollectionKind, CollectionRegistry};
use regex::{NoExpand, Regex};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Result, RoutingError};

/// Any `{{...}}` placeholder; each becomes a capture group when matching.
static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{.+?\}\}").expect("placeholder pattern is valid"));

/// Placeholders that are substituted with the slug when building a path.
static SLUG_PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{(?:slug|dirname)\}\}").expect("slug pattern is valid"));

/// Remove a trailing index token at a path-segment boundary.
///
/// `strip_index("blog/index", "index") == "blog"`,
/// `strip_index("index", "index") == ""`, and `"reindex"` is left alone.
pub fn strip_index<'s>(slug: &'s str, index_file: &str) -> &'s str {
    if slug == index_file {
        return "";
    }
    match slug.strip_suffix(index_file) {
        Some(rest) if rest.ends_with('/') => &rest[..rest.len() - 1],
        _ => slug,
    }
}

/// A path matched back to an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub collection: String,
    pub slug: String,
}

/// Maps `(collection, slug)` to public paths and back.
///
/// Every template in the registry is compiled when the router is built, so a
/// malformed template is reported up front.
#[derive(Debug, Clone)]
pub struct SlugRouter {
    registry: Arc<CollectionRegistry>,
    matchers: HashMap<String, Regex>,
}

impl SlugRouter {
    pub fn new(registry: Arc<CollectionRegistry>) -> Result<Self> {
        let mut matchers = HashMap::new();
        for collection in registry.collections() {
            for template in templates(collection) {
                if !matchers.contains_key(template) {
                    matchers.insert(template.to_string(), compile_template(template)?);
                }
            }
        }
        Ok(SlugRouter { registry, matchers })
    }

    pub fn registry(&self) -> &Arc<CollectionRegistry> {
        &self.registry
    }

    /// The public path of entry `slug` in `collection`.
    ///
    /// The index token and a leading `/` are stripped from the slug before it
    /// replaces `{{slug}}` / `{{dirname}}`. With `preview`, a
    /// `#preview=<collection>/<slug>` fragment is appended, using the index
    /// token when the slug reduced to nothing.
    pub fn path_for(&self, collection: &str, slug: &str, preview: bool) -> Result<String> {
        let c = self.registry.collection(collection)?;
        let template = c
            .template_for(slug)
            .ok_or_else(|| RoutingError::MissingTemplate {
                collection: collection.to_string(),
                slug: slug.to_string(),
            })?;

        let stripped = strip_index(slug, c.index_file());
        let stripped = stripped.strip_prefix('/').unwrap_or(stripped);
        let path = SLUG_PLACEHOLDER_RE.replace_all(template, NoExpand(stripped));

        if preview {
            let entry = if stripped.is_empty() {
                c.index_file()
            } else {
                stripped
            };
            Ok(format!("{}#preview={}/{}", path, c.name, entry))
        } else {
            Ok(path.into_owned())
        }
    }

    /// Match `path` against the templates of `collection`.
    ///
    /// Folder collections return the first captured placeholder. Files
    /// collections try each file's template and return the matching file's
    /// slug (its storage-path stem), whatever the incoming path looked like.
    /// A file without its own template matches the collection template when
    /// the captured slug is the file's.
    /// Any `#fragment` or `?query` is ignored.
    pub fn match_path(&self, collection: &str, path: &str) -> Option<String> {
        let c = self.registry.collection(collection).ok()?;
        let path = path.split(['#', '?']).next().unwrap_or(path);

        match &c.kind {
            CollectionKind::Folder(_) => {
                let caps = self.matcher(c.preview_path.as_deref()?)?.captures(path)?;
                Some(caps.get(1).map_or("", |m| m.as_str()).to_string())
            }
            CollectionKind::Files(files) => files.iter().find_map(|file| {
                let slug = file.slug();
                let matched = match file.preview_path.as_deref() {
                    Some(template) => self.matcher(template)?.is_match(path),
                    // The collection template is shared, so the captured
                    // slug has to name this file.
                    None => {
                        let caps = self.matcher(c.preview_path.as_deref()?)?.captures(path)?;
                        caps.get(1)
                            .is_none_or(|m| m.as_str() == strip_index(slug, c.index_file()))
                    }
                };
                matched.then(|| slug.to_string())
            }),
        }
    }

    /// Match `path` against every collection in declaration order.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        self.registry.collections().find_map(|c| {
            self.match_path(&c.name, path).map(|slug| RouteMatch {
                collection: c.name.clone(),
                slug,
            })
        })
    }

    fn matcher(&self, template: &str) -> Option<&Regex> {
        self.matchers.get(template)
    }
}

fn templates(collection: &Collection) -> Vec<&str> {
    let mut templates: Vec<&str> = collection.preview_path.as_deref().into_iter().collect();
    if let CollectionKind::Files(files) = &collection.kind {
        templates.extend(files.iter().filter_map(|f| f.preview_path.as_deref()));
    }
    templates
}

/// Compile a template into an anchored regex with one capture group per
/// placeholder.
fn compile_template(template: &str) -> Result<Regex> {
    let mut pattern = String::from("^");
    let mut last = 0;
    for m in PLACEHOLDER_RE.find_iter(template) {
        pattern.push_str(&regex::escape(&template[last..m.start()]));
        pattern.push_str("(.*)");
        last = m.end();
    }
    pattern.push_str(&regex::escape(&template[last..]));
    pattern.push('$');

    Regex::new(&pattern).map_err(|source| RoutingError::InvalidTemplate {
        template: template.to_string(),
        source,
    })
}
