/*
 * transformer.rs
 * Copyright (c) 2025 Quire contributors
 *
 * Schema-driven resolution of raw entries into render-ready documents.
 */

//! The document transformer.
//!
//! A [`Transformer`] walks a raw entry alongside its field schema and
//! produces the document templates render from:
//!
//! - relation values are replaced by the referenced entry, itself resolved,
//!   with `slug` and `href` attached
//! - hidden fields carrying a `load(...)`/`loadAll(...)` hint are computed
//! - image and file values are passed through the asset resolver
//! - nested objects and lists, including typed variants, are walked with
//!   their own sub-schema
//!
//! Resolved subtrees are memoized by structural path. A later call that
//! hands over the identical node at the same path reuses the previous
//! result, so re-resolving an entry after a one-field edit only redoes the
//! edited branch.

use quire_document::{Document, DocumentKind};
use quire_routing::SlugRouter;
use quire_schema::{CollectionRegistry, Field, Nested, VirtualField};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::error::{Result, TransformError};
use crate::loader::{AssetResolver, ContentLoader};
use crate::memo::MemoTable;

/// Default limit on nesting and relation depth.
pub const DEFAULT_MAX_DEPTH: usize = 64;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Options that shape resolved output.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Generate `href`s with a `#preview=` fragment.
    pub preview: bool,

    /// Maximum depth of nested nodes and relation hops.
    pub max_depth: usize,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            preview: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Resolves raw entries against the collection schema.
///
/// One transformer owns one memo table. Keep it alive for the length of an
/// editing session or a batch build; [`Transformer::clear_cache`] drops
/// every memoized result.
pub struct Transformer {
    router: Arc<SlugRouter>,
    loader: Arc<dyn ContentLoader>,
    assets: Option<Arc<dyn AssetResolver>>,
    options: TransformOptions,
    memo: MemoTable,
}

impl Transformer {
    pub fn new(router: Arc<SlugRouter>, loader: Arc<dyn ContentLoader>) -> Self {
        Self {
            router,
            loader,
            assets: None,
            options: TransformOptions::default(),
            memo: MemoTable::new(),
        }
    }

    pub fn with_asset_resolver(mut self, assets: Arc<dyn AssetResolver>) -> Self {
        self.assets = Some(assets);
        self
    }

    pub fn with_options(mut self, options: TransformOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    pub fn registry(&self) -> &Arc<CollectionRegistry> {
        self.router.registry()
    }

    pub fn router(&self) -> &Arc<SlugRouter> {
        &self.router
    }

    pub fn loader(&self) -> &Arc<dyn ContentLoader> {
        &self.loader
    }

    /// Number of memoized subtrees.
    pub fn cache_len(&self) -> usize {
        self.memo.len()
    }

    pub fn clear_cache(&mut self) {
        self.memo.clear();
    }

    /// Resolve `document` against `fields`.
    pub async fn transform(&mut self, document: &Document, fields: &[Field]) -> Result<Document> {
        self.run(document, fields, String::new(), None, None).await
    }

    /// Like [`Transformer::transform`], but stops with
    /// [`TransformError::Cancelled`] once `token` is cancelled.
    ///
    /// Cancellation is checked before every load, so an in-flight load is
    /// allowed to finish. Results completed before cancellation stay cached.
    pub async fn transform_with_cancellation(
        &mut self,
        document: &Document,
        fields: &[Field],
        token: &CancellationToken,
    ) -> Result<Document> {
        self.run(document, fields, String::new(), None, Some(token))
            .await
    }

    /// Resolve an entry of `collection` that the caller already holds,
    /// typically the in-progress value of an editor.
    pub async fn transform_entry(
        &mut self,
        collection: &str,
        slug: &str,
        document: &Document,
    ) -> Result<Document> {
        let registry = Arc::clone(self.router.registry());
        let fields = registry.fields_for(collection, slug)?;
        self.run(
            document,
            fields,
            entry_path(collection, slug),
            Some((collection, slug)),
            None,
        )
        .await
    }

    /// Load and resolve an entry, returning `None` if it does not exist.
    pub async fn try_load_entry(
        &mut self,
        collection: &str,
        slug: &str,
    ) -> Result<Option<Document>> {
        let registry = Arc::clone(self.router.registry());
        let fields = registry.fields_for(collection, slug)?;
        let Some(document) = self.loader.load(collection, slug).await? else {
            return Ok(None);
        };
        let resolved = self
            .run(
                &document,
                fields,
                entry_path(collection, slug),
                Some((collection, slug)),
                None,
            )
            .await?;
        Ok(Some(resolved))
    }

    /// Load and resolve an entry requested by name.
    pub async fn load_entry(&mut self, collection: &str, slug: &str) -> Result<Document> {
        self.try_load_entry(collection, slug)
            .await?
            .ok_or_else(|| TransformError::EntryNotFound {
                collection: collection.to_string(),
                slug: slug.to_string(),
            })
    }

    async fn run(
        &mut self,
        document: &Document,
        fields: &[Field],
        path: String,
        entry: Option<(&str, &str)>,
        cancel: Option<&CancellationToken>,
    ) -> Result<Document> {
        let registry = Arc::clone(self.router.registry());
        let mut visitor = Visitor {
            registry: &registry,
            router: &self.router,
            loader: self.loader.as_ref(),
            assets: self.assets.as_deref(),
            options: &self.options,
            memo: &mut self.memo,
            cancel,
            chain: entry
                .map(|(c, s)| vec![(c.to_string(), s.to_string())])
                .unwrap_or_default(),
            truncations: 0,
        };
        tracing::debug!(path = %path, fields = fields.len(), "Transforming document");
        visitor
            .visit(document.clone(), Nested::Fields(fields), path, 0)
            .await
    }
}

fn entry_path(collection: &str, slug: &str) -> String {
    format!("{}/{}:", collection, slug)
}

/// `posts/hello:` + `tags` -> `posts/hello:tags`, then `posts/hello:tags.0`.
fn child_path(path: &str, segment: &str) -> String {
    if path.is_empty() || path.ends_with(':') {
        format!("{}{}", path, segment)
    } else {
        format!("{}.{}", path, segment)
    }
}

/// Per-call traversal state.
struct Visitor<'t> {
    registry: &'t CollectionRegistry,
    router: &'t SlugRouter,
    loader: &'t dyn ContentLoader,
    assets: Option<&'t dyn AssetResolver>,
    options: &'t TransformOptions,
    memo: &'t mut MemoTable,
    cancel: Option<&'t CancellationToken>,
    /// Entries being resolved on the current branch. An entry already on
    /// the chain is attached raw instead of being resolved again.
    chain: Vec<(String, String)>,
    /// Cycles cut short so far. A result built while this grows depends on
    /// the chain it was reached through and is not memoized.
    truncations: usize,
}

impl<'t> Visitor<'t> {
    fn visit<'v>(
        &'v mut self,
        value: Document,
        nested: Nested<'v>,
        path: String,
        depth: usize,
    ) -> BoxFuture<'v, Result<Document>> {
        Box::pin(async move {
            if value.is_scalar() {
                return Ok(value);
            }
            if depth > self.options.max_depth {
                return Err(TransformError::NestingTooDeep {
                    max_depth: self.options.max_depth,
                    path,
                });
            }
            if let Some(cached) = self.memo.lookup(&path, &value) {
                tracing::trace!(path = %path, "Memo hit");
                return Ok(cached);
            }

            let truncations = self.truncations;
            let result = if value.is_list() {
                self.visit_list(&value, nested, &path, depth).await?
            } else {
                self.visit_map(&value, nested, &path, depth).await?
            };

            if self.truncations == truncations {
                self.memo.record(path, value, result.clone());
            }
            Ok(result)
        })
    }

    async fn visit_list(
        &mut self,
        value: &Document,
        nested: Nested<'_>,
        path: &str,
        depth: usize,
    ) -> Result<Document> {
        let items = value.as_list().unwrap_or_default();
        let mut resolved = Vec::with_capacity(items.len());
        let mut changed = false;

        for (i, item) in items.iter().enumerate() {
            let next = if item.is_scalar() {
                match nested.first_field() {
                    Some(field) => self.visit_scalar(item, field, depth).await?,
                    None => Some(item.clone()),
                }
            } else {
                let item_path = child_path(path, &i.to_string());
                Some(self.visit(item.clone(), nested, item_path, depth + 1).await?)
            };

            match next {
                Some(next) => {
                    changed |= !Document::ptr_eq(&next, item);
                    resolved.push(next);
                }
                None => changed = true,
            }
        }

        Ok(if changed {
            Document::list(resolved)
        } else {
            value.clone()
        })
    }

    async fn visit_map(
        &mut self,
        value: &Document,
        nested: Nested<'_>,
        path: &str,
        depth: usize,
    ) -> Result<Document> {
        let fields = match nested {
            Nested::Fields(fields) => fields,
            Nested::Variants { type_key, .. } => {
                let Some(tag) = value.get(type_key).and_then(|t| t.as_str()) else {
                    tracing::warn!(path = %path, type_key, "Variable list item has no type");
                    return Ok(value.clone());
                };
                let variant = nested
                    .variant(tag)
                    .ok_or_else(|| TransformError::UnknownVariant {
                        tag: tag.to_string(),
                        path: path.to_string(),
                    })?;
                match variant.nested() {
                    Some(Nested::Fields(fields)) => fields,
                    _ => return Ok(value.clone()),
                }
            }
        };

        let Some(entries) = value.as_map() else {
            return Ok(value.clone());
        };
        let mut out = entries.clone();
        let mut changed = false;

        for field in fields {
            let Some(current) = entries.get(&field.name) else {
                continue;
            };

            let next = if field.relation().is_some() || field.is_asset() {
                self.visit_leaf(current, field, depth).await?
            } else if let Some(inner) = field.nested() {
                let field_path = child_path(path, &field.name);
                Some(self.visit(current.clone(), inner, field_path, depth + 1).await?)
            } else {
                continue;
            };

            match next {
                Some(next) if Document::ptr_eq(&next, current) => {}
                Some(next) => {
                    out.insert(field.name.clone(), next);
                    changed = true;
                }
                None => {
                    out.shift_remove(&field.name);
                    changed = true;
                }
            }
        }

        for field in fields {
            let Some(virtual_field) = field.virtual_field() else {
                continue;
            };
            if entries.get(&field.name).is_some_and(|v| !v.is_null()) {
                continue;
            }
            let computed = self.materialize(&virtual_field, depth).await?;
            out.insert(field.name.clone(), computed);
            changed = true;
        }

        Ok(if changed {
            Document::new(DocumentKind::Map(out))
        } else {
            value.clone()
        })
    }

    /// A relation or asset value: a scalar, or a list of scalars when the
    /// field accepts several.
    async fn visit_leaf(
        &mut self,
        value: &Document,
        field: &Field,
        depth: usize,
    ) -> Result<Option<Document>> {
        let Some(items) = value.as_list() else {
            return self.visit_scalar(value, field, depth).await;
        };

        let mut resolved = Vec::with_capacity(items.len());
        let mut changed = false;
        for item in items {
            match self.visit_scalar(item, field, depth).await? {
                Some(next) => {
                    changed |= !Document::ptr_eq(&next, item);
                    resolved.push(next);
                }
                None => changed = true,
            }
        }
        Ok(Some(if changed {
            Document::list(resolved)
        } else {
            value.clone()
        }))
    }

    /// `None` means the value refers to a missing entry and is dropped.
    async fn visit_scalar(
        &mut self,
        value: &Document,
        field: &Field,
        depth: usize,
    ) -> Result<Option<Document>> {
        let Some(text) = value.as_str() else {
            return Ok(Some(value.clone()));
        };

        if let Some(relation) = field.relation() {
            return self.resolve_relation(&relation.collection, text, depth).await;
        }

        if let Some(assets) = self.assets.filter(|_| field.is_asset()) {
            let rewritten = assets.resolve_asset(text);
            if rewritten != text {
                return Ok(Some(Document::string(rewritten)));
            }
        }

        Ok(Some(value.clone()))
    }

    async fn resolve_relation(
        &mut self,
        collection: &str,
        slug: &str,
        depth: usize,
    ) -> Result<Option<Document>> {
        let registry = self.registry;
        registry.collection(collection)?;
        self.check_cancelled()?;

        let Some(loaded) = self.loader.load(collection, slug).await? else {
            tracing::warn!(collection, slug, "Related entry not found, dropping reference");
            return Ok(None);
        };
        let fields = registry.fields_for(collection, slug)?;
        let href = self
            .router
            .path_for(collection, slug, self.options.preview)?;

        let key = (collection.to_string(), slug.to_string());
        let resolved = if self.chain.contains(&key) {
            tracing::debug!(collection, slug, "Relation cycle, attaching entry unresolved");
            self.truncations += 1;
            loaded
        } else {
            self.chain.push(key);
            let result = self
                .visit(
                    loaded,
                    Nested::Fields(fields),
                    entry_path(collection, slug),
                    depth + 1,
                )
                .await;
            self.chain.pop();
            result?
        };

        Ok(Some(
            resolved
                .with_entry("slug", Document::string(slug))
                .with_entry("href", Document::string(href)),
        ))
    }

    async fn materialize(&mut self, virtual_field: &VirtualField, depth: usize) -> Result<Document> {
        let registry = self.registry;
        match virtual_field {
            VirtualField::LoadAll { collection } => {
                let c = registry.collection(collection)?;
                self.check_cancelled()?;
                let entries = self.loader.load_all(collection).await?;

                // A collection already being listed on this branch is
                // returned raw.
                let marker = (collection.clone(), "*".to_string());
                if self.chain.contains(&marker) {
                    tracing::debug!(collection = %collection, "Nested loadAll of the same collection");
                    self.truncations += 1;
                    return Ok(Document::list(entries));
                }

                self.chain.push(marker);
                let mut resolved = Vec::with_capacity(entries.len());
                for (i, entry) in entries.into_iter().enumerate() {
                    let slug = entry
                        .get("slug")
                        .and_then(|s| s.as_str())
                        .map(str::to_string)
                        .unwrap_or_else(|| i.to_string());
                    let Some(fields) = c.fields(&slug) else {
                        tracing::warn!(collection = %collection, slug = %slug, "No schema for entry");
                        resolved.push(entry);
                        continue;
                    };
                    let result = self
                        .visit(
                            entry,
                            Nested::Fields(fields),
                            entry_path(collection, &slug),
                            depth + 1,
                        )
                        .await;
                    match result {
                        Ok(entry) => resolved.push(entry),
                        Err(e) => {
                            self.chain.pop();
                            return Err(e);
                        }
                    }
                }
                self.chain.pop();
                Ok(Document::list(resolved))
            }
            VirtualField::Load { collection, slug } => {
                let fields = registry.fields_for(collection, slug)?;
                self.check_cancelled()?;
                let Some(entry) = self.loader.load(collection, slug).await? else {
                    tracing::warn!(collection = %collection, slug = %slug, "Entry named by load() not found");
                    return Ok(Document::null());
                };
                self.visit(
                    entry,
                    Nested::Fields(fields),
                    entry_path(collection, slug),
                    depth + 1,
                )
                .await
            }
        }
    }

    fn check_cancelled(&self) -> Result<()> {
        if self.cancel.is_some_and(|token| token.is_cancelled()) {
            return Err(TransformError::Cancelled);
        }
        Ok(())
    }
}
