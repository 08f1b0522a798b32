//! Collection definitions.

use serde::Deserialize;
use std::path::Path;

use crate::error::SchemaError;
use crate::field::Field;

/// Index token used when neither the collection nor the configuration sets one.
pub const DEFAULT_INDEX_FILE: &str = "index";

/// A named set of entries sharing a schema (folder) or a fixed set of files.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawCollection")]
pub struct Collection {
    pub name: String,
    pub label: Option<String>,
    /// Public URL template, e.g. `/posts/{{slug}}`.
    pub preview_path: Option<String>,
    /// Whether entries appear in preview and in static path listings.
    pub preview: bool,
    index_file: Option<String>,
    pub kind: CollectionKind,
}

/// Exactly one of the two collection shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionKind {
    Folder(FolderCollection),
    Files(Vec<CollectionFile>),
}

/// Many entries, one per file under `folder`.
#[derive(Debug, Clone, PartialEq)]
pub struct FolderCollection {
    pub folder: String,
    pub extension: String,
    pub format: String,
    pub create: bool,
    /// Slug template for new entries.
    pub slug: String,
    /// Maximum nesting depth when entries live in subfolders.
    pub nested_depth: Option<u32>,
    pub fields: Vec<Field>,
}

/// One named file of a files collection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CollectionFile {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    /// Storage path of the file.
    pub file: String,
    #[serde(default)]
    pub preview_path: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl CollectionFile {
    /// The slug this file is addressed by: its storage path's file stem.
    pub fn slug(&self) -> &str {
        Path::new(&self.file)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.file)
    }
}

impl Collection {
    /// Index token for this collection (e.g. `index` for `blog/index`).
    pub fn index_file(&self) -> &str {
        self.index_file.as_deref().unwrap_or(DEFAULT_INDEX_FILE)
    }

    /// Set the index token unless the collection overrides it.
    pub(crate) fn inherit_index_file(&mut self, index_file: &str) {
        if self.index_file.is_none() {
            self.index_file = Some(index_file.to_string());
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, CollectionKind::Folder(_))
    }

    pub fn is_files(&self) -> bool {
        matches!(self.kind, CollectionKind::Files(_))
    }

    /// The file of a files collection addressed by `slug`.
    ///
    /// A file matches when either its `name` or its storage-path stem equals
    /// the slug.
    pub fn file(&self, slug: &str) -> Option<&CollectionFile> {
        match &self.kind {
            CollectionKind::Files(files) => files
                .iter()
                .find(|f| f.name == slug)
                .or_else(|| files.iter().find(|f| f.slug() == slug)),
            CollectionKind::Folder(_) => None,
        }
    }

    /// The field schema for the entry `slug`.
    ///
    /// Folder collections ignore the slug. Files collections return `None`
    /// when no file matches.
    pub fn fields(&self, slug: &str) -> Option<&[Field]> {
        match &self.kind {
            CollectionKind::Folder(folder) => Some(&folder.fields),
            CollectionKind::Files(_) => self.file(slug).map(|f| f.fields.as_slice()),
        }
    }

    /// The URL template for the entry `slug`.
    ///
    /// Files collections prefer the file's own template over the
    /// collection's.
    pub fn template_for(&self, slug: &str) -> Option<&str> {
        match &self.kind {
            CollectionKind::Folder(_) => self.preview_path.as_deref(),
            CollectionKind::Files(_) => self
                .file(slug)
                .and_then(|f| f.preview_path.as_deref())
                .or(self.preview_path.as_deref()),
        }
    }
}

#[derive(Deserialize)]
struct RawNested {
    #[serde(default)]
    depth: Option<u32>,
}

#[derive(Deserialize)]
struct RawMetaPath {
    #[serde(default)]
    index_file: Option<String>,
}

#[derive(Deserialize)]
struct RawMeta {
    #[serde(default)]
    path: Option<RawMetaPath>,
}

#[derive(Deserialize)]
struct RawEditor {
    #[serde(default)]
    preview: Option<bool>,
}

#[derive(Deserialize)]
struct RawCollection {
    name: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    folder: Option<String>,
    #[serde(default)]
    files: Option<Vec<CollectionFile>>,
    #[serde(default)]
    fields: Option<Vec<Field>>,
    #[serde(default)]
    extension: Option<String>,
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    create: Option<bool>,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    nested: Option<RawNested>,
    #[serde(default)]
    preview_path: Option<String>,
    #[serde(default)]
    meta: Option<RawMeta>,
    #[serde(default)]
    editor: Option<RawEditor>,
}

impl TryFrom<RawCollection> for Collection {
    type Error = SchemaError;

    fn try_from(raw: RawCollection) -> Result<Self, Self::Error> {
        let kind = match (raw.folder, raw.files) {
            (Some(_), Some(_)) => {
                return Err(SchemaError::InvalidCollection {
                    name: raw.name,
                    message: "declares both `folder` and `files`".to_string(),
                });
            }
            (None, Some(files)) => CollectionKind::Files(files),
            // A folder collection without an explicit folder lives under content/<name>.
            (folder, None) if raw.fields.is_some() || folder.is_some() => {
                CollectionKind::Folder(FolderCollection {
                    folder: folder.unwrap_or_else(|| format!("content/{}", raw.name)),
                    extension: raw.extension.unwrap_or_else(|| "yml".to_string()),
                    format: raw.format.unwrap_or_else(|| "yaml".to_string()),
                    create: raw.create.unwrap_or(true),
                    slug: raw.slug.unwrap_or_else(|| "{{slug}}".to_string()),
                    nested_depth: raw.nested.and_then(|n| n.depth),
                    fields: raw.fields.unwrap_or_default(),
                })
            }
            (_, None) => {
                return Err(SchemaError::InvalidCollection {
                    name: raw.name,
                    message: "declares neither `folder`, `fields` nor `files`".to_string(),
                });
            }
        };

        Ok(Collection {
            name: raw.name,
            label: raw.label,
            preview_path: raw.preview_path,
            preview: raw.editor.and_then(|e| e.preview).unwrap_or(true),
            index_file: raw.meta.and_then(|m| m.path).and_then(|p| p.index_file),
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Result<Collection, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    #[test]
    fn test_folder_defaults() {
        let c = parse("{ name: posts, fields: [{ name: title }] }").unwrap();
        match &c.kind {
            CollectionKind::Folder(folder) => {
                assert_eq!(folder.folder, "content/posts");
                assert_eq!(folder.extension, "yml");
                assert_eq!(folder.format, "yaml");
                assert!(folder.create);
                assert_eq!(folder.slug, "{{slug}}");
                assert_eq!(folder.nested_depth, None);
            }
            other => panic!("expected folder collection, got {:?}", other),
        }
        assert_eq!(c.index_file(), DEFAULT_INDEX_FILE);
        assert!(c.preview);
    }

    #[test]
    fn test_folder_explicit_settings() {
        let c = parse(
            r#"
name: pages
folder: site/pages
extension: md
format: frontmatter
nested: { depth: 3 }
meta: { path: { index_file: _index } }
editor: { preview: false }
preview_path: "/{{slug}}"
fields: []
"#,
        )
        .unwrap();
        match &c.kind {
            CollectionKind::Folder(folder) => {
                assert_eq!(folder.folder, "site/pages");
                assert_eq!(folder.extension, "md");
                assert_eq!(folder.nested_depth, Some(3));
            }
            other => panic!("expected folder collection, got {:?}", other),
        }
        assert_eq!(c.index_file(), "_index");
        assert!(!c.preview);
        assert_eq!(c.template_for("anything"), Some("/{{slug}}"));
    }

    #[test]
    fn test_files_collection_lookup() {
        let c = parse(
            r#"
name: settings
files:
  - name: site
    file: content/settings/site-config.yml
    preview_path: /about
    fields: [{ name: title }]
  - name: nav
    file: content/settings/nav.yml
    fields: [{ name: links, widget: list }]
"#,
        )
        .unwrap();
        assert!(c.is_files());
        assert_eq!(c.file("site").unwrap().slug(), "site-config");
        assert_eq!(c.file("site-config").unwrap().name, "site");
        assert_eq!(c.fields("nav").unwrap()[0].name, "links");
        assert!(c.fields("missing").is_none());
        assert_eq!(c.template_for("site"), Some("/about"));
        assert_eq!(c.template_for("nav"), None);
    }

    #[test]
    fn test_both_kinds_rejected() {
        let err = parse(
            "{ name: broken, folder: content/x, files: [{ name: a, file: a.yml }] }",
        )
        .unwrap_err();
        assert!(err.to_string().contains("both"));
    }

    #[test]
    fn test_neither_kind_rejected() {
        let err = parse("{ name: empty }").unwrap_err();
        assert!(err.to_string().contains("neither"));
    }
}
