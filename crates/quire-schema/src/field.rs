//! Field descriptors.
//!
//! Fields are written in the CMS configuration as maps with a `widget` key
//! selecting the kind (`string`, `object`, `list`, `relation`, ...). A field
//! without a `widget` is a `string` field. Unknown widgets deserialize to
//! [`FieldKind::Other`] and are treated as opaque scalars.

use serde::Deserialize;
use serde_json::Value;

use crate::error::SchemaError;
use crate::hint::VirtualField;

fn default_true() -> bool {
    true
}

fn default_type_key() -> String {
    "type".to_string()
}

/// One field in a collection schema.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawField")]
pub struct Field {
    /// Map key this field describes.
    pub name: String,
    pub label: Option<String>,
    pub required: bool,
    pub kind: FieldKind,
}

/// The widget-specific part of a field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "widget", rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Text,
    Number,
    Boolean,
    Datetime,
    Date,
    Color,
    Markdown,
    Code,
    Image,
    File,
    Object {
        #[serde(default)]
        fields: Vec<Field>,
    },
    List(ListField),
    Select(SelectField),
    Relation(RelationField),
    Hidden {
        #[serde(default)]
        hint: Option<String>,
    },
    #[serde(other)]
    Other,
}

/// A list widget.
///
/// Exactly one of `field`, `fields` or `types` is normally present; a list
/// with none of them holds plain strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListField {
    #[serde(default)]
    pub field: Option<Box<Field>>,
    #[serde(default)]
    pub fields: Option<Vec<Field>>,
    /// Named item schemas for a variable (polymorphic) list.
    #[serde(default)]
    pub types: Option<Vec<Field>>,
    /// Item key holding the variant name.
    #[serde(default = "default_type_key", rename = "typeKey")]
    pub type_key: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectField {
    #[serde(default)]
    pub options: Vec<SelectOption>,
    #[serde(default)]
    pub multiple: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SelectOption {
    Value(String),
    Labeled { label: String, value: String },
}

impl SelectOption {
    pub fn value(&self) -> &str {
        match self {
            SelectOption::Value(v) => v,
            SelectOption::Labeled { value, .. } => value,
        }
    }
}

/// A relation widget: the stored value is a slug in `collection`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RelationField {
    pub collection: String,
    #[serde(default)]
    pub multiple: bool,
    #[serde(default)]
    pub search_fields: Vec<String>,
    #[serde(default)]
    pub value_field: Option<String>,
    #[serde(default)]
    pub display_fields: Vec<String>,
}

/// The sub-schema a field declares for its children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Nested<'a> {
    /// Children are described by a plain field list.
    Fields(&'a [Field]),

    /// Children are maps whose `type_key` entry names one of `types`.
    Variants {
        type_key: &'a str,
        types: &'a [Field],
    },
}

impl<'a> Nested<'a> {
    /// Look up a variant by its tag. Always `None` for plain field lists.
    pub fn variant(&self, tag: &str) -> Option<&'a Field> {
        match self {
            Nested::Variants { types, .. } => types.iter().find(|t| t.name == tag),
            Nested::Fields(_) => None,
        }
    }

    /// The implied field for scalar list items.
    pub fn first_field(&self) -> Option<&'a Field> {
        match self {
            Nested::Fields(fields) => fields.first(),
            Nested::Variants { .. } => None,
        }
    }
}

impl Field {
    /// Create a field programmatically.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Field {
            name: name.into(),
            label: None,
            required: true,
            kind,
        }
    }

    /// The relation settings if this is a relation field.
    pub fn relation(&self) -> Option<&RelationField> {
        match &self.kind {
            FieldKind::Relation(relation) => Some(relation),
            _ => None,
        }
    }

    /// Whether the value is a media path the asset resolver should rewrite.
    pub fn is_asset(&self) -> bool {
        matches!(self.kind, FieldKind::Image | FieldKind::File)
    }

    /// The virtual computation encoded in a hidden field's hint, if any.
    pub fn virtual_field(&self) -> Option<VirtualField> {
        match &self.kind {
            FieldKind::Hidden { hint: Some(hint) } => VirtualField::parse(hint),
            _ => None,
        }
    }

    /// The sub-schema for this field's children.
    ///
    /// A single-widget list whose widget is an object describes its items
    /// with that object's fields, since the items are the object values.
    pub fn nested(&self) -> Option<Nested<'_>> {
        match &self.kind {
            FieldKind::Object { fields } => Some(Nested::Fields(fields)),
            FieldKind::List(list) => {
                if let Some(types) = &list.types {
                    Some(Nested::Variants {
                        type_key: &list.type_key,
                        types,
                    })
                } else if let Some(fields) = &list.fields {
                    Some(Nested::Fields(fields))
                } else if let Some(field) = &list.field {
                    match &field.kind {
                        FieldKind::Object { fields } => Some(Nested::Fields(fields)),
                        _ => Some(Nested::Fields(std::slice::from_ref(field.as_ref()))),
                    }
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct RawField {
    name: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default = "default_true")]
    required: bool,
    #[serde(default)]
    widget: Option<String>,
    #[serde(flatten)]
    rest: serde_json::Map<String, Value>,
}

impl TryFrom<RawField> for Field {
    type Error = SchemaError;

    fn try_from(raw: RawField) -> Result<Self, Self::Error> {
        let mut rest = raw.rest;
        rest.insert(
            "widget".to_string(),
            Value::String(raw.widget.unwrap_or_else(|| "string".to_string())),
        );
        let kind: FieldKind =
            serde_json::from_value(Value::Object(rest)).map_err(|e| SchemaError::InvalidField {
                name: raw.name.clone(),
                message: e.to_string(),
            })?;

        Ok(Field {
            name: raw.name,
            label: raw.label,
            required: raw.required,
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Field {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_missing_widget_is_string() {
        let field = parse("name: title");
        assert_eq!(field.kind, FieldKind::String);
        assert!(field.required);
    }

    #[test]
    fn test_unknown_widget_is_other() {
        let field = parse("{ name: map, widget: map, decimals: 4 }");
        assert_eq!(field.kind, FieldKind::Other);
    }

    #[test]
    fn test_relation_field() {
        let field = parse(
            "{ name: author, widget: relation, collection: authors, search_fields: [name] }",
        );
        let relation = field.relation().unwrap();
        assert_eq!(relation.collection, "authors");
        assert_eq!(relation.search_fields, vec!["name"]);
        assert!(!relation.multiple);
    }

    #[test]
    fn test_image_and_file_are_assets() {
        assert!(parse("{ name: cover, widget: image }").is_asset());
        assert!(parse("{ name: pdf, widget: file }").is_asset());
        assert!(!parse("{ name: title }").is_asset());
    }

    #[test]
    fn test_object_nested_fields() {
        let field = parse(
            r#"
name: seo
widget: object
fields:
  - { name: title }
  - { name: image, widget: image }
"#,
        );
        match field.nested() {
            Some(Nested::Fields(fields)) => {
                assert_eq!(fields.len(), 2);
                assert_eq!(fields[1].name, "image");
            }
            other => panic!("expected fields, got {:?}", other),
        }
    }

    #[test]
    fn test_variable_list_nested_variants() {
        let field = parse(
            r#"
name: blocks
widget: list
types:
  - name: hero
    widget: object
    fields: [{ name: heading }]
  - name: gallery
    widget: object
    fields: [{ name: images, widget: list, field: { name: image, widget: image } }]
"#,
        );
        let nested = field.nested().unwrap();
        match nested {
            Nested::Variants { type_key, types } => {
                assert_eq!(type_key, "type");
                assert_eq!(types.len(), 2);
            }
            other => panic!("expected variants, got {:?}", other),
        }
        assert_eq!(nested.variant("gallery").unwrap().name, "gallery");
        assert!(nested.variant("quote").is_none());
        assert!(nested.first_field().is_none());
    }

    #[test]
    fn test_custom_type_key() {
        let field = parse(
            r#"
name: sections
widget: list
typeKey: kind
types: [{ name: text, widget: object, fields: [{ name: body }] }]
"#,
        );
        assert!(matches!(
            field.nested(),
            Some(Nested::Variants { type_key: "kind", .. })
        ));
    }

    #[test]
    fn test_single_widget_list_of_relations() {
        let field = parse(
            r#"
name: related
widget: list
field: { name: post, widget: relation, collection: posts }
"#,
        );
        let nested = field.nested().unwrap();
        assert_eq!(nested.first_field().unwrap().name, "post");
        assert!(nested.first_field().unwrap().relation().is_some());
    }

    #[test]
    fn test_single_widget_list_of_objects_uses_object_fields() {
        let field = parse(
            r#"
name: links
widget: list
field: { name: link, widget: object, fields: [{ name: label }, { name: url }] }
"#,
        );
        match field.nested() {
            Some(Nested::Fields(fields)) => assert_eq!(fields[0].name, "label"),
            other => panic!("expected fields, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_list_has_no_nested_schema() {
        let field = parse("{ name: tags, widget: list }");
        assert!(field.nested().is_none());
    }

    #[test]
    fn test_select_options() {
        let field = parse(
            r#"
name: color
widget: select
options: [red, { label: Blue, value: blue }]
"#,
        );
        match &field.kind {
            FieldKind::Select(select) => {
                let values: Vec<_> = select.options.iter().map(|o| o.value()).collect();
                assert_eq!(values, vec!["red", "blue"]);
            }
            other => panic!("expected select, got {:?}", other),
        }
    }

    #[test]
    fn test_hidden_field_hint() {
        let field = parse(r#"{ name: posts, widget: hidden, hint: "loadAll(posts)" }"#);
        assert_eq!(
            field.virtual_field(),
            Some(VirtualField::LoadAll {
                collection: "posts".to_string()
            })
        );

        let plain = parse("{ name: id, widget: hidden }");
        assert!(plain.virtual_field().is_none());
    }
}
