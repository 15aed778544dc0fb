//! Schema to TypeScript type translation.
//!
//! A [`Translator`] is bound to one document so that `$ref` pointers can be
//! resolved against its definitions. Objects become multi-line object types
//! with one `key: type` line per property (in document order), arrays become
//! `Array<...>`, and `integer`/`number` both become `number`.

use crate::{
    error::{Error, Result},
    options::RefPolicy,
    swagger::{Schema, SchemaReference, SourceDocument},
    utils::{doc_comment, property_key},
};

/// Type of a reference whose definition does not exist
pub const UNKNOWN: &str = "unknown";

/// Type of an object without declared properties
pub const EMPTY_OBJECT: &str = "{}";

/// Marker for "no parameters of this kind"
pub const UNDEFINED: &str = "undefined";

/// A translated type expression and the comment that documents it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub type_expr: String,
    pub comment: Option<String>,
}

impl Translation {
    fn new(type_expr: impl Into<String>, comment: Option<&str>) -> Self {
        Self {
            type_expr: type_expr.into(),
            comment: comment.map(String::from),
        }
    }

    /// The type expression, preceded by its doc comment line when there is one
    pub fn render(&self) -> String {
        match doc_comment(self.comment.as_deref()) {
            Some(comment) => format!("{}\n{}", comment, self.type_expr),
            None => self.type_expr.clone(),
        }
    }
}

/// Translates schemas of one document
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    doc: &'a SourceDocument,
    policy: RefPolicy,
}

impl<'a> Translator<'a> {
    pub fn new(doc: &'a SourceDocument, policy: RefPolicy) -> Self {
        Self { doc, policy }
    }

    pub fn document(&self) -> &'a SourceDocument {
        self.doc
    }

    /// Translate a schema into a type expression and comment
    pub fn translate(&self, schema: &Schema) -> Result<Translation> {
        self.translate_node(schema, &mut Vec::new())
    }

    /// Translate a schema that may be a bare reference and render it with its comment
    pub fn translate_ref_or_schema(&self, schema: &Schema) -> Result<String> {
        Ok(self.translate(schema)?.render())
    }

    fn translate_node(&self, schema: &Schema, expanding: &mut Vec<String>) -> Result<Translation> {
        match schema {
            Schema::Reference(reference) => self.translate_reference(reference, expanding),
            Schema::Object { meta, properties } => {
                let Some(properties) = properties.as_ref().filter(|p| !p.is_empty()) else {
                    return Ok(Translation::new(EMPTY_OBJECT, meta.comment()));
                };

                let mut body = String::new();
                for (name, property) in properties {
                    // protobuf `Any` envelopes always carry a string type_url
                    let translated = if name == "type_url" {
                        Translation::new("string", None)
                    } else {
                        self.translate_node(property, expanding)?
                    };

                    body.push('\n');
                    if let Some(comment) = doc_comment(translated.comment.as_deref()) {
                        body.push_str(&comment);
                        body.push('\n');
                    }
                    body.push_str(&property_key(name));
                    body.push_str(": ");
                    body.push_str(&translated.type_expr);
                }

                Ok(Translation::new(format!("{{{}\n}}", body), meta.comment()))
            }
            Schema::Array { meta, items } => {
                let element = self.translate_node(items, expanding)?;
                Ok(Translation::new(
                    format!("Array<{}>", element.type_expr),
                    meta.comment(),
                ))
            }
            Schema::String(meta) => Ok(Translation::new("string", meta.comment())),
            Schema::Boolean(meta) => Ok(Translation::new("boolean", meta.comment())),
            Schema::Integer(meta) | Schema::Number(meta) => {
                Ok(Translation::new("number", meta.comment()))
            }
            Schema::Unknown { meta, kind } => {
                match kind {
                    Some(kind) => log::warn!("Unsupported schema type '{}'; using unknown", kind),
                    None => log::warn!("Array schema without 'items'; using Array<unknown>"),
                }
                Ok(Translation::new(UNKNOWN, meta.comment()))
            }
        }
    }

    fn translate_reference(
        &self,
        reference: &SchemaReference,
        expanding: &mut Vec<String>,
    ) -> Result<Translation> {
        let Some(target) = self.doc.resolve(&reference.pointer) else {
            log::debug!("Unresolved reference '{}'", reference.pointer);
            return Ok(Translation::new(UNKNOWN, None));
        };

        match self.policy {
            // The reference node has no inline shape of its own
            RefPolicy::Legacy => Ok(Translation::new(EMPTY_OBJECT, None)),
            RefPolicy::Substitute => {
                let name = reference.name().to_string();
                if expanding.contains(&name) {
                    return Err(Error::CyclicReference(name));
                }
                expanding.push(name);
                let translated = self.translate_node(target, expanding);
                expanding.pop();
                translated
            }
        }
    }
}
