//! Swagger v2 document model and loading.
//!
//! Documents are deserialized straight into typed structures. Schemas are
//! validated at this boundary: every node becomes one [`Schema`] variant, so
//! the generator never has to inspect raw JSON.
//!
//! # Examples
//!
//! ```no_run
//! use chainapi_core::swagger::SourceDocument;
//! use chainapi_core::error::Result;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! let doc = SourceDocument::from_file("inputs/swagger_info/evmos.yaml").await?;
//! if let Some(title) = doc.title() {
//!     println!("API Title: {}", title);
//! }
//! println!("{} paths", doc.paths.len());
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::Path;

use crate::Error;

// External imports (alphabetized)
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tokio::fs;

/// File extensions picked up when loading a directory of documents
const DOCUMENT_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// HTTP verbs other than `get`/`post` that may appear on a path entry
const OTHER_METHODS: [&str; 5] = ["put", "delete", "patch", "head", "options"];

/// One chain's parsed Swagger v2 document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceDocument {
    /// Document metadata
    #[serde(default)]
    pub info: Option<Info>,
    /// Endpoint path -> path entry, in document order
    #[serde(default)]
    pub paths: IndexMap<String, PathEntry>,
    /// Reusable schemas addressed by `#/definitions/<name>`
    #[serde(default)]
    pub definitions: IndexMap<String, Schema>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Info {
    pub title: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
}

/// Operations declared under one endpoint path
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathEntry {
    pub get: Option<OperationDescriptor>,
    pub post: Option<OperationDescriptor>,
    /// Everything else on the entry (other verbs, path-level parameters, `x-` keys)
    #[serde(flatten)]
    pub other: IndexMap<String, JsonValue>,
}

impl PathEntry {
    /// HTTP verbs present on this entry that the generator does not support
    pub fn unsupported_methods(&self) -> Vec<&str> {
        self.other
            .keys()
            .map(String::as_str)
            .filter(|key| OTHER_METHODS.contains(key))
            .collect()
    }
}

/// The data declared for one HTTP method of a path
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OperationDescriptor {
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub parameters: Option<Vec<Parameter>>,
    /// Keyed by status code string (`"200"`) or `"default"`
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Response {
    pub description: Option<String>,
    pub schema: Option<Schema>,
}

/// A single operation parameter
#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    pub description: Option<String>,
    pub required: Option<bool>,
    #[serde(rename = "type")]
    pub param_type: Option<String>,
    /// Primitive format tag, e.g. `int64`
    pub format: Option<String>,
    /// Only meaningful for body parameters
    pub schema: Option<Schema>,
}

/// Where a parameter travels in the request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ParameterLocation {
    Path,
    Query,
    Body,
    /// `header`, `formData` or anything else; kept so it can be reported
    Unsupported(String),
}

impl From<String> for ParameterLocation {
    fn from(value: String) -> Self {
        match value.as_str() {
            "path" => Self::Path,
            "query" => Self::Query,
            "body" => Self::Body,
            _ => Self::Unsupported(value),
        }
    }
}

/// Title and description shared by every schema kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaMeta {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl SchemaMeta {
    /// Human comment for the schema: its title, falling back to its description
    pub fn comment(&self) -> Option<&str> {
        self.title.as_deref().or(self.description.as_deref())
    }
}

/// A `$ref` pointer such as `#/definitions/cosmos.base.v1beta1.Coin`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaReference {
    pub pointer: String,
}

impl SchemaReference {
    /// The final pointer segment, used as the definitions key
    pub fn name(&self) -> &str {
        self.pointer.rsplit('/').next().unwrap_or(&self.pointer)
    }
}

/// A schema node
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawSchema")]
pub enum Schema {
    Reference(SchemaReference),
    Object {
        meta: SchemaMeta,
        /// `None` when the schema declares no properties
        properties: Option<IndexMap<String, Schema>>,
    },
    Array {
        meta: SchemaMeta,
        items: Box<Schema>,
    },
    String(SchemaMeta),
    Integer(SchemaMeta),
    Number(SchemaMeta),
    Boolean(SchemaMeta),
    /// A `type` the generator has no TypeScript form for, such as `file`.
    /// `kind` is `None` for the implicit items of an array without `items`.
    Unknown {
        meta: SchemaMeta,
        kind: Option<String>,
    },
}

/// Wire shape of a schema node before validation
#[derive(Deserialize)]
struct RawSchema {
    #[serde(rename = "$ref")]
    reference: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    title: Option<String>,
    description: Option<String>,
    properties: Option<IndexMap<String, Schema>>,
    items: Option<Box<Schema>>,
}

impl From<RawSchema> for Schema {
    fn from(raw: RawSchema) -> Self {
        if let Some(pointer) = raw.reference {
            return Schema::Reference(SchemaReference { pointer });
        }

        let meta = SchemaMeta {
            title: raw.title,
            description: raw.description,
        };

        // Untyped nodes (including `{}`) are treated as objects
        match raw.kind {
            None => Schema::Object {
                meta,
                properties: raw.properties,
            },
            Some(kind) => match kind.as_str() {
                "object" => Schema::Object {
                    meta,
                    properties: raw.properties,
                },
                "array" => Schema::Array {
                    meta,
                    items: raw.items.unwrap_or_else(|| {
                        Box::new(Schema::Unknown {
                            meta: SchemaMeta::default(),
                            kind: None,
                        })
                    }),
                },
                "string" => Schema::String(meta),
                "integer" => Schema::Integer(meta),
                "number" => Schema::Number(meta),
                "boolean" => Schema::Boolean(meta),
                _ => Schema::Unknown {
                    meta,
                    kind: Some(kind),
                },
            },
        }
    }
}

impl SourceDocument {
    /// Load a document from a file or URL (supports both YAML and JSON)
    pub async fn from_file_or_url<P: AsRef<str>>(location: P) -> crate::Result<Self> {
        let location = location.as_ref();

        // Check if the input looks like a URL
        if location.starts_with("http://") || location.starts_with("https://") {
            return Self::from_url(location).await;
        }

        // Otherwise treat as a file path
        Self::from_file(location).await
    }

    /// Load a document from a file (supports both YAML and JSON)
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        Self::parse_content(&content).map_err(|e| {
            Error::swagger(format!(
                "Failed to parse Swagger document at {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Load a document from a URL (supports both YAML and JSON)
    pub async fn from_url(url: &str) -> crate::Result<Self> {
        let response = reqwest::get(url).await.map_err(|e| {
            Error::swagger(format!("Failed to fetch Swagger document from {}: {}", url, e))
        })?;

        if !response.status().is_success() {
            return Err(Error::swagger(format!(
                "Failed to fetch Swagger document from {}: HTTP {}",
                url,
                response.status()
            )));
        }

        let content = response.text().await.map_err(|e| {
            Error::swagger(format!("Failed to read response from {}: {}", url, e))
        })?;

        Self::parse_content(&content).map_err(|e| {
            Error::swagger(format!(
                "Failed to parse Swagger document from {}: {}",
                url, e
            ))
        })
    }

    /// Parse content as either JSON or YAML
    pub fn parse_content(content: &str) -> crate::Result<Self> {
        // Try to parse as JSON first
        match serde_json::from_str(content) {
            Ok(doc) => Ok(doc),
            // Content that is clearly JSON keeps the JSON diagnostic
            Err(e) if content.trim_start().starts_with('{') => Err(e.into()),
            Err(_) => Ok(serde_yaml::from_str(content)?),
        }
    }

    /// Load every document in `dir`, naming each chain after its file stem.
    ///
    /// Entries are returned in file-name order so repeated runs see the same
    /// sequence. Files without a `.yaml`, `.yml` or `.json` extension are skipped.
    pub async fn load_directory<P: AsRef<Path>>(
        dir: P,
    ) -> crate::Result<Vec<(String, SourceDocument)>> {
        let dir = dir.as_ref();
        let mut entries = fs::read_dir(dir).await.map_err(|e| {
            Error::config(format!(
                "Failed to read input directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let supported = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| DOCUMENT_EXTENSIONS.contains(&ext))
                .unwrap_or(false);
            if !supported {
                log::debug!("Skipping non-document file: {}", path.display());
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            files.push((stem.to_string(), path));
        }
        files.sort();

        let mut documents = Vec::with_capacity(files.len());
        for (chain, path) in files {
            log::debug!("Loading '{}' from {}", chain, path.display());
            documents.push((chain, Self::from_file(&path).await?));
        }
        Ok(documents)
    }

    /// Get the title of the API
    pub fn title(&self) -> Option<&str> {
        self.info.as_ref()?.title.as_deref()
    }

    /// Get the version of the API
    pub fn version(&self) -> Option<&str> {
        self.info.as_ref()?.version.as_deref()
    }

    /// Resolve a `$ref` pointer against this document's definitions.
    ///
    /// Only the last `/`-separated segment is used as the key; the rest of the
    /// pointer is not interpreted. Returns `None` when no such definition exists.
    pub fn resolve(&self, pointer: &str) -> Option<&Schema> {
        let name = pointer.rsplit('/').next().unwrap_or(pointer);
        self.definitions.get(name)
    }
}
