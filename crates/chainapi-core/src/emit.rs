//! TypeScript rendering of a merged [`Catalogue`].
//!
//! The output layout lives in `templates/rest_api.ts.tera`; this module only
//! prepares a view of the catalogue in which keys are already quoted where
//! needed and comments are safe to place inside `/** */`.

// External imports (alphabetized)
use serde::Serialize;
use tera::{Context, Tera};

use crate::{
    catalogue::{Catalogue, ChainMap, OperationRecord},
    error::Result,
    utils::{doc_comment, property_key, quoted, sanitize_comment},
};

const TEMPLATE_NAME: &str = "rest_api.ts";
const MACROS_NAME: &str = "macros.ts";

/// Union type used when the catalogue names no chain at all
const EMPTY_UNION: &str = "never";

/// One `chain: type` line
#[derive(Debug, Serialize)]
struct ChainEntry<'a> {
    chain: String,
    ty: &'a str,
}

#[derive(Debug, Serialize)]
struct EndpointView<'a> {
    chain: String,
    path: String,
    template: &'a str,
}

#[derive(Debug, Serialize)]
struct OperationView<'a> {
    key: String,
    comment: Option<String>,
    method: &'static str,
    endpoint: Vec<EndpointView<'a>>,
    path_params: Vec<ChainEntry<'a>>,
    query_params: Vec<ChainEntry<'a>>,
    body_params: Vec<ChainEntry<'a>>,
    success: Vec<ChainEntry<'a>>,
    error: Vec<ChainEntry<'a>>,
}

impl<'a> OperationView<'a> {
    fn new(operation_id: &str, record: &'a OperationRecord) -> Self {
        Self {
            key: property_key(operation_id),
            comment: doc_comment(record.comment.as_deref()),
            method: record.method.as_str(),
            endpoint: record
                .endpoint
                .iter()
                .map(|(chain, endpoint)| EndpointView {
                    chain: property_key(chain),
                    path: sanitize_comment(&endpoint.path),
                    template: &endpoint.template,
                })
                .collect(),
            path_params: entries(&record.params.path),
            query_params: entries(&record.params.query),
            body_params: entries(&record.params.body),
            success: entries(&record.response.success),
            error: entries(&record.response.error),
        }
    }
}

fn entries(map: &ChainMap<String>) -> Vec<ChainEntry<'_>> {
    map.iter()
        .map(|(chain, ty)| ChainEntry {
            chain: property_key(chain),
            ty,
        })
        .collect()
}

/// `'a' | 'b'` over the given chain names, or `never`
fn chain_union(chains: &[&str]) -> String {
    if chains.is_empty() {
        return EMPTY_UNION.to_string();
    }
    chains
        .iter()
        .map(|chain| quoted(chain))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Renders catalogues into the TypeScript type catalogue
#[derive(Debug)]
pub struct CatalogueEmitter {
    tera: Tera,
}

impl CatalogueEmitter {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (MACROS_NAME, include_str!("../templates/macros.ts.tera")),
            (TEMPLATE_NAME, include_str!("../templates/rest_api.ts.tera")),
        ])?;
        Ok(Self { tera })
    }

    /// Render `catalogue`. The same catalogue always renders to the same text.
    pub fn render(&self, catalogue: &Catalogue) -> Result<String> {
        let operations: Vec<OperationView<'_>> = catalogue
            .iter()
            .map(|(operation_id, record)| OperationView::new(operation_id, record))
            .collect();

        let mut context = Context::new();
        context.insert("operations", &operations);
        context.insert("chain_union", &chain_union(&catalogue.chain_names()));

        log::debug!(
            "Rendering {} operations into '{}'",
            operations.len(),
            TEMPLATE_NAME
        );
        let rendered = self.tera.render(TEMPLATE_NAME, &context).map_err(|e| {
            log::error!("Template rendering failed for '{}': {}", TEMPLATE_NAME, e);
            e
        })?;
        Ok(rendered)
    }
}

/// Render `catalogue` with a fresh [`CatalogueEmitter`]
pub fn emit(catalogue: &Catalogue) -> Result<String> {
    CatalogueEmitter::new()?.render(catalogue)
}
