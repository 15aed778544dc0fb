//! Extraction of one chain's operations from its Swagger document.

use crate::{
    catalogue::{Catalogue, ChainMap, Endpoint, HttpMethod, OperationRecord, Params, Responses},
    error::{Error, Result},
    options::GenerateOptions,
    params::{endpoint_template, translate_parameters},
    swagger::{OperationDescriptor, PathEntry, SourceDocument},
    translate::{Translator, UNKNOWN},
};

/// Status key of the success response
const SUCCESS_RESPONSE: &str = "200";

/// Key of the error response
const ERROR_RESPONSE: &str = "default";

/// Build a single-chain catalogue from `doc`.
///
/// Each path contributes one operation: its `get` operation if present,
/// otherwise its `post` operation. Paths with neither are skipped with a
/// warning. An operation without an `operationId` fails the whole extraction.
pub fn extract_operations(
    chain: &str,
    doc: &SourceDocument,
    options: &GenerateOptions,
) -> Result<Catalogue> {
    let translator = Translator::new(doc, options.refs);
    let mut catalogue = Catalogue::new();

    for (path, entry) in &doc.paths {
        let Some((method, descriptor)) = select_method(chain, path, entry) else {
            continue;
        };

        let operation_id = descriptor
            .operation_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::MissingOperationId {
                chain: chain.to_string(),
                path: path.clone(),
            })?;

        let parameters = descriptor.parameters.as_deref();
        let params = translate_parameters(&translator, parameters, options.body_params)?;
        let success = response_type(&translator, descriptor, SUCCESS_RESPONSE)?;
        let error = response_type(&translator, descriptor, ERROR_RESPONSE)?;

        let record = OperationRecord {
            method,
            comment: descriptor.summary.clone(),
            endpoint: for_chain(
                chain,
                Endpoint {
                    template: endpoint_template(path, parameters),
                    path: path.clone(),
                },
            ),
            params: Params {
                path: for_chain(chain, params.path),
                query: for_chain(chain, params.query),
                body: for_chain(chain, params.body),
            },
            response: Responses {
                success: for_chain(chain, success),
                error: for_chain(chain, error),
            },
        };

        if !catalogue.insert(operation_id, record) {
            log::warn!(
                "Chain '{}' declares operation '{}' more than once; keeping the first (skipped '{}')",
                chain,
                operation_id,
                path
            );
        }
    }

    log::debug!("Extracted {} operations for chain '{}'", catalogue.len(), chain);
    Ok(catalogue)
}

fn select_method<'d>(
    chain: &str,
    path: &str,
    entry: &'d PathEntry,
) -> Option<(HttpMethod, &'d OperationDescriptor)> {
    match (&entry.get, &entry.post) {
        (Some(get), post) => {
            if post.is_some() {
                log::warn!(
                    "Path '{}' in chain '{}' has both get and post; only get is generated",
                    path,
                    chain
                );
            }
            Some((HttpMethod::Get, get))
        }
        (None, Some(post)) => Some((HttpMethod::Post, post)),
        (None, None) => {
            let found = entry.unsupported_methods();
            log::warn!(
                "Skipping path '{}' in chain '{}': no get or post operation (found: {})",
                path,
                chain,
                if found.is_empty() {
                    "none".to_string()
                } else {
                    found.join(", ")
                }
            );
            None
        }
    }
}

fn response_type(
    translator: &Translator<'_>,
    descriptor: &OperationDescriptor,
    status: &str,
) -> Result<String> {
    match descriptor
        .responses
        .get(status)
        .and_then(|response| response.schema.as_ref())
    {
        Some(schema) => translator.translate_ref_or_schema(schema),
        None => {
            log::debug!(
                "No '{}' response schema for '{}'",
                status,
                descriptor.operation_id.as_deref().unwrap_or_default()
            );
            Ok(UNKNOWN.to_string())
        }
    }
}

fn for_chain<T>(chain: &str, value: T) -> ChainMap<T> {
    let mut map = ChainMap::new();
    map.insert(chain.to_string(), value);
    map
}
