//! Generation driver: documents in, TypeScript catalogue out.

// Internal imports (std, crate)
use std::collections::HashSet;
use std::path::Path;

use crate::{
    catalogue::Catalogue,
    config::Config,
    emit::emit,
    error::{Error, Result},
    extract::extract_operations,
    options::GenerateOptions,
    swagger::SourceDocument,
};

// External imports (alphabetized)
use tokio::fs;

/// Extract every selected chain's operations and fold them into one catalogue.
///
/// Documents are processed in the given order; that order decides which
/// chain's comment wins and the order of operations and chain names in the
/// output.
pub fn generate_catalogue(
    documents: &[(String, SourceDocument)],
    options: &GenerateOptions,
) -> Result<Catalogue> {
    if documents.is_empty() {
        return Err(Error::NoDocuments);
    }

    let mut seen = HashSet::new();
    for (chain, _) in documents {
        if !seen.insert(chain.as_str()) {
            return Err(Error::DuplicateChain(chain.clone()));
        }
    }

    documents
        .iter()
        .filter(|(chain, _)| {
            let included = options.includes_chain(chain);
            if !included {
                log::debug!("Skipping chain '{}'", chain);
            }
            included
        })
        .try_fold(Catalogue::new(), |catalogue, (chain, doc)| -> Result<Catalogue> {
            Ok(catalogue.merge(extract_operations(chain, doc, options)?))
        })
}

/// Generate the TypeScript catalogue text for `documents`
pub fn generate(documents: &[(String, SourceDocument)], options: &GenerateOptions) -> Result<String> {
    emit(&generate_catalogue(documents, options)?)
}

/// Write generated text to `path`, creating missing parent directories
pub async fn write_output<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    log::debug!("Writing {} bytes to {}", content.len(), path.display());
    fs::write(path, content).await?;
    Ok(())
}

/// Load the configured input directory, generate, and write the output file.
///
/// Returns the merged catalogue so callers can report on it.
pub async fn generate_from_config(config: &Config) -> Result<Catalogue> {
    let documents = SourceDocument::load_directory(&config.input_dir).await?;
    let options = config.generate_options();

    let catalogue = generate_catalogue(&documents, &options)?;
    write_output(&config.output_path, &emit(&catalogue)?).await?;
    Ok(catalogue)
}
