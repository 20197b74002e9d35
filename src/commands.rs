//! The harvest run: scan, extract, resolve names, write the manifest, download.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::Error;
use crate::extractor;
use crate::fetcher;
use crate::manifest::ReferenceMap;
use crate::naming;
use crate::scanner;

/// Read every document and collect its remote references into one map.
/// Invalid UTF-8 is decoded lossily, so a stray Latin-1 byte never drops a document.
///
/// # Errors
///
/// Returns `Error::DocumentRead` if a document cannot be read.
pub fn collect_references(documents: &[PathBuf]) -> Result<ReferenceMap, Error> {
    let mut map = ReferenceMap::default();

    for document in documents {
        let bytes = std::fs::read(document).map_err(|source| {
            return Error::DocumentRead {
                path: document.clone(),
                source,
            };
        })?;
        let content = String::from_utf8_lossy(&bytes);
        let references = extractor::extract(&content);
        tracing::debug!(document = %document.display(), found = references.len(), "extracted");

        for reference in references.into_iter().filter(|r| return extractor::is_remote(r)) {
            let file_name = naming::resolve_name(&reference);
            map.insert(reference, file_name);
        }
    }

    return Ok(map);
}

/// Scan documents, write the manifest, then download every remote image.
///
/// Download failures are logged per item and do not fail the run.
///
/// # Errors
///
/// Returns scan, document read, and manifest write errors.
pub async fn harvest(config: &Config) -> Result<ReferenceMap, Error> {
    let documents = scanner::scan(&config.input_dir, &config.extension, &config.exclude)?;
    let map = collect_references(&documents)?;

    map.write(&config.map_file)?;
    println!("Found {} image references", map.len());
    println!("Saved reference map to {}", config.map_file.display());

    if map.is_empty() {
        println!("Nothing to download");
        return Ok(map);
    }

    println!("Downloading images...");
    let client = reqwest::Client::new();
    fetcher::fetch_all(&client, map.entries(), &config.output_dir).await;
    println!("All downloads attempted");

    return Ok(map);
}
