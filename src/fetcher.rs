//! Concurrent batch download of mapped references.

use std::path::{Path, PathBuf};

use futures::future::join_all;

use crate::error::Error;
use crate::manifest::MapEntry;

/// Download every entry into `output_dir` concurrently and wait for all of them.
///
/// Every download starts at once with no cap. Each entry succeeds or fails on
/// its own: a failure is logged and returned in its slot, never aborting the
/// rest. The outcomes are in the same order as `entries`.
pub async fn fetch_all(
    client: &reqwest::Client,
    entries: &[MapEntry],
    output_dir: &Path,
) -> Vec<Result<PathBuf, Error>> {
    let downloads = entries.iter().map(|entry| {
        return async move {
            let outcome = fetch_one(client, entry, output_dir).await;
            match &outcome {
                Ok(path) => {
                    tracing::info!(file = %entry.file_name, path = %path.display(), "downloaded");
                },
                Err(e) => tracing::warn!(reference = %entry.reference, "{e}"),
            }
            return outcome;
        };
    });

    return join_all(downloads).await;
}

/// GET one reference and write its body to `output_dir/file_name`.
///
/// # Errors
///
/// Returns `Error::HttpStatus` for a non-success response, or `Error::Fetch`
/// for transport, body, or write failures.
async fn fetch_one(
    client: &reqwest::Client,
    entry: &MapEntry,
    output_dir: &Path,
) -> Result<PathBuf, Error> {
    let fetch_error = |reason: String| {
        return Error::Fetch {
            reference: entry.reference.clone(),
            reason,
        };
    };

    let response = client
        .get(&entry.reference)
        .send()
        .await
        .map_err(|err| return fetch_error(err.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::HttpStatus {
            reference: entry.reference.clone(),
            status: status.to_string(),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|err| return fetch_error(err.to_string()))?;

    // Safe to race: create_dir_all succeeds when the directory already exists.
    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|err| return fetch_error(format!("create {}: {err}", output_dir.display())))?;

    let path = output_dir.join(&entry.file_name);
    tokio::fs::write(&path, &body)
        .await
        .map_err(|err| return fetch_error(format!("write {}: {err}", path.display())))?;

    return Ok(path);
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::unwrap_used, reason = "test code")]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn entry(reference: String, file_name: &str) -> MapEntry {
        return MapEntry {
            file_name: file_name.to_string(),
            reference,
        };
    }

    async fn serve(server: &MockServer, route: &str, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(template)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn creates_nested_output_dir() {
        let server = MockServer::start().await;
        serve(&server, "/a.png", ResponseTemplate::new(200).set_body_bytes(b"A".to_vec())).await;

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("deep/er/images");
        let entries = vec![entry(format!("{}/a.png", server.uri()), "a.png")];

        let outcomes = fetch_all(&reqwest::Client::new(), &entries, &output).await;

        assert!(outcomes.iter().all(Result::is_ok));
        assert_eq!(std::fs::read(output.join("a.png")).unwrap(), b"A");
    }

    #[tokio::test]
    async fn empty_batch_completes() {
        let dir = tempfile::tempdir().unwrap();
        let outcomes = fetch_all(&reqwest::Client::new(), &[], dir.path()).await;

        assert!(outcomes.is_empty());
    }

    #[tokio::test]
    async fn failure_does_not_affect_other_items() {
        let server = MockServer::start().await;
        serve(&server, "/ok.png", ResponseTemplate::new(200).set_body_bytes(b"PNGDATA".to_vec()))
            .await;
        serve(&server, "/gone.png", ResponseTemplate::new(404)).await;

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("images");
        let entries = vec![
            entry(format!("{}/gone.png", server.uri()), "gone.png"),
            entry(format!("{}/ok.png", server.uri()), "ok.png"),
        ];

        let outcomes = fetch_all(&reqwest::Client::new(), &entries, &output).await;

        assert_eq!(outcomes.len(), 2);
        assert!(matches!(
            outcomes.first(),
            Some(Err(Error::HttpStatus { status, .. })) if status.starts_with("404")
        ));
        assert!(matches!(outcomes.get(1), Some(Ok(_))));
        assert_eq!(std::fs::read(output.join("ok.png")).unwrap(), b"PNGDATA");
        assert!(!output.join("gone.png").exists());
    }

    #[tokio::test]
    async fn same_file_name_keeps_one_file() {
        let server = MockServer::start().await;
        serve(&server, "/a/logo.png", ResponseTemplate::new(200).set_body_bytes(b"first".to_vec()))
            .await;
        serve(&server, "/b/logo.png", ResponseTemplate::new(200).set_body_bytes(b"other".to_vec()))
            .await;

        let dir = tempfile::tempdir().unwrap();
        let entries = vec![
            entry(format!("{}/a/logo.png", server.uri()), "logo.png"),
            entry(format!("{}/b/logo.png", server.uri()), "logo.png"),
        ];

        let outcomes = fetch_all(&reqwest::Client::new(), &entries, dir.path()).await;

        assert!(outcomes.iter().all(Result::is_ok));
        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
        let content = std::fs::read(dir.path().join("logo.png")).unwrap();
        assert!(content == b"first" || content == b"other");
    }

    #[tokio::test]
    async fn unreachable_host_is_a_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        // Port 9 on loopback: nothing listens there in the test environment.
        let entries = vec![entry("http://127.0.0.1:9/x.png".to_string(), "x.png")];

        let outcomes = fetch_all(&reqwest::Client::new(), &entries, dir.path()).await;

        assert!(matches!(outcomes.first(), Some(Err(Error::Fetch { .. }))));
        assert!(!dir.path().join("x.png").exists());
    }
}
