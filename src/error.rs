/// Crate-level error types for imgharvest.
use std::path::PathBuf;

/// Every variant names the path or reference it failed on, so a console
/// line is enough to act on without a debugger.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `.imgharvest.toml` exists but holds a value that cannot be used.
    #[error("config malformed: {}: {reason}", path.display())]
    ConfigMalformed {
        /// Path to the offending config file.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    /// A scanned document could not be read.
    #[error("document read failed: {}: {source}", path.display())]
    DocumentRead {
        /// Path of the document.
        path: PathBuf,
        /// The wrapped I/O error.
        source: std::io::Error,
    },

    /// A download failed at the transport level (connect, TLS, body read, write).
    #[error("fetch failed: {reference}: {reason}")]
    Fetch {
        /// Remote reference that was being downloaded.
        reference: String,
        /// Transport or filesystem error description.
        reason: String,
    },

    /// The server answered a download with a non-success status.
    #[error("fetch failed: {reference}: {status}")]
    HttpStatus {
        /// Remote reference that was being downloaded.
        reference: String,
        /// Status line such as `404 Not Found`.
        status: String,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// The manifest could not be written.
    #[error("manifest write failed: {}: {source}", path.display())]
    ManifestWrite {
        /// Destination path of the manifest.
        path: PathBuf,
        /// The wrapped I/O error.
        source: std::io::Error,
    },

    /// A directory or file under the input root could not be read during the walk.
    #[error("scan failed: {}: {reason}", path.display())]
    Scan {
        /// Path that could not be read (the root when the walker gives none).
        path: PathBuf,
        /// Description of the read failure.
        reason: String,
    },

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),
}
