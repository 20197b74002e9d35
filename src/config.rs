use std::path::{Path, PathBuf};

use crate::error::Error;

/// Name of the optional project config file, looked up in the working directory.
pub const CONFIG_FILE: &str = ".imgharvest.toml";

/// Run configuration. Built from defaults, then `.imgharvest.toml`, then CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory names pruned from the walk (substring match on the path).
    pub exclude: Vec<String>,
    /// Document extension without the leading dot.
    pub extension: String,
    /// Root directory scanned for documents.
    pub input_dir: PathBuf,
    /// Destination path of the reference manifest.
    pub map_file: PathBuf,
    /// Directory downloaded assets are written to.
    pub output_dir: PathBuf,
}

/// Values given on the command line. `None` keeps whatever the file or default says.
#[derive(Debug, Default)]
pub struct Overrides {
    /// `--input-dir`
    pub input_dir: Option<PathBuf>,
    /// `--map-file`
    pub map_file: Option<PathBuf>,
    /// `--output-dir`
    pub output_dir: Option<PathBuf>,
}

/// Raw TOML structure for `.imgharvest.toml`. Every key is optional.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ImgharvestTomlConfig {
    /// Directory names to prune.
    exclude: Option<Vec<String>>,
    /// Document extension, with or without a dot.
    extension: Option<String>,
    /// Scan root.
    input_dir: Option<PathBuf>,
    /// Manifest path.
    map_file: Option<PathBuf>,
    /// Asset destination.
    output_dir: Option<PathBuf>,
}

impl Config {
    /// Load config from `.imgharvest.toml` in the given directory.
    /// Returns the defaults if the file doesn't exist. A file that exists but
    /// is malformed is an error, never a silent fallback.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// `Error::TomlDe` if the TOML is malformed, or `Error::ConfigMalformed`
    /// if the extension is empty.
    pub fn load(dir: &Path) -> Result<Self, Error> {
        let path = dir.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };

        let raw: ImgharvestTomlConfig = toml::from_str(&content)?;
        let defaults = Self::default();

        let extension = match raw.extension {
            None => defaults.extension,
            Some(ext) => normalize_extension(&ext).ok_or_else(|| {
                return Error::ConfigMalformed {
                    path: path.clone(),
                    reason: "extension must not be empty".to_string(),
                };
            })?,
        };

        return Ok(Self {
            exclude: raw.exclude.unwrap_or(defaults.exclude),
            extension,
            input_dir: raw.input_dir.unwrap_or(defaults.input_dir),
            map_file: raw.map_file.unwrap_or(defaults.map_file),
            output_dir: raw.output_dir.unwrap_or(defaults.output_dir),
        });
    }

    /// Apply command-line values on top of the loaded config.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(dir) = overrides.input_dir {
            self.input_dir = dir;
        }
        if let Some(dir) = overrides.output_dir {
            self.output_dir = dir;
        }
        if let Some(file) = overrides.map_file {
            self.map_file = file;
        }
        return self;
    }
}

impl Default for Config {
    /// Scan `docs/` for markdown, skip `node_modules`, write to `images/` and `image-map.txt`.
    fn default() -> Self {
        return Self {
            exclude: vec!["node_modules".to_string()],
            extension: "md".to_string(),
            input_dir: PathBuf::from("docs"),
            map_file: PathBuf::from("image-map.txt"),
            output_dir: PathBuf::from("images"),
        };
    }
}

/// Strip a leading dot. `None` when nothing is left.
fn normalize_extension(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let ext = trimmed.strip_prefix('.').unwrap_or(trimmed);
    if ext.is_empty() {
        return None;
    }
    return Some(ext.to_string());
}
