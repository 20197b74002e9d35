//! Reference map and its tab-separated manifest file.

use std::collections::HashMap;
use std::path::Path;

use crate::error::Error;

/// One remote reference and the local file name it downloads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntry {
    /// Local file name under the output directory.
    pub file_name: String,
    /// Remote reference as written in the document.
    pub reference: String,
}

/// Unique remote references mapped to local file names, in first-seen order.
/// Inserting a reference that is already present keeps its original slot.
#[derive(Debug, Default)]
pub struct ReferenceMap {
    /// Entries in insertion order.
    entries: Vec<MapEntry>,
    /// Reference to index in `entries`.
    index: HashMap<String, usize>,
}

impl ReferenceMap {
    /// Entries in insertion order.
    pub fn entries(&self) -> &[MapEntry] {
        return &self.entries;
    }

    /// Add a reference. A repeated reference updates its name in place.
    pub fn insert(&mut self, reference: String, file_name: String) {
        if let Some(&slot) = self.index.get(&reference)
            && let Some(existing) = self.entries.get_mut(slot)
        {
            existing.file_name = file_name;
            return;
        }
        self.index.insert(reference.clone(), self.entries.len());
        self.entries.push(MapEntry { file_name, reference });
    }

    /// Whether no references were collected.
    pub fn is_empty(&self) -> bool {
        return self.entries.is_empty();
    }

    /// Number of unique references.
    pub fn len(&self) -> usize {
        return self.entries.len();
    }

    /// One `reference<TAB>file_name` line per entry, newline-joined, no trailing newline.
    pub fn serialize(&self) -> String {
        return self
            .entries
            .iter()
            .map(|e| return format!("{}\t{}", e.reference, e.file_name))
            .collect::<Vec<_>>()
            .join("\n");
    }

    /// Write the manifest, replacing any existing file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `Error::ManifestWrite` if the file cannot be written.
    pub fn write(&self, path: &Path) -> Result<(), Error> {
        return std::fs::write(path, self.serialize()).map_err(|source| {
            return Error::ManifestWrite {
                path: path.to_path_buf(),
                source,
            };
        });
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::unwrap_used, reason = "test code")]
mod tests {
    use super::*;

    fn map_of(pairs: &[(&str, &str)]) -> ReferenceMap {
        let mut map = ReferenceMap::default();
        for (reference, name) in pairs {
            map.insert((*reference).to_string(), (*name).to_string());
        }
        return map;
    }

    #[test]
    fn duplicate_references_collapse() {
        let map = map_of(&[
            ("https://a.test/one.png", "one.png"),
            ("https://a.test/two.png", "two.png"),
            ("https://a.test/one.png", "one.png"),
        ]);

        assert_eq!(map.len(), 2);
        assert_eq!(map.serialize(), "https://a.test/one.png\tone.png\nhttps://a.test/two.png\ttwo.png");
    }

    #[test]
    fn empty_map_serializes_to_nothing() {
        assert_eq!(ReferenceMap::default().serialize(), "");
    }

    #[test]
    fn write_overwrites_existing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image-map.txt");
        std::fs::write(&path, "stale line\nanother stale line\n").unwrap();

        map_of(&[("https://a.test/one.png", "one.png")]).write(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "https://a.test/one.png\tone.png");
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/map.txt");

        let result = map_of(&[("https://a.test/x.png", "x.png")]).write(&path);
        assert!(matches!(result, Err(Error::ManifestWrite { .. })));
    }
}
