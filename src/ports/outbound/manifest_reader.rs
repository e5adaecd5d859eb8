use crate::shared::Result;
use std::path::Path;

/// One declared dependency exactly as written in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub name: String,
    /// Declared range expression, e.g. "^1.2.0" or "~0.4.1".
    pub range: String,
}

impl ManifestEntry {
    pub fn new(name: impl Into<String>, range: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            range: range.into(),
        }
    }
}

/// Parsed manifest content with declaration order preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    pub name: Option<String>,
    pub version: Option<String>,
    pub dependencies: Vec<ManifestEntry>,
    pub dev_dependencies: Vec<ManifestEntry>,
}

impl Manifest {
    /// Number of entries a scan over this manifest will process.
    pub fn entry_count(&self, include_dev: bool) -> usize {
        let dev = if include_dev {
            self.dev_dependencies.len()
        } else {
            0
        };
        self.dependencies.len() + dev
    }
}

/// ManifestReader port for reading project manifests
///
/// This port abstracts the file system operations needed to read
/// the package.json manifest from a project directory.
pub trait ManifestReader {
    /// Reads and parses package.json from the specified project directory
    ///
    /// # Arguments
    /// * `project_path` - Path to the project directory containing package.json
    ///
    /// # Errors
    /// Returns an error if:
    /// - The package.json file does not exist
    /// - The file cannot be read due to permissions or I/O errors
    /// - The content is not valid JSON
    fn read_manifest(&self, project_path: &Path) -> Result<Manifest>;
}
