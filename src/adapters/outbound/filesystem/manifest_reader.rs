use crate::ports::outbound::{Manifest, ManifestEntry, ManifestReader};
use crate::shared::error::AuditError;
use crate::shared::security;
use crate::shared::Result;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// FileSystemReader adapter for reading project manifests
///
/// This adapter implements the ManifestReader port, providing file
/// system access for reading package.json with security checks applied
/// before any content is parsed.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw package.json shape. The dependency sections stay as JSON maps so
/// declaration order survives into the parsed manifest.
#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    dependencies: serde_json::Map<String, Value>,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: serde_json::Map<String, Value>,
}

fn to_entries(
    path: &Path,
    section: &str,
    map: serde_json::Map<String, Value>,
) -> Result<Vec<ManifestEntry>> {
    let mut entries = Vec::with_capacity(map.len());
    for (name, value) in map {
        match value {
            Value::String(range) => entries.push(ManifestEntry { name, range }),
            other => {
                return Err(AuditError::ManifestParseError {
                    path: path.to_path_buf(),
                    details: format!(
                        "{} entry '{}' must be a version range string, found {}",
                        section,
                        name,
                        json_type_name(&other)
                    ),
                }
                .into())
            }
        }
    }
    Ok(entries)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl ManifestReader for FileSystemReader {
    fn read_manifest(&self, project_path: &Path) -> Result<Manifest> {
        let manifest_path = project_path.join("package.json");

        // Check if package.json exists
        if !manifest_path.exists() {
            return Err(AuditError::ManifestNotFound {
                path: manifest_path.clone(),
                suggestion: format!(
                    "package.json does not exist in project directory \"{}\".\n   \
                     Please run in the root directory of an npm project, or specify the correct path with the --path option.",
                    project_path.display()
                ),
            }
            .into());
        }

        // Read manifest content with security checks
        let content = security::safe_read_file(&manifest_path, "package.json")?;

        let raw: RawManifest =
            serde_json::from_str(&content).map_err(|e| AuditError::ManifestParseError {
                path: manifest_path.clone(),
                details: e.to_string(),
            })?;

        Ok(Manifest {
            name: raw.name,
            version: raw.version,
            dependencies: to_entries(&manifest_path, "dependencies", raw.dependencies)?,
            dev_dependencies: to_entries(&manifest_path, "devDependencies", raw.dev_dependencies)?,
        })
    }
}
