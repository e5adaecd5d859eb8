use crate::audit::domain::{PolicyDocument, PolicySet};
use crate::shared::error::AuditError;
use crate::shared::security;
use crate::shared::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Accepted shapes for one policy file: a bare list of documents, a
/// wrapper object with a `policies` key, or a single document.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PolicyFileContents {
    Many(Vec<PolicyDocument>),
    Wrapped { policies: Vec<PolicyDocument> },
    Single(Box<PolicyDocument>),
}

impl PolicyFileContents {
    fn into_documents(self) -> Vec<PolicyDocument> {
        match self {
            PolicyFileContents::Many(documents) => documents,
            PolicyFileContents::Wrapped { policies } => policies,
            PolicyFileContents::Single(document) => vec![*document],
        }
    }
}

/// PolicyStore adapter for loading policy documents from disk
///
/// This adapter accepts a single JSON or YAML file, or a directory that
/// is scanned non-recursively for such files in name order. Every
/// document name must be unique across the whole load.
pub struct PolicyStore;

impl PolicyStore {
    pub fn new() -> Self {
        Self
    }

    pub fn load(&self, path: &Path) -> Result<PolicySet> {
        let mut set = PolicySet::new();
        if path.is_dir() {
            self.load_directory(path, &mut set)?;
        } else {
            self.load_file(path, &mut set)?;
        }
        Ok(set)
    }

    fn load_directory(&self, dir: &Path, set: &mut PolicySet) -> Result<()> {
        let mut files: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(|e| AuditError::FileReadError {
                path: dir.to_path_buf(),
                details: e.to_string(),
            })?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| has_policy_extension(p))
            .collect();
        files.sort();

        if files.is_empty() {
            anyhow::bail!(
                "No policy documents found in {}. Expected .json, .yml, or .yaml files.",
                dir.display()
            );
        }

        for file in files {
            self.load_file(&file, set)?;
        }
        Ok(())
    }

    fn load_file(&self, path: &Path, set: &mut PolicySet) -> Result<()> {
        let content = security::safe_read_file(path, "policy file")?;
        let contents = parse_contents(path, &content)?;

        for document in contents.into_documents() {
            if document.name.trim().is_empty() {
                return Err(parse_error(
                    path,
                    "policy document has an empty name".to_string(),
                ));
            }
            let name = document.name.clone();
            if !set.insert(document) {
                return Err(AuditError::DuplicatePolicy {
                    name,
                    path: path.to_path_buf(),
                }
                .into());
            }
        }
        Ok(())
    }
}

impl Default for PolicyStore {
    fn default() -> Self {
        Self::new()
    }
}

fn has_policy_extension(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("json") | Some("yml") | Some("yaml")
    )
}

fn parse_contents(path: &Path, content: &str) -> Result<PolicyFileContents> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match extension {
        "json" => serde_json::from_str(content).map_err(|e| parse_error(path, e.to_string())),
        "yml" | "yaml" => {
            serde_yaml_ng::from_str(content).map_err(|e| parse_error(path, e.to_string()))
        }
        other => Err(parse_error(
            path,
            format!(
                "unsupported file extension '{}'; expected .json, .yml, or .yaml",
                other
            ),
        )),
    }
}

fn parse_error(path: &Path, details: String) -> anyhow::Error {
    AuditError::PolicyParseError {
        path: path.to_path_buf(),
        details,
    }
    .into()
}
