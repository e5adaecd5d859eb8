use crate::application::scanner::DEFAULT_CONCURRENCY;
use std::path::PathBuf;

/// ScanRequest - Internal request DTO for the dependency audit use case
///
/// This DTO represents the internal request structure used within
/// the application layer. It may differ from the external CLI surface.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// Path to the project directory containing package.json
    pub project_path: PathBuf,
    /// Whether devDependencies are scanned too
    pub include_dev: bool,
    /// License identifiers that count as compliant
    pub allowed_licenses: Vec<String>,
    /// Registry fetches in flight at once
    pub concurrency: usize,
}

impl ScanRequest {
    pub fn new(project_path: PathBuf, include_dev: bool, allowed_licenses: Vec<String>) -> Self {
        Self {
            project_path,
            include_dev,
            allowed_licenses,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}
