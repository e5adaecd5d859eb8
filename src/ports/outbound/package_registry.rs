use crate::shared::Result;
use async_trait::async_trait;
use semver::Version;

/// Registry metadata for one package, reduced to what an audit needs.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageInfo {
    /// Version the registry advertises as latest (its `latest` dist-tag).
    pub latest_version: Option<String>,
    /// License identifier as published, if any.
    pub license: Option<String>,
    /// Published versions that parse as semver, newest first.
    pub versions: Vec<Version>,
}

impl PackageInfo {
    /// Placeholder for a package the registry could not be consulted about.
    pub fn unknown() -> Self {
        Self {
            latest_version: None,
            license: None,
            versions: Vec::new(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.latest_version.is_none() && self.license.is_none() && self.versions.is_empty()
    }
}

/// PackageRegistry port for fetching package metadata
///
/// This port abstracts the registry backend (e.g., the npm registry
/// HTTP API) that supplies published versions and license data.
///
/// # Async Support
/// Fetches run concurrently during a scan, so implementations must be
/// `Send + Sync`.
#[async_trait]
pub trait PackageRegistry: Send + Sync {
    /// Fetches version and license metadata for a package
    ///
    /// # Arguments
    /// * `name` - Package name as declared in the manifest
    ///
    /// # Errors
    /// Returns an error if:
    /// - The network request fails
    /// - The registry answers with an error status code
    /// - The response cannot be parsed
    async fn fetch_package_info(&self, name: &str) -> Result<PackageInfo>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_info_is_empty() {
        let info = PackageInfo::unknown();
        assert!(info.is_unknown());
        assert!(info.latest_version.is_none());
        assert!(info.versions.is_empty());
    }

    #[test]
    fn test_populated_info_is_not_unknown() {
        let info = PackageInfo {
            latest_version: Some("1.0.0".to_string()),
            license: None,
            versions: vec![Version::new(1, 0, 0)],
        };
        assert!(!info.is_unknown());
    }
}
