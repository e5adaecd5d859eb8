use async_trait::async_trait;
use depvet::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock PackageRegistry for testing
pub struct MockPackageRegistry {
    pub packages: HashMap<String, PackageInfo>,
    pub failures: HashSet<String>,
    fetch_count: Arc<AtomicUsize>,
}

impl MockPackageRegistry {
    pub fn new() -> Self {
        Self {
            packages: HashMap::new(),
            failures: HashSet::new(),
            fetch_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_package(
        mut self,
        name: &str,
        latest: &str,
        license: &str,
        versions: &[&str],
    ) -> Self {
        self.packages.insert(
            name.to_string(),
            PackageInfo {
                latest_version: Some(latest.to_string()),
                license: Some(license.to_string()),
                versions: versions
                    .iter()
                    .map(|v| semver::Version::parse(v).unwrap())
                    .collect(),
            },
        );
        self
    }

    pub fn with_unlicensed_package(mut self, name: &str, latest: &str) -> Self {
        self.packages.insert(
            name.to_string(),
            PackageInfo {
                latest_version: Some(latest.to_string()),
                license: None,
                versions: vec![semver::Version::parse(latest).unwrap()],
            },
        );
        self
    }

    pub fn with_failure(mut self, name: &str) -> Self {
        self.failures.insert(name.to_string());
        self
    }

    /// Handle onto the fetch counter, usable after the mock has been
    /// moved into a use case or a caching wrapper.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.fetch_count)
    }
}

impl Default for MockPackageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PackageRegistry for MockPackageRegistry {
    async fn fetch_package_info(&self, name: &str) -> Result<PackageInfo> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);

        if self.failures.contains(name) {
            anyhow::bail!("Mock registry failure for {}", name);
        }

        Ok(self
            .packages
            .get(name)
            .cloned()
            .unwrap_or_else(PackageInfo::unknown))
    }
}
