use depvet::prelude::*;
use std::path::Path;

/// Mock ManifestReader for testing
pub struct MockManifestReader {
    pub manifest: Option<Manifest>,
    pub should_fail: bool,
}

impl MockManifestReader {
    pub fn new(manifest: Manifest) -> Self {
        Self {
            manifest: Some(manifest),
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            manifest: None,
            should_fail: true,
        }
    }
}

impl ManifestReader for MockManifestReader {
    fn read_manifest(&self, project_path: &Path) -> Result<Manifest> {
        if self.should_fail {
            anyhow::bail!(
                "Mock manifest read failure: {}",
                project_path.display()
            );
        }

        self.manifest
            .clone()
            .ok_or_else(|| anyhow::anyhow!("Mock manifest not configured"))
    }
}
