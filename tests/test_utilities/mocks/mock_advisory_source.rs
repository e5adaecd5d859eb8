use async_trait::async_trait;
use depvet::audit::domain::{SeverityCounts, VulnerabilityMap};
use depvet::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock AdvisorySource for testing that records every query batch
pub struct MockAdvisorySource {
    pub map: VulnerabilityMap,
    pub should_fail: bool,
    query_log: Arc<Mutex<Vec<AdvisoryQuery>>>,
}

impl MockAdvisorySource {
    pub fn new() -> Self {
        Self {
            map: VulnerabilityMap::new(),
            should_fail: false,
            query_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_advisories(
        mut self,
        name: &str,
        critical: u32,
        high: u32,
        moderate: u32,
        low: u32,
    ) -> Self {
        self.map.insert(
            name.to_string(),
            SeverityCounts {
                critical,
                high,
                moderate,
                low,
            },
        );
        self
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    /// Handle onto the query log, usable after the mock has been moved
    /// into a use case.
    pub fn log_handle(&self) -> Arc<Mutex<Vec<AdvisoryQuery>>> {
        Arc::clone(&self.query_log)
    }
}

impl Default for MockAdvisorySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AdvisorySource for MockAdvisorySource {
    async fn fetch_vulnerabilities(&self, targets: &[AdvisoryQuery]) -> Result<VulnerabilityMap> {
        self.query_log.lock().unwrap().extend_from_slice(targets);

        if self.should_fail {
            anyhow::bail!("Mock advisory source failure");
        }

        Ok(self.map.clone())
    }
}
