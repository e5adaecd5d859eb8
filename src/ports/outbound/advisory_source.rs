use crate::audit::domain::VulnerabilityMap;
use crate::shared::Result;
use async_trait::async_trait;

/// One package/version pair to query advisories for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryQuery {
    pub name: String,
    pub version: String,
}

impl AdvisoryQuery {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// AdvisorySource port for fetching vulnerability data
///
/// This port abstracts the advisory backend (e.g., the npm bulk
/// advisory endpoint) that maps packages to known-vulnerability
/// severity counts.
#[async_trait]
pub trait AdvisorySource: Send + Sync {
    /// Fetches severity counts for all queried packages in a single call
    ///
    /// Packages with no known advisories are absent from the returned map.
    ///
    /// # Errors
    /// Returns an error if the request fails or the response cannot be
    /// parsed. Callers decide whether to degrade or abort the audit.
    async fn fetch_vulnerabilities(&self, targets: &[AdvisoryQuery]) -> Result<VulnerabilityMap>;
}
