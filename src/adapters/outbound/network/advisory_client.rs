use super::npm_client::DEFAULT_REGISTRY_URL;
use crate::audit::domain::{SeverityCounts, VulnerabilityMap};
use crate::ports::outbound::{AdvisoryQuery, AdvisorySource};
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Bulk advisory endpoint path relative to the registry base URL.
const BULK_ADVISORY_PATH: &str = "/-/npm/v1/security/advisories/bulk";

const TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Deserialize)]
struct AdvisoryEntry {
    #[serde(default)]
    severity: Option<String>,
}

/// BulkAdvisoryClient adapter for the npm bulk advisory endpoint
///
/// One POST carries every scanned package/version pair and the response
/// lists known advisories per package. Unlike registry lookups, a failed
/// advisory request surfaces as an error; the use case decides whether
/// to continue without vulnerability data.
pub struct BulkAdvisoryClient {
    client: reqwest::Client,
    endpoint: String,
}

impl BulkAdvisoryClient {
    /// Creates a client against the default npm registry
    pub fn new() -> Result<Self> {
        Self::with_registry(DEFAULT_REGISTRY_URL)
    }

    /// Creates a client against a custom registry base URL
    pub fn with_registry(registry_url: impl Into<String>) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("depvet/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        let base = registry_url.into();
        Ok(Self {
            client,
            endpoint: format!("{}{}", base.trim_end_matches('/'), BULK_ADVISORY_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Groups queries into the wire payload, package name to versions.
    fn build_payload(targets: &[AdvisoryQuery]) -> HashMap<&str, Vec<&str>> {
        let mut payload: HashMap<&str, Vec<&str>> = HashMap::new();
        for target in targets {
            payload
                .entry(target.name.as_str())
                .or_default()
                .push(target.version.as_str());
        }
        payload
    }

    /// Counts advisories per severity level, dropping packages that end
    /// up with no recognized advisories at all.
    fn reduce(body: HashMap<String, Vec<AdvisoryEntry>>) -> VulnerabilityMap {
        let mut map = VulnerabilityMap::new();
        for (name, advisories) in body {
            let mut counts = SeverityCounts::default();
            for advisory in &advisories {
                if let Some(level) = advisory.severity.as_deref() {
                    counts.record_level(level);
                }
            }
            if !counts.is_empty() {
                map.insert(name, counts);
            }
        }
        map
    }
}

#[async_trait]
impl AdvisorySource for BulkAdvisoryClient {
    async fn fetch_vulnerabilities(&self, targets: &[AdvisoryQuery]) -> Result<VulnerabilityMap> {
        // Nothing to ask about: skip the network round trip entirely.
        if targets.is_empty() {
            return Ok(VulnerabilityMap::new());
        }

        let payload = Self::build_payload(targets);
        debug!("querying advisories for {} package(s)", payload.len());

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!(
                "advisory endpoint returned status code {}",
                response.status()
            );
        }

        let body: HashMap<String, Vec<AdvisoryEntry>> = response.json().await?;
        Ok(Self::reduce(body))
    }
}
