use crate::ports::outbound::{PackageInfo, PackageRegistry};
use crate::shared::Result;
use async_trait::async_trait;
use semver::Version;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Default registry consulted when no override is configured.
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

#[derive(Debug, Deserialize)]
struct RegistryDocument {
    #[serde(rename = "dist-tags", default)]
    dist_tags: DistTags,
    #[serde(default)]
    versions: HashMap<String, VersionEntry>,
    /// Top-level license, used as fallback when the latest version entry
    /// carries none.
    #[serde(default)]
    license: Option<LicenseField>,
}

#[derive(Debug, Default, Deserialize)]
struct DistTags {
    #[serde(default)]
    latest: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VersionEntry {
    #[serde(default)]
    license: Option<LicenseField>,
}

/// The registry publishes licenses as an SPDX string, as a legacy
/// `{"type": ..., "url": ...}` object, or occasionally as something
/// else entirely. Anything unreadable degrades to no license.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LicenseField {
    Spdx(String),
    Legacy {
        #[serde(rename = "type")]
        kind: Option<String>,
    },
    Other(serde::de::IgnoredAny),
}

impl LicenseField {
    fn as_spdx(&self) -> Option<&str> {
        match self {
            LicenseField::Spdx(value) if !value.trim().is_empty() => Some(value.as_str()),
            LicenseField::Legacy { kind: Some(value) } if !value.trim().is_empty() => {
                Some(value.as_str())
            }
            _ => None,
        }
    }
}

/// NpmRegistryClient adapter for fetching package metadata from an npm registry
///
/// This adapter implements the PackageRegistry port, providing async
/// network access to the registry's package document endpoint.
///
/// # Degradation
/// A lookup that keeps failing after retries resolves to
/// `PackageInfo::unknown()` instead of an error, so one unreachable
/// package never aborts a scan.
pub struct NpmRegistryClient {
    client: reqwest::Client,
    registry_url: String,
    max_retries: u32,
}

impl NpmRegistryClient {
    /// Creates a client against the default npm registry
    pub fn new() -> Result<Self> {
        Self::with_registry(DEFAULT_REGISTRY_URL)
    }

    /// Creates a client against a custom registry base URL
    pub fn with_registry(registry_url: impl Into<String>) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("depvet/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            registry_url: registry_url.into().trim_end_matches('/').to_string(),
            max_retries: 3,
        })
    }

    pub fn registry_url(&self) -> &str {
        &self.registry_url
    }

    /// Validates a package name before it is spliced into a URL
    ///
    /// npm names may contain one slash, but only in scoped form
    /// (`@scope/name`). Everything else that could change the meaning of
    /// the request URL is rejected.
    fn validate_package_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            anyhow::bail!("Security: package name must not be empty");
        }

        if name.contains("..") || name.contains('\\') {
            anyhow::bail!("Security: package name '{}' contains path traversal characters", name);
        }

        if name.contains('#') || name.contains('?') {
            anyhow::bail!("Security: package name '{}' contains URL-unsafe characters", name);
        }

        let slashes = name.matches('/').count();
        if slashes > 1 || (slashes == 1 && !name.starts_with('@')) {
            anyhow::bail!("Security: package name '{}' is not a valid scoped name", name);
        }

        Ok(())
    }

    /// Percent-encodes a package name for the registry URL, keeping the
    /// leading `@` of scoped names literal as the registry expects.
    fn encode_package_name(name: &str) -> String {
        let encoded = urlencoding::encode(name).into_owned();
        match encoded.strip_prefix("%40") {
            Some(rest) => format!("@{}", rest),
            None => encoded,
        }
    }

    /// Fetches the package document with retry logic (async)
    async fn fetch_with_retry(&self, name: &str) -> Result<RegistryDocument> {
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            match self.fetch_document(name).await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    last_error = Some(e);
                    if attempt < self.max_retries {
                        // Retry after a short wait (async)
                        tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                    }
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| anyhow::anyhow!("registry request failed for '{}'", name)))
    }

    /// Fetches the package document from the registry (async)
    async fn fetch_document(&self, name: &str) -> Result<RegistryDocument> {
        Self::validate_package_name(name)?;

        let url = format!("{}/{}", self.registry_url, Self::encode_package_name(name));
        debug!("fetching registry metadata for {}", name);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!(
                "registry returned status code {} for '{}'",
                response.status(),
                name
            );
        }

        let document: RegistryDocument = response.json().await?;
        Ok(document)
    }

    /// Reduces a registry document to the fields the audit consumes.
    fn reduce(document: RegistryDocument) -> PackageInfo {
        let mut versions: Vec<Version> = document
            .versions
            .keys()
            .filter_map(|raw| Version::parse(raw).ok())
            .collect();
        versions.sort_unstable_by(|a, b| b.cmp(a));

        let latest_version = document.dist_tags.latest;
        let license = latest_version
            .as_deref()
            .and_then(|tag| document.versions.get(tag))
            .and_then(|entry| entry.license.as_ref())
            .and_then(LicenseField::as_spdx)
            .map(str::to_string)
            .or_else(|| {
                document
                    .license
                    .as_ref()
                    .and_then(LicenseField::as_spdx)
                    .map(str::to_string)
            });

        PackageInfo {
            latest_version,
            license,
            versions,
        }
    }
}

// Note: no Default implementation. Client creation can fail, so callers
// construct through new() and handle the Result.

#[async_trait]
impl PackageRegistry for NpmRegistryClient {
    async fn fetch_package_info(&self, name: &str) -> Result<PackageInfo> {
        match self.fetch_with_retry(name).await {
            Ok(document) => Ok(Self::reduce(document)),
            Err(e) => {
                warn!("registry lookup for {} failed, marking unknown: {}", name, e);
                Ok(PackageInfo::unknown())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = NpmRegistryClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_custom_registry_url_trims_trailing_slash() {
        let client = NpmRegistryClient::with_registry("https://registry.example.com/").unwrap();
        assert_eq!(client.registry_url(), "https://registry.example.com");
    }

    #[test]
    fn test_validate_accepts_plain_and_scoped_names() {
        assert!(NpmRegistryClient::validate_package_name("express").is_ok());
        assert!(NpmRegistryClient::validate_package_name("@types/node").is_ok());
    }

    #[test]
    fn test_validate_rejects_unsafe_names() {
        for name in ["", "  ", "../etc/passwd", "a\\b", "a#b", "a?b", "a/b", "@a/b/c"] {
            assert!(
                NpmRegistryClient::validate_package_name(name).is_err(),
                "expected rejection for {:?}",
                name
            );
        }
    }

    #[test]
    fn test_encode_keeps_scope_marker_literal() {
        assert_eq!(NpmRegistryClient::encode_package_name("express"), "express");
        assert_eq!(
            NpmRegistryClient::encode_package_name("@types/node"),
            "@types%2Fnode"
        );
    }

    #[test]
    fn test_reduce_sorts_versions_descending_and_skips_invalid() {
        let document: RegistryDocument = serde_json::from_str(
            r#"{
                "dist-tags": {"latest": "1.3.0"},
                "versions": {
                    "1.2.0": {"license": "MIT"},
                    "1.3.0": {"license": "MIT"},
                    "1.2.5": {"license": "MIT"},
                    "not-a-version": {}
                }
            }"#,
        )
        .unwrap();

        let info = NpmRegistryClient::reduce(document);
        assert_eq!(info.latest_version.as_deref(), Some("1.3.0"));
        assert_eq!(info.license.as_deref(), Some("MIT"));
        let rendered: Vec<String> = info.versions.iter().map(|v| v.to_string()).collect();
        assert_eq!(rendered, vec!["1.3.0", "1.2.5", "1.2.0"]);
    }

    #[test]
    fn test_reduce_falls_back_to_top_level_license() {
        let document: RegistryDocument = serde_json::from_str(
            r#"{
                "dist-tags": {"latest": "2.0.0"},
                "versions": {"2.0.0": {}},
                "license": "ISC"
            }"#,
        )
        .unwrap();

        let info = NpmRegistryClient::reduce(document);
        assert_eq!(info.license.as_deref(), Some("ISC"));
    }

    #[test]
    fn test_reduce_reads_legacy_license_object() {
        let document: RegistryDocument = serde_json::from_str(
            r#"{
                "dist-tags": {"latest": "0.1.0"},
                "versions": {
                    "0.1.0": {"license": {"type": "Apache-2.0", "url": "https://example.com"}}
                }
            }"#,
        )
        .unwrap();

        let info = NpmRegistryClient::reduce(document);
        assert_eq!(info.license.as_deref(), Some("Apache-2.0"));
    }

    #[test]
    fn test_reduce_treats_unreadable_license_as_absent() {
        let document: RegistryDocument = serde_json::from_str(
            r#"{
                "dist-tags": {"latest": "0.1.0"},
                "versions": {"0.1.0": {"license": ["MIT"]}}
            }"#,
        )
        .unwrap();

        let info = NpmRegistryClient::reduce(document);
        assert_eq!(info.license, None);
    }

    #[test]
    fn test_reduce_empty_document_is_unknown() {
        let document: RegistryDocument = serde_json::from_str("{}").unwrap();
        let info = NpmRegistryClient::reduce(document);
        assert!(info.is_unknown());
    }
}
