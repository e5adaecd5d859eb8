use crate::audit::domain::severity::SeverityTier;
use serde::{Serialize, Serializer};

/// Sentinel used on the wire when the registry could not tell us a version
/// or a license.
pub const UNKNOWN: &str = "Unknown";

/// Which manifest section a dependency was declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DependencyKind {
    #[serde(rename = "dependencies")]
    Runtime,
    #[serde(rename = "devDependencies")]
    Dev,
}

impl DependencyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyKind::Runtime => "dependencies",
            DependencyKind::Dev => "devDependencies",
        }
    }
}

impl std::fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How far the declared version lags behind the registry's latest release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VersionStatus {
    #[serde(rename = "UP-TO-DATE")]
    UpToDate,
    #[serde(rename = "major")]
    Major,
    #[serde(rename = "minor")]
    Minor,
    #[serde(rename = "patch")]
    Patch,
    /// Registry data was missing or the declared range was not a concrete
    /// semver version.
    #[serde(rename = "ERROR")]
    Error,
}

impl VersionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionStatus::UpToDate => "UP-TO-DATE",
            VersionStatus::Major => "major",
            VersionStatus::Minor => "minor",
            VersionStatus::Patch => "patch",
            VersionStatus::Error => "ERROR",
        }
    }

    /// True when the dependency is behind the latest release.
    pub fn is_outdated(&self) -> bool {
        matches!(
            self,
            VersionStatus::Major | VersionStatus::Minor | VersionStatus::Patch
        )
    }
}

/// Outcome of checking a license against the policy allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LicenseStatus {
    #[serde(rename = "COMPLIANT")]
    Compliant,
    #[serde(rename = "NON-COMPLIANT")]
    NonCompliant,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl LicenseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LicenseStatus::Compliant => "COMPLIANT",
            LicenseStatus::NonCompliant => "NON-COMPLIANT",
            LicenseStatus::Unknown => "UNKNOWN",
        }
    }
}

/// One fully classified dependency. Immutable once assembled; the scan
/// produces one record per manifest entry, in manifest order.
#[derive(Debug, Clone, Serialize)]
pub struct DependencyRecord {
    pub name: String,
    #[serde(rename = "declaredRange")]
    pub declared_range: String,
    #[serde(rename = "type")]
    pub kind: DependencyKind,
    /// `None` means the registry lookup failed; serialized as "Unknown".
    #[serde(rename = "latestVersion", serialize_with = "serialize_or_unknown")]
    pub latest_version: Option<String>,
    #[serde(rename = "versionStatus")]
    pub version_status: VersionStatus,
    /// Always satisfies current < suggested <= latest when present.
    #[serde(rename = "suggestedUpdate", skip_serializing_if = "Option::is_none")]
    pub suggested_update: Option<String>,
    pub license: String,
    #[serde(rename = "licenseStatus")]
    pub license_status: LicenseStatus,
    #[serde(rename = "vulnTier")]
    pub vuln_tier: SeverityTier,
    /// Count at `vuln_tier` only, never a sum across tiers.
    #[serde(rename = "vulnCount")]
    pub vuln_count: u32,
}

fn serialize_or_unknown<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) => serializer.serialize_str(v),
        None => serializer.serialize_str(UNKNOWN),
    }
}
