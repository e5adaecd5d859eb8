/// Domain models for dependency auditing
pub mod dependency;
pub mod policy;
pub mod scan_metadata;
pub mod severity;

pub use dependency::{DependencyKind, DependencyRecord, LicenseStatus, VersionStatus, UNKNOWN};
pub use policy::{
    AutoMergeRules, DependencyRules, LicenseRules, NotificationRules, PolicyDocument, PolicyRules,
    PolicySet, ResolvedPolicy, SecurityRules, UnknownLicenseAction, VersioningRules,
    DEFAULT_ALLOWED_LICENSES,
};
pub use scan_metadata::ScanMetadata;
pub use severity::{severity_finding, SeverityCounts, SeverityFinding, SeverityTier, VulnerabilityMap};
