use crate::audit::domain::{
    DependencyRecord, LicenseStatus, ScanMetadata, SeverityTier, VersionStatus,
};
use serde::Serialize;

/// Aggregate counts over all records, serialized into the report head.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    pub total: usize,
    pub up_to_date: usize,
    pub outdated: usize,
    pub version_errors: usize,
    pub non_compliant: usize,
    pub unknown_licenses: usize,
    pub vulnerable: usize,
}

impl ScanSummary {
    pub fn from_records(records: &[DependencyRecord]) -> Self {
        let mut summary = Self {
            total: records.len(),
            ..Default::default()
        };
        for record in records {
            match record.version_status {
                VersionStatus::UpToDate => summary.up_to_date += 1,
                VersionStatus::Error => summary.version_errors += 1,
                VersionStatus::Major | VersionStatus::Minor | VersionStatus::Patch => {
                    summary.outdated += 1
                }
            }
            match record.license_status {
                LicenseStatus::NonCompliant => summary.non_compliant += 1,
                LicenseStatus::Unknown => summary.unknown_licenses += 1,
                LicenseStatus::Compliant => {}
            }
            if record.vuln_tier > SeverityTier::None {
                summary.vulnerable += 1;
            }
        }
        summary
    }
}

/// ScanResponse - Internal response DTO from the audit use case
///
/// This DTO contains everything the presentation side needs: the
/// classified records in manifest order, provenance metadata and the
/// aggregate summary.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResponse {
    pub metadata: ScanMetadata,
    pub summary: ScanSummary,
    pub records: Vec<DependencyRecord>,
}

impl ScanResponse {
    pub fn new(records: Vec<DependencyRecord>, metadata: ScanMetadata) -> Self {
        let summary = ScanSummary::from_records(&records);
        Self {
            metadata,
            summary,
            records,
        }
    }

    /// True when the audit should fail the build: any non-compliant
    /// license, or any vulnerability above the tolerated severity tier.
    /// Unknown licenses warn but do not fail.
    pub fn has_findings(&self, max_severity: SeverityTier) -> bool {
        self.records.iter().any(|record| {
            record.license_status == LicenseStatus::NonCompliant || record.vuln_tier > max_severity
        })
    }
}
