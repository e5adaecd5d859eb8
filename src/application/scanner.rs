use crate::audit::domain::{
    severity_finding, DependencyKind, DependencyRecord, VulnerabilityMap, UNKNOWN,
};
use crate::audit::services::{LicenseClassifier, VersionAnalyzer};
use crate::ports::outbound::{ManifestEntry, PackageInfo, PackageRegistry};
use futures::stream::{self, StreamExt};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Registry fetches in flight at once during a scan.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Callback invoked as entries finish; receives (completed, total).
pub type ProgressFn<'a> = &'a (dyn Fn(usize, usize) + Send + Sync);

/// Scanner runs the concurrency-bounded fan-out over manifest entries.
///
/// Fetches overlap up to the configured limit, but the returned records
/// are always in manifest declaration order, so report output is stable
/// across runs regardless of network timing.
pub struct Scanner<'a, R: PackageRegistry> {
    registry: &'a R,
    concurrency: usize,
}

impl<'a, R: PackageRegistry> Scanner<'a, R> {
    pub fn new(registry: &'a R) -> Self {
        Self::with_concurrency(registry, DEFAULT_CONCURRENCY)
    }

    pub fn with_concurrency(registry: &'a R, concurrency: usize) -> Self {
        Self {
            registry,
            concurrency: concurrency.max(1),
        }
    }

    /// Classifies every entry of one manifest section.
    ///
    /// A registry failure for one entry degrades that entry to an ERROR /
    /// Unknown record; it never aborts the scan.
    pub async fn scan(
        &self,
        entries: &[ManifestEntry],
        kind: DependencyKind,
        allowed_licenses: &[String],
        vulnerabilities: &VulnerabilityMap,
        progress: Option<ProgressFn<'_>>,
    ) -> Vec<DependencyRecord> {
        let total = entries.len();
        if total == 0 {
            return Vec::new();
        }

        let completed = AtomicUsize::new(0);
        let indexed: Vec<(usize, DependencyRecord)> = stream::iter(entries.iter().enumerate())
            .map(|(index, entry)| {
                let completed = &completed;
                async move {
                    let info = self
                        .registry
                        .fetch_package_info(&entry.name)
                        .await
                        .unwrap_or_else(|_| PackageInfo::unknown());
                    let record =
                        assemble_record(entry, kind, &info, allowed_licenses, vulnerabilities);

                    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    if let Some(report) = progress {
                        report(done, total);
                    }
                    (index, record)
                }
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        // Completion order is arbitrary; place each record back into its
        // declaration slot.
        let mut slots: Vec<Option<DependencyRecord>> = (0..total).map(|_| None).collect();
        for (index, record) in indexed {
            slots[index] = Some(record);
        }
        slots.into_iter().flatten().collect()
    }
}

/// Combines registry data, license policy and advisory counts into the
/// final record for one entry.
fn assemble_record(
    entry: &ManifestEntry,
    kind: DependencyKind,
    info: &PackageInfo,
    allowed_licenses: &[String],
    vulnerabilities: &VulnerabilityMap,
) -> DependencyRecord {
    let assessment =
        VersionAnalyzer::classify(&entry.range, info.latest_version.as_deref(), &info.versions);
    let license_status = LicenseClassifier::classify(info.license.as_deref(), allowed_licenses);
    let finding = severity_finding(vulnerabilities, &entry.name);

    DependencyRecord {
        name: entry.name.clone(),
        declared_range: entry.range.clone(),
        kind,
        latest_version: info.latest_version.clone(),
        version_status: assessment.status,
        suggested_update: assessment.suggested_update,
        license: info
            .license
            .clone()
            .unwrap_or_else(|| UNKNOWN.to_string()),
        license_status,
        vuln_tier: finding.tier,
        vuln_count: finding.count,
    }
}
