use crate::application::dto::{ScanRequest, ScanResponse};
use crate::application::scanner::Scanner;
use crate::audit::domain::{DependencyKind, DependencyRecord, ScanMetadata, VulnerabilityMap};
use crate::audit::services::VersionAnalyzer;
use crate::ports::outbound::{
    AdvisoryQuery, AdvisorySource, Manifest, ManifestEntry, ManifestReader, PackageRegistry,
    ProgressReporter,
};
use crate::shared::Result;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::warn;

/// AuditDependenciesUseCase - Core use case for the dependency audit
///
/// This use case orchestrates the audit workflow using generic
/// dependency injection for all infrastructure dependencies: read the
/// manifest, query advisories in one batch, scan every section with
/// bounded fan-out, then assemble the response.
///
/// # Type Parameters
/// * `MR` - ManifestReader implementation
/// * `REG` - PackageRegistry implementation
/// * `ADV` - AdvisorySource implementation
/// * `PR` - ProgressReporter implementation
pub struct AuditDependenciesUseCase<MR, REG, ADV, PR> {
    manifest_reader: MR,
    registry: REG,
    advisory_source: ADV,
    progress_reporter: PR,
}

impl<MR, REG, ADV, PR> AuditDependenciesUseCase<MR, REG, ADV, PR>
where
    MR: ManifestReader,
    REG: PackageRegistry,
    ADV: AdvisorySource,
    PR: ProgressReporter,
{
    /// Creates a new AuditDependenciesUseCase with injected dependencies
    pub fn new(manifest_reader: MR, registry: REG, advisory_source: ADV, progress_reporter: PR) -> Self {
        Self {
            manifest_reader,
            registry,
            advisory_source,
            progress_reporter,
        }
    }

    /// Executes the dependency audit use case
    ///
    /// # Arguments
    /// * `request` - Audit request containing project path and options
    ///
    /// # Returns
    /// ScanResponse with one record per manifest entry, in manifest order
    pub async fn execute(&self, request: ScanRequest) -> Result<ScanResponse> {
        // Step 1: Read and parse the manifest
        let manifest = self.read_and_report_manifest(&request)?;

        // Step 2: Query advisories for every declared entry in one batch
        let vulnerabilities = self.fetch_advisories(&manifest, request.include_dev).await;

        // Step 3: Scan each manifest section with bounded fan-out
        let records = self
            .scan_sections(&request, &manifest, &vulnerabilities)
            .await;

        // Step 4: Assemble the response
        let response = ScanResponse::new(records, ScanMetadata::generate_default());
        self.progress_reporter.report_completion(&format!(
            "✅ Audit complete: {} package(s) checked",
            response.summary.total
        ));
        Ok(response)
    }

    /// Reads and parses the manifest, reporting progress
    fn read_and_report_manifest(&self, request: &ScanRequest) -> Result<Manifest> {
        self.progress_reporter.report(&format!(
            "📖 Loading package.json from: {}",
            request.project_path.display()
        ));

        let manifest = self.manifest_reader.read_manifest(&request.project_path)?;

        self.progress_reporter.report(&format!(
            "✅ Detected {} package(s)",
            manifest.entry_count(request.include_dev)
        ));

        Ok(manifest)
    }

    /// One bulk query covers runtime and dev entries alike.
    ///
    /// An advisory failure degrades to an empty map after a warning; the
    /// scan then reports no known vulnerabilities for every package
    /// instead of aborting the audit.
    async fn fetch_advisories(&self, manifest: &Manifest, include_dev: bool) -> VulnerabilityMap {
        let targets = advisory_targets(manifest, include_dev);
        if targets.is_empty() {
            return VulnerabilityMap::new();
        }

        self.progress_reporter
            .report("🔐 Checking for known vulnerabilities...");

        match self.advisory_source.fetch_vulnerabilities(&targets).await {
            Ok(map) => map,
            Err(e) => {
                warn!("advisory lookup failed: {}", e);
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: Could not fetch advisory data: {}",
                    e
                ));
                VulnerabilityMap::new()
            }
        }
    }

    /// Scans the runtime section, then the dev section when requested.
    /// Progress is reported against the combined total.
    async fn scan_sections(
        &self,
        request: &ScanRequest,
        manifest: &Manifest,
        vulnerabilities: &VulnerabilityMap,
    ) -> Vec<DependencyRecord> {
        let total = manifest.entry_count(request.include_dev);
        if total == 0 {
            return Vec::new();
        }

        self.progress_reporter
            .report("🔍 Fetching registry metadata...");

        let scanner = Scanner::with_concurrency(&self.registry, request.concurrency);
        let completed = AtomicUsize::new(0);
        let reporter = &self.progress_reporter;
        let on_progress = |_done: usize, _section_total: usize| {
            let overall = completed.fetch_add(1, Ordering::SeqCst) + 1;
            reporter.report_progress(overall, total, Some("Fetching package metadata..."));
        };

        let mut records = scanner
            .scan(
                &manifest.dependencies,
                DependencyKind::Runtime,
                &request.allowed_licenses,
                vulnerabilities,
                Some(&on_progress),
            )
            .await;

        if request.include_dev {
            let dev_records = scanner
                .scan(
                    &manifest.dev_dependencies,
                    DependencyKind::Dev,
                    &request.allowed_licenses,
                    vulnerabilities,
                    Some(&on_progress),
                )
                .await;
            records.extend(dev_records);
        }

        records
    }
}

/// Builds the advisory query list from the declared ranges.
///
/// Ranges are stripped to their pinned version; entries whose range
/// holds no parseable version are skipped, since the advisory feed
/// cannot match an unresolved range anyway.
fn advisory_targets(manifest: &Manifest, include_dev: bool) -> Vec<AdvisoryQuery> {
    let mut sections: Vec<&[ManifestEntry]> = vec![&manifest.dependencies];
    if include_dev {
        sections.push(&manifest.dev_dependencies);
    }

    let mut targets = Vec::new();
    for section in sections {
        for entry in section {
            let cleaned = VersionAnalyzer::strip_range_prefix(&entry.range);
            if semver::Version::parse(cleaned).is_ok() {
                targets.push(AdvisoryQuery::new(entry.name.clone(), cleaned));
            }
        }
    }
    targets
}
