//! depvet - Dependency auditor for npm manifests
//!
//! This library audits the dependencies declared in a `package.json`:
//! how far each one trails the registry, whether its license is on the
//! allow list, and whether known advisories affect it. It follows
//! hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`audit`): Pure business logic and domain models
//! - **Application Layer** (`application`): Use cases and the concurrent scanner
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use depvet::prelude::*;
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! // Create adapters
//! let manifest_reader = FileSystemReader::new();
//! let registry = CachingRegistry::new(NpmRegistryClient::new()?);
//! let advisory_source = BulkAdvisoryClient::new()?;
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = AuditDependenciesUseCase::new(
//!     manifest_reader,
//!     registry,
//!     advisory_source,
//!     progress_reporter,
//! );
//!
//! // Execute
//! let request = ScanRequest::new(PathBuf::from("."), true, vec!["MIT".to_string()]);
//! let response = use_case.execute(request).await?;
//! println!("{}", serde_json::to_string_pretty(&response)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod audit;
pub mod cli;
pub mod config;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, PolicyStore, StdoutPresenter,
    };
    pub use crate::adapters::outbound::network::{
        BulkAdvisoryClient, CachingRegistry, NpmRegistryClient, RegistryCache,
        DEFAULT_REGISTRY_URL,
    };
    pub use crate::application::dto::{ScanRequest, ScanResponse, ScanSummary};
    pub use crate::application::scanner::{Scanner, DEFAULT_CONCURRENCY};
    pub use crate::application::use_cases::AuditDependenciesUseCase;
    pub use crate::audit::domain::{
        DependencyKind, DependencyRecord, LicenseStatus, PolicyDocument, PolicySet,
        ResolvedPolicy, ScanMetadata, SeverityTier, VersionStatus, DEFAULT_ALLOWED_LICENSES,
    };
    pub use crate::audit::services::{LicenseClassifier, PolicyResolver, VersionAnalyzer};
    pub use crate::ports::outbound::{
        AdvisoryQuery, AdvisorySource, Manifest, ManifestEntry, ManifestReader, OutputPresenter,
        PackageInfo, PackageRegistry, ProgressReporter,
    };
    pub use crate::shared::error::{AuditError, ExitCode};
    pub use crate::shared::Result;
}
