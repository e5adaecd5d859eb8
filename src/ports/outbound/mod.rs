/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, network, console, etc.).
pub mod advisory_source;
pub mod manifest_reader;
pub mod output_presenter;
pub mod package_registry;
pub mod progress_reporter;

pub use advisory_source::{AdvisoryQuery, AdvisorySource};
pub use manifest_reader::{Manifest, ManifestEntry, ManifestReader};
pub use output_presenter::OutputPresenter;
pub use package_registry::{PackageInfo, PackageRegistry};
pub use progress_reporter::ProgressReporter;
