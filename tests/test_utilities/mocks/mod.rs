/// Mock implementations for testing
mod mock_advisory_source;
mod mock_manifest_reader;
mod mock_package_registry;
mod mock_progress_reporter;

pub use mock_advisory_source::MockAdvisorySource;
pub use mock_manifest_reader::MockManifestReader;
pub use mock_package_registry::MockPackageRegistry;
pub use mock_progress_reporter::MockProgressReporter;
