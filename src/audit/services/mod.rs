/// Pure domain services: no I/O, operate on domain objects only
pub mod license_classifier;
pub mod policy_resolver;
pub mod version_analyzer;

pub use license_classifier::LicenseClassifier;
pub use policy_resolver::PolicyResolver;
pub use version_analyzer::{VersionAnalyzer, VersionAssessment};
