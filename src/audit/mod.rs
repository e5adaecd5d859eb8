/// Audit bounded context: dependency classification domain
///
/// Contains the pure business logic for dependency auditing. No I/O
/// happens in this module; adapters feed it data through the ports.
pub mod domain;
pub mod services;
