use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

/// ScanMetadata value object describing one audit run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanMetadata {
    timestamp: String,
    tool_name: String,
    tool_version: String,
    scan_id: String,
}

impl ScanMetadata {
    pub fn new(timestamp: String, tool_name: String, tool_version: String, scan_id: String) -> Self {
        Self {
            timestamp,
            tool_name,
            tool_version,
            scan_id,
        }
    }

    /// Generates metadata with the current timestamp and a unique scan id
    pub fn generate(tool_name: &str, tool_version: &str) -> Self {
        let timestamp = Utc::now().to_rfc3339();
        let scan_id = format!("urn:uuid:{}", Uuid::new_v4());
        Self::new(timestamp, tool_name.to_string(), tool_version.to_string(), scan_id)
    }

    /// Generates metadata for this tool using the compile-time version
    pub fn generate_default() -> Self {
        Self::generate("depvet", env!("CARGO_PKG_VERSION"))
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }

    pub fn scan_id(&self) -> &str {
        &self.scan_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_metadata() {
        let metadata = ScanMetadata::generate("test-tool", "1.0.0");

        assert_eq!(metadata.tool_name(), "test-tool");
        assert_eq!(metadata.tool_version(), "1.0.0");
        assert!(metadata.scan_id().starts_with("urn:uuid:"));
        assert!(!metadata.timestamp().is_empty());
    }

    #[test]
    fn test_generate_default_metadata() {
        let metadata = ScanMetadata::generate_default();

        assert_eq!(metadata.tool_name(), "depvet");
        assert_eq!(metadata.tool_version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_timestamp_is_rfc3339() {
        let metadata = ScanMetadata::generate_default();
        let timestamp = metadata.timestamp();

        assert!(timestamp.contains('T'));
        assert!(timestamp.contains('+') || timestamp.contains('Z'));
    }

    #[test]
    fn test_scan_ids_are_unique() {
        let first = ScanMetadata::generate_default();
        let second = ScanMetadata::generate_default();
        assert_ne!(first.scan_id(), second.scan_id());
    }

    #[test]
    fn test_scan_id_uuid_format() {
        let metadata = ScanMetadata::generate_default();
        let uuid_part = metadata.scan_id().strip_prefix("urn:uuid:").unwrap();
        assert_eq!(uuid_part.len(), 36);
        assert_eq!(uuid_part.matches('-').count(), 4);
    }

    #[test]
    fn test_serializes_camel_case() {
        let metadata = ScanMetadata::new(
            "2026-01-01T00:00:00Z".to_string(),
            "depvet".to_string(),
            "0.4.0".to_string(),
            "urn:uuid:12345".to_string(),
        );
        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["toolName"], "depvet");
        assert_eq!(json["toolVersion"], "0.4.0");
        assert_eq!(json["scanId"], "urn:uuid:12345");
        assert_eq!(json["timestamp"], "2026-01-01T00:00:00Z");
    }
}
