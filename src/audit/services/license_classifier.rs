use crate::audit::domain::LicenseStatus;

/// LicenseClassifier service for allow-list compliance checks
///
/// Membership is exact and case-sensitive: SPDX identifiers are
/// case-sensitive, so "mit" does not match an allow-list entry "MIT".
pub struct LicenseClassifier;

impl LicenseClassifier {
    /// Classifies a declared license against the allow-list.
    ///
    /// A missing license, an empty string, or the registry's literal
    /// "Unknown" placeholder all classify as UNKNOWN rather than
    /// NON-COMPLIANT, so absent metadata is distinguishable from a
    /// disallowed license.
    pub fn classify(license: Option<&str>, allowed: &[String]) -> LicenseStatus {
        let license = match license {
            Some(l) if !l.trim().is_empty() && l != "Unknown" => l,
            _ => return LicenseStatus::Unknown,
        };

        if allowed.iter().any(|a| a == license) {
            LicenseStatus::Compliant
        } else {
            LicenseStatus::NonCompliant
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_allowed_license_is_compliant() {
        let status = LicenseClassifier::classify(Some("MIT"), &allowed(&["MIT", "ISC"]));
        assert_eq!(status, LicenseStatus::Compliant);
    }

    #[test]
    fn test_disallowed_license_is_non_compliant() {
        let status = LicenseClassifier::classify(Some("GPL-3.0"), &allowed(&["MIT", "ISC"]));
        assert_eq!(status, LicenseStatus::NonCompliant);
    }

    #[test]
    fn test_membership_is_case_sensitive() {
        let status = LicenseClassifier::classify(Some("mit"), &allowed(&["MIT"]));
        assert_eq!(status, LicenseStatus::NonCompliant);
    }

    #[test]
    fn test_missing_license_is_unknown() {
        let status = LicenseClassifier::classify(None, &allowed(&["MIT"]));
        assert_eq!(status, LicenseStatus::Unknown);
    }

    #[test]
    fn test_literal_unknown_is_unknown() {
        let status = LicenseClassifier::classify(Some("Unknown"), &allowed(&["MIT"]));
        assert_eq!(status, LicenseStatus::Unknown);
    }

    #[test]
    fn test_empty_license_is_unknown() {
        let status = LicenseClassifier::classify(Some("  "), &allowed(&["MIT"]));
        assert_eq!(status, LicenseStatus::Unknown);
    }

    #[test]
    fn test_empty_allow_list_rejects_everything_known() {
        let status = LicenseClassifier::classify(Some("MIT"), &[]);
        assert_eq!(status, LicenseStatus::NonCompliant);
        let status = LicenseClassifier::classify(None, &[]);
        assert_eq!(status, LicenseStatus::Unknown);
    }
}
