use crate::audit::domain::VersionStatus;
use semver::Version;

/// Result of comparing a declared version against registry data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionAssessment {
    pub status: VersionStatus,
    /// Safe update candidate, if one exists. Always strictly newer than
    /// the declared version and never newer than the latest release.
    pub suggested_update: Option<String>,
}

impl VersionAssessment {
    fn error() -> Self {
        Self {
            status: VersionStatus::Error,
            suggested_update: None,
        }
    }
}

/// VersionAnalyzer service for classifying version currency
///
/// Pure logic over semver values: which release tier the dependency lags
/// by, and the smallest safe hop forward. No I/O.
pub struct VersionAnalyzer;

impl VersionAnalyzer {
    /// Strips a single leading caret or tilde from an npm range, leaving
    /// the concrete pinned version. Other range syntax (`>=`, `*`,
    /// `workspace:`) is left untouched and will fail semver parsing,
    /// which classifies as ERROR downstream.
    pub fn strip_range_prefix(range: &str) -> &str {
        let trimmed = range.trim();
        trimmed
            .strip_prefix('^')
            .or_else(|| trimmed.strip_prefix('~'))
            .unwrap_or(trimmed)
    }

    /// Classifies the declared range against the latest release and picks
    /// a suggested update from the published versions.
    ///
    /// # Arguments
    /// * `declared_range` - Range as written in the manifest (e.g. "^1.2.0")
    /// * `latest` - The registry's latest dist-tag, if known
    /// * `versions` - All published versions of the package
    pub fn classify(
        declared_range: &str,
        latest: Option<&str>,
        versions: &[Version],
    ) -> VersionAssessment {
        let current = match Version::parse(Self::strip_range_prefix(declared_range)) {
            Ok(v) => v,
            Err(_) => return VersionAssessment::error(),
        };

        let latest = match latest.map(Version::parse) {
            Some(Ok(v)) => v,
            Some(Err(_)) | None => return VersionAssessment::error(),
        };

        if current == latest {
            return VersionAssessment {
                status: VersionStatus::UpToDate,
                suggested_update: None,
            };
        }

        let status = if current.major != latest.major {
            VersionStatus::Major
        } else if current.minor != latest.minor {
            VersionStatus::Minor
        } else {
            // Covers a differing patch field and prerelease-only deltas.
            VersionStatus::Patch
        };

        VersionAssessment {
            status,
            suggested_update: Self::suggest_update(&current, &latest, versions),
        }
    }

    /// Picks the smallest safe hop: a newer patch on the current minor
    /// line, else the highest release on the current major line, else the
    /// latest release itself. Candidates outside (current, latest] are
    /// never suggested.
    fn suggest_update(current: &Version, latest: &Version, versions: &[Version]) -> Option<String> {
        let candidates: Vec<&Version> = versions
            .iter()
            .filter(|v| *v > current && *v <= latest)
            .collect();

        let same_minor = candidates
            .iter()
            .filter(|v| {
                v.major == current.major && v.minor == current.minor && v.patch > current.patch
            })
            .max();
        if let Some(v) = same_minor {
            return Some(v.to_string());
        }

        let same_major = candidates
            .iter()
            .filter(|v| v.major == current.major)
            .max();
        if let Some(v) = same_major {
            return Some(v.to_string());
        }

        if latest > current {
            return Some(latest.to_string());
        }

        None
    }
}
