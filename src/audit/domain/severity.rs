use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Vulnerability severity tiers, ordered from least to most severe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeverityTier {
    #[default]
    #[serde(alias = "none")]
    None,
    #[serde(alias = "low")]
    Low,
    #[serde(alias = "moderate")]
    Moderate,
    #[serde(alias = "high")]
    High,
    #[serde(alias = "critical")]
    Critical,
}

impl SeverityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityTier::None => "NONE",
            SeverityTier::Low => "LOW",
            SeverityTier::Moderate => "MODERATE",
            SeverityTier::High => "HIGH",
            SeverityTier::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Advisory occurrence counts per severity level for one package.
///
/// Deserializes the wire map from level name to count. Level names the
/// feed may add later are ignored rather than rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    #[serde(default)]
    pub critical: u32,
    #[serde(default)]
    pub high: u32,
    #[serde(default)]
    pub moderate: u32,
    #[serde(default)]
    pub low: u32,
}

impl SeverityCounts {
    /// Records one advisory at the named level. "medium" is an alias for
    /// moderate; unrecognized levels are dropped.
    pub fn record_level(&mut self, level: &str) {
        match level.to_ascii_lowercase().as_str() {
            "critical" => self.critical += 1,
            "high" => self.high += 1,
            "moderate" | "medium" => self.moderate += 1,
            "low" => self.low += 1,
            _ => {}
        }
    }

    pub fn is_empty(&self) -> bool {
        self.critical == 0 && self.high == 0 && self.moderate == 0 && self.low == 0
    }

    /// Collapses the counts into the single reported finding.
    ///
    /// The scan reports the most severe tier that has any occurrences, and
    /// only that tier's count. Counts at lower tiers are intentionally not
    /// summed in; downstream consumers treat the pair as "worst tier and
    /// how many at it".
    pub fn aggregate(&self) -> SeverityFinding {
        let (tier, count) = if self.critical > 0 {
            (SeverityTier::Critical, self.critical)
        } else if self.high > 0 {
            (SeverityTier::High, self.high)
        } else if self.moderate > 0 {
            (SeverityTier::Moderate, self.moderate)
        } else if self.low > 0 {
            (SeverityTier::Low, self.low)
        } else {
            (SeverityTier::None, 0)
        };
        SeverityFinding { tier, count }
    }
}

/// The aggregated severity verdict for one package.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityFinding {
    pub tier: SeverityTier,
    pub count: u32,
}

/// Package name to advisory counts, as returned by the advisory source.
pub type VulnerabilityMap = HashMap<String, SeverityCounts>;

/// Looks up the finding for a package; packages absent from the map have
/// no known advisories.
pub fn severity_finding(map: &VulnerabilityMap, package: &str) -> SeverityFinding {
    map.get(package)
        .map(SeverityCounts::aggregate)
        .unwrap_or_default()
}
