use crate::audit::domain::severity::SeverityTier;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Allow-list applied when no policy configures one.
pub const DEFAULT_ALLOWED_LICENSES: &[&str] =
    &["MIT", "ISC", "Apache-2.0", "BSD-2-Clause", "BSD-3-Clause"];

/// What to do with dependencies whose license could not be determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownLicenseAction {
    Allow,
    Warn,
    Deny,
}

/// License rule set. Every leaf is optional so an unset field inherits
/// from the parent policy during merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LicenseRules {
    /// Exact SPDX identifiers that pass compliance. A document that sets
    /// this to something other than a list gets an empty list instead of
    /// a parse failure.
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub allowed: Option<Vec<String>>,
    #[serde(default)]
    pub forbidden: Option<Vec<String>>,
    #[serde(default)]
    pub unknown: Option<UnknownLicenseAction>,
}

impl LicenseRules {
    /// Overlay wins field by field; lists are replaced wholesale, never
    /// concatenated, so a child can narrow a parent's allow-list.
    pub fn merged_with(&self, overlay: &Self) -> Self {
        Self {
            allowed: overlay.allowed.clone().or_else(|| self.allowed.clone()),
            forbidden: overlay.forbidden.clone().or_else(|| self.forbidden.clone()),
            unknown: overlay.unknown.or(self.unknown),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecurityRules {
    /// Highest severity tier tolerated before the audit reports findings.
    #[serde(default)]
    pub max_severity: Option<SeverityTier>,
    #[serde(default)]
    pub autofix: Option<bool>,
    /// Advisory identifiers excluded from the verdict.
    #[serde(default)]
    pub exceptions: Option<Vec<String>>,
}

impl SecurityRules {
    pub fn merged_with(&self, overlay: &Self) -> Self {
        Self {
            max_severity: overlay.max_severity.or(self.max_severity),
            autofix: overlay.autofix.or(self.autofix),
            exceptions: overlay
                .exceptions
                .clone()
                .or_else(|| self.exceptions.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoMergeRules {
    #[serde(default)]
    pub patch: Option<bool>,
    #[serde(default)]
    pub minor: Option<bool>,
    #[serde(default)]
    pub major: Option<bool>,
}

impl AutoMergeRules {
    pub fn merged_with(&self, overlay: &Self) -> Self {
        Self {
            patch: overlay.patch.or(self.patch),
            minor: overlay.minor.or(self.minor),
            major: overlay.major.or(self.major),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VersioningRules {
    #[serde(default)]
    pub max_age_days: Option<u32>,
    #[serde(default)]
    pub allow_major_updates: Option<bool>,
    #[serde(default)]
    pub auto_merge: AutoMergeRules,
}

impl VersioningRules {
    pub fn merged_with(&self, overlay: &Self) -> Self {
        Self {
            max_age_days: overlay.max_age_days.or(self.max_age_days),
            allow_major_updates: overlay.allow_major_updates.or(self.allow_major_updates),
            auto_merge: self.auto_merge.merged_with(&overlay.auto_merge),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DependencyRules {
    #[serde(default)]
    pub max_direct: Option<u32>,
    #[serde(default)]
    pub max_depth: Option<u32>,
    #[serde(default)]
    pub banned: Option<Vec<String>>,
    #[serde(default)]
    pub required: Option<Vec<String>>,
    #[serde(default)]
    pub duplicates_allowed: Option<bool>,
}

impl DependencyRules {
    pub fn merged_with(&self, overlay: &Self) -> Self {
        Self {
            max_direct: overlay.max_direct.or(self.max_direct),
            max_depth: overlay.max_depth.or(self.max_depth),
            banned: overlay.banned.clone().or_else(|| self.banned.clone()),
            required: overlay.required.clone().or_else(|| self.required.clone()),
            duplicates_allowed: overlay.duplicates_allowed.or(self.duplicates_allowed),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationRules {
    #[serde(default)]
    pub slack: Option<String>,
    #[serde(default)]
    pub email: Option<Vec<String>>,
    #[serde(default)]
    pub github_issues: Option<bool>,
}

impl NotificationRules {
    pub fn merged_with(&self, overlay: &Self) -> Self {
        Self {
            slack: overlay.slack.clone().or_else(|| self.slack.clone()),
            email: overlay.email.clone().or_else(|| self.email.clone()),
            github_issues: overlay.github_issues.or(self.github_issues),
        }
    }
}

/// All rule categories of one policy document. Merge composes bottom-up
/// from the per-category merges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyRules {
    #[serde(default)]
    pub licenses: LicenseRules,
    #[serde(default)]
    pub security: SecurityRules,
    #[serde(default)]
    pub versioning: VersioningRules,
    #[serde(default)]
    pub dependencies: DependencyRules,
}

impl PolicyRules {
    pub fn merged_with(&self, overlay: &Self) -> Self {
        Self {
            licenses: self.licenses.merged_with(&overlay.licenses),
            security: self.security.merged_with(&overlay.security),
            versioning: self.versioning.merged_with(&overlay.versioning),
            dependencies: self.dependencies.merged_with(&overlay.dependencies),
        }
    }
}

/// One policy document as authored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyDocument {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Parent policies, most general first. Later parents override
    /// earlier ones; this document overrides them all.
    #[serde(default)]
    pub extends: Vec<String>,
    #[serde(default)]
    pub rules: PolicyRules,
    #[serde(default)]
    pub notifications: NotificationRules,
}

/// A policy after inheritance has been flattened away.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedPolicy {
    pub name: String,
    /// Inheritance chain that produced this policy, most general first,
    /// the policy itself last.
    pub ancestry: Vec<String>,
    pub rules: PolicyRules,
    pub notifications: NotificationRules,
}

impl ResolvedPolicy {
    /// The effective license allow-list, falling back to the built-in
    /// defaults when no ancestor configured one.
    pub fn allowed_licenses(&self) -> Vec<String> {
        match &self.rules.licenses.allowed {
            Some(list) => list.clone(),
            None => DEFAULT_ALLOWED_LICENSES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn max_severity(&self) -> SeverityTier {
        self.rules.security.max_severity.unwrap_or_default()
    }
}

/// All policy documents loaded for one run, keyed by unique name.
#[derive(Debug, Clone, Default)]
pub struct PolicySet {
    documents: BTreeMap<String, PolicyDocument>,
}

impl PolicySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document; returns false when a document with the same name
    /// is already present (the set is unchanged in that case).
    pub fn insert(&mut self, document: PolicyDocument) -> bool {
        if self.documents.contains_key(&document.name) {
            return false;
        }
        self.documents.insert(document.name.clone(), document);
        true
    }

    pub fn get(&self, name: &str) -> Option<&PolicyDocument> {
        self.documents.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.documents.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    pub fn documents(&self) -> impl Iterator<Item = &PolicyDocument> {
        self.documents.values()
    }
}

/// Accepts a list of strings, or silently substitutes an empty list when
/// the field holds any other shape. Absent fields stay `None` so merge can
/// still treat them as inherited.
fn lenient_string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        List(Vec<String>),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Lenient>::deserialize(deserializer)? {
        None => None,
        Some(Lenient::List(items)) => Some(items),
        Some(Lenient::Other(_)) => Some(Vec::new()),
    })
}
