use std::fmt;

/// API group of every compliance-operator resource
pub const COMPLIANCE_API_GROUP: &str = "compliance.openshift.io";

/// Served version of the compliance-operator resources
pub const COMPLIANCE_API_VERSION: &str = "v1alpha1";

/// Addressing information for a resource type: group, version, plural
/// resource name and the singular kind.
///
/// The plural is what the API server URL needs; the kind is what objects
/// declare about themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceKind {
    group: String,
    version: String,
    resource: String,
    kind: String,
}

impl ResourceKind {
    pub fn new(group: &str, version: &str, kind: &str) -> Self {
        Self {
            group: group.to_string(),
            version: version.to_string(),
            resource: pluralize_kind(kind),
            kind: kind.to_string(),
        }
    }

    /// Builds a kind from an `apiVersion` string as found in owner
    /// references (`group/version`, or a bare `version` for the core group).
    pub fn from_api_version_and_kind(api_version: &str, kind: &str) -> Self {
        match api_version.split_once('/') {
            Some((group, version)) => Self::new(group, version, kind),
            None => Self::new("", api_version, kind),
        }
    }

    fn compliance(kind: &str) -> Self {
        Self::new(COMPLIANCE_API_GROUP, COMPLIANCE_API_VERSION, kind)
    }

    pub fn check_result() -> Self {
        Self::compliance("ComplianceCheckResult")
    }

    pub fn scan() -> Self {
        Self::compliance("ComplianceScan")
    }

    pub fn suite() -> Self {
        Self::compliance("ComplianceSuite")
    }

    pub fn binding() -> Self {
        Self::compliance("ScanSettingBinding")
    }

    pub fn profile() -> Self {
        Self::compliance("Profile")
    }

    pub fn tailored_profile() -> Self {
        Self::compliance("TailoredProfile")
    }

    pub fn profile_bundle() -> Self {
        Self::compliance("ProfileBundle")
    }

    pub fn rule() -> Self {
        Self::compliance("Rule")
    }

    pub fn remediation() -> Self {
        Self::compliance("ComplianceRemediation")
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Lower-case plural resource name, e.g. `compliancescans`
    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The `apiVersion` string objects of this kind carry
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

/// Naive English pluralization used by the API server for these kinds:
/// lower-case, then `es` after a trailing `s`, otherwise `s`.
pub fn pluralize_kind(kind: &str) -> String {
    let lower = kind.to_lowercase();
    if lower.ends_with('s') {
        format!("{}es", lower)
    } else {
        format!("{}s", lower)
    }
}
