use std::fmt;

/// The pair that identifies which profile produced a scan: the datastream
/// content file and the XCCDF profile id.
///
/// Both components compare by exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScanIdentity {
    content_file: String,
    profile_id: String,
}

impl ScanIdentity {
    pub fn new(content_file: impl Into<String>, profile_id: impl Into<String>) -> Self {
        Self {
            content_file: content_file.into(),
            profile_id: profile_id.into(),
        }
    }

    pub fn content_file(&self) -> &str {
        &self.content_file
    }

    pub fn profile_id(&self) -> &str {
        &self.profile_id
    }

    /// True when `other` names the same content file and XCCDF id.
    pub fn matches(&self, other: &ScanIdentity) -> bool {
        self == other
    }
}

impl fmt::Display for ScanIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.content_file, self.profile_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: &str = "ssg-ocp4-ds.xml";
    const ID: &str = "xccdf_org.ssgproject.content_profile_cis-custom";

    #[test]
    fn test_identical_pair_matches() {
        let scan = ScanIdentity::new(CONTENT, ID);
        assert!(scan.matches(&ScanIdentity::new(CONTENT, ID)));
    }

    #[test]
    fn test_one_character_difference_does_not_match() {
        let scan = ScanIdentity::new(CONTENT, ID);
        let longer_id = format!("{}s", ID);
        assert!(!scan.matches(&ScanIdentity::new("ssg-ocp4-ds.xmL", ID)));
        assert!(!scan.matches(&ScanIdentity::new(CONTENT, longer_id)));
    }

    #[test]
    fn test_components_are_not_interchangeable() {
        let scan = ScanIdentity::new("a", "b");
        assert!(!scan.matches(&ScanIdentity::new("b", "a")));
    }

    #[test]
    fn test_display() {
        let identity = ScanIdentity::new("ds.xml", "p-id");
        assert_eq!(identity.to_string(), "(ds.xml, p-id)");
    }
}
