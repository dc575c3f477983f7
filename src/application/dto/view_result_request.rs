use crate::lineage::services::MatchPolicy;

/// Request DTO for resolving and viewing one check result
#[derive(Debug, Clone)]
pub struct ViewResultRequest {
    /// Name of the ComplianceCheckResult
    pub result_name: String,
    /// Namespace every object of the chain lives in
    pub namespace: String,
    /// How to choose between profiles matching the scan
    pub match_policy: MatchPolicy,
}

impl ViewResultRequest {
    pub fn new(result_name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            result_name: result_name.into(),
            namespace: namespace.into(),
            match_policy: MatchPolicy::default(),
        }
    }

    pub fn with_match_policy(mut self, match_policy: MatchPolicy) -> Self {
        self.match_policy = match_policy;
        self
    }
}
