use crate::lineage::domain::Resource;
use crate::lineage::services::Lineage;

/// Response DTO: the resolved chain plus the remediation generated for the
/// result, if the operator created one
#[derive(Debug, Clone)]
pub struct ViewResultResponse {
    pub lineage: Lineage,
    pub remediation: Option<Resource>,
}
