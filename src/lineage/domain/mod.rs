mod resource;
mod resource_kind;
mod scan_identity;

pub use resource::{OwnerReference, Resource};
pub use resource_kind::{pluralize_kind, ResourceKind, COMPLIANCE_API_GROUP, COMPLIANCE_API_VERSION};
pub use scan_identity::ScanIdentity;

/// Annotation carrying the canonical rule id on results and rules
pub const RULE_ANNOTATION_KEY: &str = "compliance.openshift.io/rule";

/// Prefix of the per-benchmark control annotations on rules
pub const CONTROL_ANNOTATION_PREFIX: &str = "control.compliance.openshift.io/";
