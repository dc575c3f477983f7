//! Object builders shared by the unit tests of the lineage services and the
//! application layer.

use crate::lineage::domain::{Resource, ResourceKind, RULE_ANNOTATION_KEY};
use serde_json::{json, Value};

pub const NAMESPACE: &str = "openshift-compliance";

fn owner(kind: ResourceKind, name: &str) -> Value {
    json!([{
        "apiVersion": kind.api_version(),
        "kind": kind.kind(),
        "name": name,
        "controller": true,
        "blockOwnerDeletion": true
    }])
}

fn object(kind: ResourceKind, name: &str, owner_ref: Option<Value>) -> Value {
    let mut metadata = json!({"name": name, "namespace": NAMESPACE});
    if let Some(refs) = owner_ref {
        metadata["ownerReferences"] = refs;
    }
    json!({
        "apiVersion": kind.api_version(),
        "kind": kind.kind(),
        "metadata": metadata
    })
}

pub fn check_result(name: &str, rule_ref: &str, scan: &str) -> Resource {
    let mut value = object(
        ResourceKind::check_result(),
        name,
        Some(owner(ResourceKind::scan(), scan)),
    );
    value["metadata"]["annotations"] = json!({ RULE_ANNOTATION_KEY: rule_ref });
    value["status"] = json!("FAIL");
    value["severity"] = json!("medium");
    Resource::new(value)
}

pub fn scan(name: &str, content: &str, profile_id: &str, suite: &str) -> Resource {
    let mut value = object(
        ResourceKind::scan(),
        name,
        Some(owner(ResourceKind::suite(), suite)),
    );
    value["spec"] = json!({"content": content, "profile": profile_id});
    Resource::new(value)
}

pub fn suite(name: &str, binding: &str) -> Resource {
    Resource::new(object(
        ResourceKind::suite(),
        name,
        Some(owner(ResourceKind::binding(), binding)),
    ))
}

/// A binding whose `profiles` entries are `(kind, name)` pairs.
pub fn binding(name: &str, profiles: &[(&str, &str)]) -> Resource {
    let mut value = object(ResourceKind::binding(), name, None);
    value["profiles"] = profiles
        .iter()
        .map(|(kind, profile)| {
            json!({
                "apiGroup": ResourceKind::profile().api_version(),
                "kind": kind,
                "name": profile
            })
        })
        .collect();
    Resource::new(value)
}

pub fn bundle(name: &str, content_file: &str) -> Resource {
    let mut value = object(ResourceKind::profile_bundle(), name, None);
    value["spec"] = json!({
        "contentImage": "quay.io/compliance/content:latest",
        "contentFile": content_file
    });
    Resource::new(value)
}

pub fn profile(name: &str, id: &str, bundle: &str, rules: &[&str]) -> Resource {
    let mut value = object(
        ResourceKind::profile(),
        name,
        Some(owner(ResourceKind::profile_bundle(), bundle)),
    );
    value["id"] = json!(id);
    value["rules"] = json!(rules);
    Resource::new(value)
}

pub fn tailored_profile(name: &str, status_id: &str, extends: &str) -> Resource {
    let mut value = object(ResourceKind::tailored_profile(), name, None);
    value["spec"] = json!({"extends": extends});
    value["status"] = json!({"id": status_id, "state": "READY"});
    Resource::new(value)
}

pub fn rule(name: &str, rule_id: &str) -> Resource {
    let mut value = object(ResourceKind::rule(), name, None);
    value["metadata"]["annotations"] = json!({ RULE_ANNOTATION_KEY: rule_id });
    value["id"] = json!(format!("xccdf_org.ssgproject.content_rule_{}", rule_id));
    value["title"] = json!(format!("Title of {}", rule_id));
    value["description"] = json!(format!("Description of {}", rule_id));
    value["rationale"] = json!(format!("Rationale of {}", rule_id));
    Resource::new(value)
}

/// Drops the controller owner reference of `resource`.
pub fn orphaned(resource: Resource) -> Resource {
    let mut value = resource.as_value().clone();
    if let Some(metadata) = value.get_mut("metadata").and_then(Value::as_object_mut) {
        metadata.remove("ownerReferences");
    }
    Resource::new(value)
}
