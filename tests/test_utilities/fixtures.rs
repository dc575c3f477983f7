//! Builders for compliance-operator objects used by the integration tests
#![allow(dead_code)]

use compliance_inspect::prelude::*;
use serde_json::{json, Value};

pub const NAMESPACE: &str = "openshift-compliance";
const API_VERSION: &str = "compliance.openshift.io/v1alpha1";
const RULE_ANNOTATION: &str = "compliance.openshift.io/rule";

fn object(kind: &str, name: &str, owner: Option<(&str, &str)>) -> Value {
    let mut value = json!({
        "apiVersion": API_VERSION,
        "kind": kind,
        "metadata": {"name": name, "namespace": NAMESPACE}
    });
    if let Some((owner_kind, owner_name)) = owner {
        value["metadata"]["ownerReferences"] = json!([{
            "apiVersion": API_VERSION,
            "kind": owner_kind,
            "name": owner_name,
            "uid": format!("uid-{}", owner_name),
            "controller": true
        }]);
    }
    value
}

pub fn check_result(name: &str, rule_ref: Option<&str>, scan: &str) -> Resource {
    let owner = ("ComplianceScan", scan);
    let mut value = object("ComplianceCheckResult", name, Some(owner));
    if let Some(rule_ref) = rule_ref {
        value["metadata"]["annotations"] = json!({ RULE_ANNOTATION: rule_ref });
    }
    value["status"] = json!("FAIL");
    value["severity"] = json!("high");
    Resource::new(value)
}

pub fn scan(name: &str, content: &str, profile_id: &str, suite: Option<&str>) -> Resource {
    let owner = suite.map(|s| ("ComplianceSuite", s));
    let mut value = object("ComplianceScan", name, owner);
    value["spec"] = json!({"content": content, "profile": profile_id});
    Resource::new(value)
}

pub fn suite(name: &str, binding: Option<&str>) -> Resource {
    Resource::new(object(
        "ComplianceSuite",
        name,
        binding.map(|b| ("ScanSettingBinding", b)),
    ))
}

pub fn binding(name: &str, profiles: &[(&str, &str)]) -> Resource {
    let mut value = object("ScanSettingBinding", name, None);
    value["profiles"] = profiles
        .iter()
        .map(|(kind, profile)| json!({"apiGroup": API_VERSION, "kind": kind, "name": profile}))
        .collect();
    Resource::new(value)
}

pub fn bundle(name: &str, content_file: &str) -> Resource {
    let mut value = object("ProfileBundle", name, None);
    value["spec"] = json!({"contentFile": content_file});
    Resource::new(value)
}

pub fn profile(name: &str, id: &str, bundle: &str, rules: &[&str]) -> Resource {
    let mut value = object("Profile", name, Some(("ProfileBundle", bundle)));
    value["id"] = json!(id);
    value["rules"] = json!(rules);
    Resource::new(value)
}

pub fn tailored_profile(name: &str, status_id: &str, extends: &str) -> Resource {
    let mut value = object("TailoredProfile", name, None);
    value["spec"] = json!({"extends": extends});
    value["status"] = json!({"id": status_id});
    Resource::new(value)
}

pub fn rule(name: &str, rule_id: &str) -> Resource {
    let mut value = object("Rule", name, None);
    value["metadata"]["annotations"] = json!({ RULE_ANNOTATION: rule_id });
    value["title"] = json!(format!("Title of {}", rule_id));
    value["description"] = json!("description");
    value["rationale"] = json!("rationale");
    Resource::new(value)
}

/// The end-to-end chain: `r1 -> s1 -> su1 -> b1 -> [prof-a, prof-b]`, where
/// only `prof-b` matches the scan and lists `rule-x` and `rule-y`.
pub fn reference_chain() -> Vec<Resource> {
    vec![
        check_result("r1", Some("rule-y"), "s1"),
        scan("s1", "ds.xml", "p-id", Some("su1")),
        suite("su1", Some("b1")),
        binding("b1", &[("Profile", "prof-a"), ("Profile", "prof-b")]),
        bundle("bundle", "ds.xml"),
        profile("prof-a", "other-id", "bundle", &["rule-x"]),
        profile("prof-b", "p-id", "bundle", &["rule-x", "rule-y"]),
        rule("rule-x", "rule-x"),
        rule("rule-y", "rule-y"),
    ]
}
