use super::resource_kind::ResourceKind;
use crate::shared::error::LineageError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reference from an object to the object that owns it
/// (`metadata.ownerReferences[]`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerReference {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub controller: Option<bool>,
}

impl OwnerReference {
    pub fn resource_kind(&self) -> ResourceKind {
        ResourceKind::from_api_version_and_kind(&self.api_version, &self.kind)
    }
}

/// An unstructured Kubernetes-style object.
///
/// Only `apiVersion`, `kind` and `metadata` have a fixed shape; every other
/// field is read on demand with typed accessors that report a wrong shape as
/// [`LineageError::MalformedData`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resource(Value);

impl Resource {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn kind(&self) -> &str {
        self.0.get("kind").and_then(Value::as_str).unwrap_or("")
    }

    pub fn api_version(&self) -> &str {
        self.0
            .get("apiVersion")
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    pub fn name(&self) -> &str {
        self.metadata_str("name")
    }

    pub fn namespace(&self) -> &str {
        self.metadata_str("namespace")
    }

    pub fn resource_kind(&self) -> ResourceKind {
        ResourceKind::from_api_version_and_kind(self.api_version(), self.kind())
    }

    fn metadata_str(&self, key: &str) -> &str {
        self.0
            .get("metadata")
            .and_then(|m| m.get(key))
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    pub fn annotations(&self) -> Option<&Map<String, Value>> {
        self.0
            .get("metadata")
            .and_then(|m| m.get("annotations"))
            .and_then(Value::as_object)
    }

    /// A single annotation value. Non-string values are treated as absent.
    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations()
            .and_then(|anns| anns.get(key))
            .and_then(Value::as_str)
    }

    /// Walks `path` from the object root.
    pub fn nested(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(&self.0, |value, key| value.get(*key))
    }

    /// An optional string field; present-but-not-a-string is malformed.
    pub fn nested_str(&self, path: &[&str]) -> Result<Option<&str>, LineageError> {
        match self.nested(path) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(self.malformed(path, "is not a string")),
        }
    }

    pub fn required_str(&self, path: &[&str]) -> Result<&str, LineageError> {
        self.nested_str(path)?
            .ok_or_else(|| self.malformed(path, "is missing"))
    }

    /// An optional list field; present-but-not-a-list is malformed.
    pub fn nested_array(&self, path: &[&str]) -> Result<Option<&Vec<Value>>, LineageError> {
        match self.nested(path) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items)),
            Some(_) => Err(self.malformed(path, "is not a list")),
        }
    }

    pub fn required_string_list(&self, path: &[&str]) -> Result<Vec<String>, LineageError> {
        let items = self
            .nested_array(path)?
            .ok_or_else(|| self.malformed(path, "is missing"))?;

        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| self.malformed(path, "contains a non-string entry"))
            })
            .collect()
    }

    /// The owner reference flagged `controller: true`, if any.
    pub fn controller_ref(&self) -> Result<Option<OwnerReference>, LineageError> {
        let Some(raw) = self.nested(&["metadata", "ownerReferences"]) else {
            return Ok(None);
        };
        let refs: Vec<OwnerReference> = serde_json::from_value(raw.clone()).map_err(|e| {
            self.malformed(
                &["metadata", "ownerReferences"],
                &format!("cannot be parsed: {}", e),
            )
        })?;

        Ok(refs.into_iter().find(|r| r.controller == Some(true)))
    }

    /// Builds a malformed-data error naming this object and `path`.
    pub fn malformed(&self, path: &[&str], problem: &str) -> LineageError {
        LineageError::MalformedData {
            kind: self.kind().to_string(),
            namespace: self.namespace().to_string(),
            name: self.name().to_string(),
            field: format!("'{}'", path.join(".")),
            problem: problem.to_string(),
        }
    }

    /// `Kind/name`, the way candidates are listed in error messages
    pub fn short_ref(&self) -> String {
        format!("{}/{}", self.kind(), self.name())
    }
}

impl From<Value> for Resource {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scan() -> Resource {
        Resource::new(json!({
            "apiVersion": "compliance.openshift.io/v1alpha1",
            "kind": "ComplianceScan",
            "metadata": {
                "name": "ocp4-cis",
                "namespace": "openshift-compliance",
                "annotations": {"compliance.openshift.io/rescan": ""},
                "ownerReferences": [
                    {"apiVersion": "v1", "kind": "ConfigMap", "name": "unrelated"},
                    {
                        "apiVersion": "compliance.openshift.io/v1alpha1",
                        "kind": "ComplianceSuite",
                        "name": "cis",
                        "controller": true
                    }
                ]
            },
            "spec": {"content": "ssg-ocp4-ds.xml", "profile": 42, "rules": ["a", 1]}
        }))
    }

    #[test]
    fn test_metadata_accessors() {
        let res = scan();
        assert_eq!(res.kind(), "ComplianceScan");
        assert_eq!(res.name(), "ocp4-cis");
        assert_eq!(res.namespace(), "openshift-compliance");
        assert_eq!(res.resource_kind(), ResourceKind::scan());
        assert_eq!(res.annotation("compliance.openshift.io/rescan"), Some(""));
        assert_eq!(res.annotation("missing"), None);
    }

    #[test]
    fn test_required_str() {
        let res = scan();
        assert_eq!(
            res.required_str(&["spec", "content"]).unwrap(),
            "ssg-ocp4-ds.xml"
        );

        let err = res.required_str(&["spec", "missing"]).unwrap_err();
        assert!(err.to_string().contains("'spec.missing' is missing"));

        let err = res.required_str(&["spec", "profile"]).unwrap_err();
        assert!(matches!(err, LineageError::MalformedData { .. }));
        assert!(err.to_string().contains("is not a string"));
    }

    #[test]
    fn test_required_string_list_rejects_non_strings() {
        let res = scan();
        let err = res.required_string_list(&["spec", "rules"]).unwrap_err();
        assert!(err.to_string().contains("non-string entry"));
    }

    #[test]
    fn test_controller_ref_picks_controller() {
        let owner = scan().controller_ref().unwrap().unwrap();
        assert_eq!(owner.name, "cis");
        assert_eq!(owner.resource_kind(), ResourceKind::suite());
    }

    #[test]
    fn test_controller_ref_none_without_controller_flag() {
        let res = Resource::new(json!({
            "kind": "ComplianceSuite",
            "metadata": {
                "name": "cis",
                "ownerReferences": [{"apiVersion": "v1", "kind": "Foo", "name": "bar"}]
            }
        }));
        assert!(res.controller_ref().unwrap().is_none());
    }

    #[test]
    fn test_controller_ref_malformed() {
        let res = Resource::new(json!({
            "kind": "ComplianceSuite",
            "metadata": {"name": "cis", "ownerReferences": "nope"}
        }));
        assert!(res.controller_ref().is_err());
    }
}
