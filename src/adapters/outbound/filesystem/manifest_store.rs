use crate::lineage::domain::{Resource, ResourceKind};
use crate::ports::outbound::ObjectStore;
use crate::shared::security::{read_regular_file, validate_directory};
use crate::shared::Result;
use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File extensions picked up by [`ManifestObjectStore::load_dir`]
const MANIFEST_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// Lookup key: API group + plural resource + namespace + name.
/// The version is left out so any served version of a kind finds the object.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct ObjectKey {
    group: String,
    resource: String,
    namespace: String,
    name: String,
}

impl ObjectKey {
    fn new(kind: &ResourceKind, namespace: &str, name: &str) -> Self {
        Self {
            group: kind.group().to_string(),
            resource: kind.resource().to_string(),
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
    }
}

/// ManifestObjectStore adapter serving objects from memory
///
/// Objects come either from a directory of manifests (the output of
/// `kubectl get ... -o yaml` works as-is) or straight from code. Lookups
/// never touch the filesystem after loading.
#[derive(Debug, Default)]
pub struct ManifestObjectStore {
    objects: HashMap<ObjectKey, Resource>,
}

impl ManifestObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_resources(resources: impl IntoIterator<Item = Resource>) -> Self {
        let mut store = Self::new();
        for resource in resources {
            store.insert(resource);
        }
        store
    }

    /// Adds or replaces an object, keyed by its own apiVersion, kind,
    /// namespace and name
    pub fn insert(&mut self, resource: Resource) -> Option<Resource> {
        let key = ObjectKey::new(
            &resource.resource_kind(),
            resource.namespace(),
            resource.name(),
        );
        self.objects.insert(key, resource)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Loads every `.yaml`, `.yml` and `.json` file directly inside `dir`
    ///
    /// Files may hold several YAML documents and `kind: *List` wrappers;
    /// each contained object is indexed. Subdirectories are not descended.
    ///
    /// # Errors
    /// Returns an error if `dir` is not a real directory, one of its entries
    /// or files cannot be read, or a document is not valid YAML/JSON
    pub fn load_dir(dir: &Path) -> Result<Self> {
        validate_directory(dir)?;

        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to list manifest directory {}", dir.display()))?
            .map(|entry| entry.map(|e| e.path()));
        let paths = manifest_paths(dir, entries)?;

        let mut store = Self::new();
        for path in &paths {
            let content = read_regular_file(path, "manifest")?;
            for resource in parse_manifests(&content)
                .with_context(|| format!("Failed to parse manifest {}", path.display()))?
            {
                if resource.name().is_empty() {
                    tracing::warn!(
                        file = %path.display(),
                        kind = %resource.kind(),
                        "skipping object without a name"
                    );
                    continue;
                }
                store.insert(resource);
            }
        }

        tracing::debug!(
            dir = %dir.display(),
            files = paths.len(),
            objects = store.len(),
            "loaded manifests"
        );
        Ok(store)
    }
}

/// Sorted manifest files among the entries of `dir`. An unreadable entry
/// fails the whole listing.
fn manifest_paths(
    dir: &Path,
    entries: impl IntoIterator<Item = io::Result<PathBuf>>,
) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.with_context(|| format!("Failed to read an entry of {}", dir.display()))?;
        if is_manifest_file(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn is_manifest_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MANIFEST_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Splits a (possibly multi-document) YAML or JSON text into objects,
/// unwrapping `*List` documents into their items.
fn parse_manifests(content: &str) -> Result<Vec<Resource>> {
    let mut resources = Vec::new();

    for document in serde_yaml_ng::Deserializer::from_str(content) {
        let value = Value::deserialize(document)?;
        if value.is_null() {
            continue;
        }

        let is_list = value
            .get("kind")
            .and_then(Value::as_str)
            .is_some_and(|kind| kind.ends_with("List"));

        match value.get("items").and_then(Value::as_array) {
            Some(items) if is_list => {
                resources.extend(items.iter().cloned().map(Resource::new));
            }
            _ => resources.push(Resource::new(value)),
        }
    }

    Ok(resources)
}

impl ObjectStore for ManifestObjectStore {
    fn try_get(
        &self,
        kind: &ResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<Option<Resource>> {
        let key = ObjectKey::new(kind, namespace, name);
        let found = self.objects.get(&key).cloned();
        tracing::debug!(
            resource = %kind.resource(),
            %namespace,
            %name,
            found = found.is_some(),
            "manifest lookup"
        );
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lineage::fixtures::{self, NAMESPACE};
    use tempfile::TempDir;

    #[test]
    fn test_from_resources_lookup() {
        let store = ManifestObjectStore::from_resources(vec![
            fixtures::rule("ocp4-etcd-cert", "etcd-cert"),
            fixtures::suite("cis", "cis-binding"),
        ]);
        assert_eq!(store.len(), 2);

        let rule = store
            .get(&ResourceKind::rule(), NAMESPACE, "ocp4-etcd-cert")
            .unwrap();
        assert_eq!(rule.name(), "ocp4-etcd-cert");

        let other_namespace = store
            .try_get(&ResourceKind::rule(), "other-namespace", "ocp4-etcd-cert")
            .unwrap();
        assert!(other_namespace.is_none());
        let other_kind = store
            .try_get(&ResourceKind::profile(), NAMESPACE, "ocp4-etcd-cert")
            .unwrap();
        assert!(other_kind.is_none());
    }

    #[test]
    fn test_lookup_ignores_version() {
        let store = ManifestObjectStore::from_resources(vec![fixtures::suite("cis", "b")]);
        let kind = ResourceKind::from_api_version_and_kind(
            "compliance.openshift.io/v1beta1",
            "ComplianceSuite",
        );
        assert!(store.try_get(&kind, NAMESPACE, "cis").unwrap().is_some());
    }

    #[test]
    fn test_controller_owner_follows_reference() {
        let store = ManifestObjectStore::from_resources(vec![
            fixtures::suite("cis", "cis-binding"),
            fixtures::binding("cis-binding", &[("Profile", "ocp4-cis")]),
        ]);
        let suite_kind = ResourceKind::suite();
        let suite = store.get(&suite_kind, NAMESPACE, "cis").unwrap();

        let owner = store.controller_owner(NAMESPACE, &suite).unwrap().unwrap();
        assert_eq!(owner.kind(), "ScanSettingBinding");

        let binding = store.controller_owner(NAMESPACE, &owner).unwrap();
        assert!(binding.is_none());
    }

    #[test]
    fn test_parse_multi_document_yaml_and_lists() {
        let content = r#"
apiVersion: compliance.openshift.io/v1alpha1
kind: Rule
metadata:
  name: ocp4-a
  namespace: openshift-compliance
---
apiVersion: v1
kind: List
items:
  - apiVersion: compliance.openshift.io/v1alpha1
    kind: Rule
    metadata:
      name: ocp4-b
      namespace: openshift-compliance
  - apiVersion: compliance.openshift.io/v1alpha1
    kind: Rule
    metadata:
      name: ocp4-c
      namespace: openshift-compliance
"#;
        let resources = parse_manifests(content).unwrap();
        let names: Vec<&str> = resources.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["ocp4-a", "ocp4-b", "ocp4-c"]);
    }

    #[test]
    fn test_parse_json_manifest() {
        let content = r#"{
  "apiVersion": "compliance.openshift.io/v1alpha1",
  "kind": "Profile",
  "metadata": {"name": "ocp4-cis"}
}"#;
        let resources = parse_manifests(content).unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].kind(), "Profile");
    }

    #[test]
    fn test_load_dir() {
        let rule = r#"apiVersion: compliance.openshift.io/v1alpha1
kind: Rule
metadata:
  name: ocp4-a
  namespace: ns
"#;
        let profile = r#"{"apiVersion": "compliance.openshift.io/v1alpha1", "kind": "Profile",
  "metadata": {"name": "p", "namespace": "ns"}}"#;
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("rules.yaml"), rule).unwrap();
        fs::write(dir.path().join("profile.json"), profile).unwrap();
        fs::write(dir.path().join("README.md"), "# not a manifest").unwrap();

        let store = ManifestObjectStore::load_dir(dir.path()).unwrap();
        assert_eq!(store.len(), 2);
        let rule = store.get(&ResourceKind::rule(), "ns", "ocp4-a").unwrap();
        assert_eq!(rule.name(), "ocp4-a");
        let profile = store.get(&ResourceKind::profile(), "ns", "p").unwrap();
        assert_eq!(profile.kind(), "Profile");
    }

    #[test]
    fn test_manifest_paths_filters_and_sorts() {
        let entries = ["b.yml", "README.md", "a.json"].map(|name| Ok(PathBuf::from(name)));
        let paths = manifest_paths(Path::new("."), entries).unwrap();
        assert_eq!(paths, vec![PathBuf::from("a.json"), PathBuf::from("b.yml")]);
    }

    #[test]
    fn test_unreadable_entry_fails_the_listing() {
        let dir = Path::new("/var/manifests");
        let entries = vec![
            Ok(PathBuf::from("/var/manifests/rules.yaml")),
            Err(io::Error::other("stale file handle")),
        ];

        let err = manifest_paths(dir, entries).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("an entry of /var/manifests"));
        assert!(message.contains("stale file handle"));
    }

    #[test]
    fn test_load_dir_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("broken.yaml"), "kind: [unclosed").unwrap();

        let err = ManifestObjectStore::load_dir(dir.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.yaml"));
    }

    #[test]
    fn test_load_dir_not_a_directory() {
        let err = ManifestObjectStore::load_dir(Path::new("/nonexistent/manifests")).unwrap_err();
        assert!(err.to_string().contains("Invalid manifest directory"));
    }
}
