use compliance_inspect::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock ObjectStore: an arena of objects keyed by (resource, namespace, name)
/// that records every lookup and can be told to fail specific ones.
#[derive(Default, Clone)]
pub struct MockObjectStore {
    objects: HashMap<(String, String, String), Resource>,
    failures: HashMap<(String, String), String>,
    calls: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_objects(objects: impl IntoIterator<Item = Resource>) -> Self {
        let mut store = Self::new();
        for object in objects {
            store.insert(object);
        }
        store
    }

    pub fn insert(&mut self, object: Resource) {
        let key = (
            object.resource_kind().resource().to_string(),
            object.namespace().to_string(),
            object.name().to_string(),
        );
        self.objects.insert(key, object);
    }

    /// Makes every lookup of `resource/name` fail with a transport-style error
    pub fn with_failure(mut self, resource: &str, name: &str, message: &str) -> Self {
        let key = (resource.to_string(), name.to_string());
        self.failures.insert(key, message.to_string());
        self
    }

    /// Lookups made so far, as `resource/name`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_to(&self, resource: &str, name: &str) -> usize {
        let wanted = format!("{}/{}", resource, name);
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| **call == wanted)
            .count()
    }
}

impl ObjectStore for MockObjectStore {
    fn try_get(
        &self,
        kind: &ResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<Option<Resource>> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}/{}", kind.resource(), name));

        let resource = kind.resource().to_string();
        let failure_key = (resource.clone(), name.to_string());
        if let Some(message) = self.failures.get(&failure_key) {
            anyhow::bail!("{}", message);
        }

        let key = (resource, namespace.to_string(), name.to_string());
        Ok(self.objects.get(&key).cloned())
    }
}
