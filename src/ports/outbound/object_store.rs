use crate::lineage::domain::{Resource, ResourceKind};
use crate::shared::error::LineageError;
use crate::shared::Result;

/// ObjectStore port for reading cluster objects
///
/// This port abstracts where compliance objects come from: the cluster API
/// in normal use, a directory of manifests or an in-memory arena in tests.
/// Implementations are read-only and never retry; a failed call is reported
/// to the caller as-is.
pub trait ObjectStore {
    /// Fetches one object by kind, namespace and name
    ///
    /// # Returns
    /// `Ok(None)` when the object does not exist
    ///
    /// # Errors
    /// Returns an error on transport or decoding failures
    fn try_get(&self, kind: &ResourceKind, namespace: &str, name: &str) -> Result<Option<Resource>>;

    /// Fetches one object that is required to exist
    ///
    /// # Errors
    /// Returns [`LineageError::NotFound`] naming kind, namespace and name when
    /// the object is absent, or the transport error from [`Self::try_get`]
    fn get(&self, kind: &ResourceKind, namespace: &str, name: &str) -> Result<Resource> {
        self.try_get(kind, namespace, name)?.ok_or_else(|| {
            LineageError::NotFound {
                kind: kind.kind().to_string(),
                namespace: namespace.to_string(),
                name: name.to_string(),
            }
            .into()
        })
    }

    /// Fetches the object referenced by the controller owner reference of
    /// `resource`
    ///
    /// # Returns
    /// `Ok(None)` when `resource` has no controller owner reference. A
    /// reference to an object that no longer exists is a not-found error,
    /// not `None`.
    fn controller_owner(&self, namespace: &str, resource: &Resource) -> Result<Option<Resource>> {
        let Some(owner_ref) = resource.controller_ref()? else {
            return Ok(None);
        };
        tracing::debug!(
            owner_kind = %owner_ref.kind,
            owner = %owner_ref.name,
            "following controller owner of {}",
            resource.short_ref()
        );
        let kind = owner_ref.resource_kind();
        let owner = self.get(&kind, namespace, &owner_ref.name)?;
        Ok(Some(owner))
    }
}

impl<S: ObjectStore + ?Sized> ObjectStore for &S {
    fn try_get(
        &self,
        kind: &ResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<Option<Resource>> {
        (**self).try_get(kind, namespace, name)
    }

    fn get(&self, kind: &ResourceKind, namespace: &str, name: &str) -> Result<Resource> {
        (**self).get(kind, namespace, name)
    }

    fn controller_owner(&self, namespace: &str, resource: &Resource) -> Result<Option<Resource>> {
        (**self).controller_owner(namespace, resource)
    }
}

impl<S: ObjectStore + ?Sized> ObjectStore for Box<S> {
    fn try_get(
        &self,
        kind: &ResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<Option<Resource>> {
        (**self).try_get(kind, namespace, name)
    }

    fn get(&self, kind: &ResourceKind, namespace: &str, name: &str) -> Result<Resource> {
        (**self).get(kind, namespace, name)
    }

    fn controller_owner(&self, namespace: &str, resource: &Resource) -> Result<Option<Resource>> {
        (**self).controller_owner(namespace, resource)
    }
}
