use crate::lineage::domain::{Resource, ResourceKind, ScanIdentity, RULE_ANNOTATION_KEY};
use crate::ports::outbound::ObjectStore;
use crate::shared::error::LineageError;
use crate::shared::Result;
use anyhow::Context;

/// A profile-kind object that can answer the two questions lineage
/// resolution asks of it: did you produce this scan, and which of your rules
/// carries this rule id.
///
/// Built with [`ProfileResolver::for_resource`], which dispatches on the
/// object's declared kind.
pub enum ProfileResolver<'a, S: ObjectStore + ?Sized> {
    Profile(ProfileHandle<'a, S>),
    Tailored(TailoredProfileHandle<'a, S>),
}

impl<'a, S: ObjectStore + ?Sized> ProfileResolver<'a, S> {
    /// Picks the variant for `resource`
    ///
    /// # Arguments
    /// * `parent` - Name of the object that referenced the profile, for errors
    ///
    /// # Errors
    /// Returns [`LineageError::UnsupportedKind`] for anything that is neither
    /// a Profile nor a TailoredProfile
    pub fn for_resource(
        store: &'a S,
        namespace: &'a str,
        resource: Resource,
        parent: &str,
    ) -> std::result::Result<Self, LineageError> {
        match resource.kind() {
            "Profile" => {
                let handle = ProfileHandle::new(store, namespace, resource);
                Ok(Self::Profile(handle))
            }
            "TailoredProfile" => {
                let handle = TailoredProfileHandle::new(store, namespace, resource);
                Ok(Self::Tailored(handle))
            }
            other => Err(LineageError::UnsupportedKind {
                kind: other.to_string(),
                name: resource.name().to_string(),
                parent: parent.to_string(),
            }),
        }
    }

    pub fn resource(&self) -> &Resource {
        match self {
            Self::Profile(handle) => &handle.profile,
            Self::Tailored(handle) => &handle.tailored,
        }
    }

    /// Whether this profile produced a scan with `scan_identity`.
    ///
    /// A profile whose identity cannot be computed does not match; the
    /// reason is logged and the caller moves on to the next candidate.
    pub fn profile_matches(&mut self, scan_identity: &ScanIdentity) -> bool {
        let identity = match self {
            Self::Profile(handle) => handle.identity(),
            Self::Tailored(handle) => handle.identity(),
        };

        match identity {
            Ok(identity) => {
                let matched = scan_identity.matches(&identity);
                tracing::debug!(
                    candidate = %self.resource().short_ref(),
                    %identity,
                    matched,
                    "compared profile identity"
                );
                matched
            }
            Err(err) => {
                tracing::warn!(
                    candidate = %self.resource().short_ref(),
                    "skipping profile whose identity cannot be determined: {:#}",
                    err
                );
                false
            }
        }
    }

    /// Finds the rule of this profile whose rule annotation equals `rule_ref`
    pub fn find_rule(&mut self, rule_ref: &str) -> Result<Resource> {
        match self {
            Self::Profile(handle) => handle.find_rule(rule_ref),
            Self::Tailored(handle) => handle.find_rule(rule_ref),
        }
    }
}

/// A plain Profile, owned by the ProfileBundle that shipped it.
pub struct ProfileHandle<'a, S: ObjectStore + ?Sized> {
    store: &'a S,
    namespace: &'a str,
    profile: Resource,
}

impl<'a, S: ObjectStore + ?Sized> ProfileHandle<'a, S> {
    pub fn new(store: &'a S, namespace: &'a str, profile: Resource) -> Self {
        Self {
            store,
            namespace,
            profile,
        }
    }

    /// (owning bundle's contentFile, own `id`)
    fn identity(&self) -> Result<ScanIdentity> {
        let profile_id = self.profile.required_str(&["id"])?;
        let content_file = bundle_content_file(self.store, self.namespace, &self.profile)?;
        Ok(ScanIdentity::new(content_file, profile_id))
    }

    fn find_rule(&self, rule_ref: &str) -> Result<Resource> {
        let rules = self.profile.required_string_list(&["rules"])?;

        // the rule id is a substring of the rule object's name, so only
        // those candidates are worth a fetch
        for rule_name in rules.iter().filter(|name| name.contains(rule_ref)) {
            let rule = self
                .store
                .get(&ResourceKind::rule(), self.namespace, rule_name)
                .with_context(|| {
                    format!(
                        "Failed to fetch rule '{}' listed in profile '{}'",
                        rule_name,
                        self.profile.name()
                    )
                })?;

            match rule.annotation(RULE_ANNOTATION_KEY) {
                Some(rule_id) if rule_id == rule_ref => return Ok(rule),
                Some(rule_id) => {
                    tracing::debug!(rule = %rule_name, %rule_id, "rule name matched but id differs")
                }
                None => tracing::debug!(rule = %rule_name, "rule has no rule annotation"),
            }
        }

        Err(LineageError::NoRelevantRule {
            namespace: self.namespace.to_string(),
            profile: self.profile.name().to_string(),
            rule_ref: rule_ref.to_string(),
        }
        .into())
    }
}

/// A TailoredProfile: its identity combines its own `status.id` with the
/// content file of the Profile it extends, and it has that Profile's rules.
pub struct TailoredProfileHandle<'a, S: ObjectStore + ?Sized> {
    store: &'a S,
    namespace: &'a str,
    tailored: Resource,
    parent: Option<Resource>,
}

impl<'a, S: ObjectStore + ?Sized> TailoredProfileHandle<'a, S> {
    pub fn new(store: &'a S, namespace: &'a str, tailored: Resource) -> Self {
        Self {
            store,
            namespace,
            tailored,
            parent: None,
        }
    }

    /// The extended Profile, fetched once.
    fn parent_profile(&mut self) -> Result<&Resource> {
        let parent = match self.parent.take() {
            Some(parent) => parent,
            None => {
                let name = self.tailored.required_str(&["spec", "extends"])?;
                self.store
                    .get(&ResourceKind::profile(), self.namespace, name)
                    .with_context(|| {
                        format!(
                            "Failed to fetch the profile extended by TailoredProfile '{}'",
                            self.tailored.name()
                        )
                    })?
            }
        };
        Ok(&*self.parent.insert(parent))
    }

    fn identity(&mut self) -> Result<ScanIdentity> {
        let profile_id = self.tailored.required_str(&["status", "id"])?.to_string();
        let (store, namespace) = (self.store, self.namespace);
        let parent = self.parent_profile()?;
        let content_file = bundle_content_file(store, namespace, parent)?;
        Ok(ScanIdentity::new(content_file, profile_id))
    }

    fn find_rule(&mut self, rule_ref: &str) -> Result<Resource> {
        let (store, namespace) = (self.store, self.namespace);
        let parent = self.parent_profile()?.clone();
        let mut resolver =
            ProfileResolver::for_resource(store, namespace, parent, self.tailored.name())?;
        resolver.find_rule(rule_ref)
    }
}

/// `spec.contentFile` of the ProfileBundle that controls `profile`.
fn bundle_content_file<S: ObjectStore + ?Sized>(
    store: &S,
    namespace: &str,
    profile: &Resource,
) -> Result<String> {
    let owner = store.controller_owner(namespace, profile)?;
    let bundle = owner.ok_or_else(|| {
        profile.malformed(
            &["metadata", "ownerReferences"],
            "has no controlling ProfileBundle",
        )
    })?;
    Ok(bundle.required_str(&["spec", "contentFile"])?.to_string())
}
