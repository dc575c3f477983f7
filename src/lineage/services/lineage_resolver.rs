use super::profile_resolver::ProfileResolver;
use crate::lineage::domain::{Resource, ResourceKind, ScanIdentity, RULE_ANNOTATION_KEY};
use crate::ports::outbound::ObjectStore;
use crate::shared::error::{LineageError, OwnerHop};
use crate::shared::Result;
use anyhow::Context;
use serde_json::Value;

/// How the candidate profiles of a binding are chosen between.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Take the first profile, in binding order, whose identity matches
    #[default]
    FirstMatch,
    /// Check every profile and fail if more than one matches
    Strict,
}

/// Every object visited while resolving a result, in chain order.
#[derive(Debug, Clone)]
pub struct Lineage {
    pub result: Resource,
    pub scan: Resource,
    pub suite: Resource,
    pub binding: Resource,
    pub profile: Resource,
    pub rule: Resource,
}

/// LineageResolver - finds the rule definition behind a check result
///
/// Walks `result -> scan -> suite -> binding` through controller owner
/// references, picks the binding's profile whose (content file, XCCDF id)
/// equals the scan's, and looks the rule up in that profile.
///
/// A resolver holds no state between calls; tailored profile parents are
/// cached only for the duration of one [`resolve`](Self::resolve).
pub struct LineageResolver<'a, S: ObjectStore + ?Sized> {
    store: &'a S,
    namespace: &'a str,
    policy: MatchPolicy,
}

impl<'a, S: ObjectStore + ?Sized> LineageResolver<'a, S> {
    pub fn new(store: &'a S, namespace: &'a str) -> Self {
        Self {
            store,
            namespace,
            policy: MatchPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the rule that produced the check result `result_name`
    pub fn resolve_rule(&self, result_name: &str) -> Result<Resource> {
        Ok(self.resolve(result_name)?.rule)
    }

    /// Resolves the full chain for the check result `result_name`
    ///
    /// # Errors
    /// Fails on the first lookup that fails; see [`LineageError`] for the
    /// kinds of failure
    pub fn resolve(&self, result_name: &str) -> Result<Lineage> {
        let result = self
            .store
            .get(&ResourceKind::check_result(), self.namespace, result_name)?;

        let rule_ref = result
            .annotation(RULE_ANNOTATION_KEY)
            .ok_or_else(|| {
                result.malformed(
                    &["metadata", "annotations", RULE_ANNOTATION_KEY],
                    "is missing, so the result has no rule reference",
                )
            })?
            .to_string();
        tracing::debug!(result = %result_name, %rule_ref, "resolving rule lineage");

        let scan = self.owner_of(&result, OwnerHop::Scan)?;
        let scan_identity = ScanIdentity::new(
            scan.required_str(&["spec", "content"])?,
            scan.required_str(&["spec", "profile"])?,
        );

        let suite = self
            .owner_of(&scan, OwnerHop::Suite)
            .with_context(|| format!("Cannot get a suite that owns scan '{}'", scan.name()))?;
        let binding = self
            .owner_of(&suite, OwnerHop::Binding)
            .with_context(|| format!("Cannot get a binding that owns suite '{}'", suite.name()))?;

        let mut profile = self.find_relevant_profile(&binding, &scan_identity)?;
        let rule = profile.find_rule(&rule_ref)?;
        tracing::debug!(rule = %rule.name(), "resolved rule");

        let profile = profile.resource().clone();
        Ok(Lineage {
            result,
            scan,
            suite,
            binding,
            profile,
            rule,
        })
    }

    fn owner_of(&self, resource: &Resource, hop: OwnerHop) -> Result<Resource> {
        let owner = self
            .store
            .controller_owner(self.namespace, resource)?
            .ok_or_else(|| LineageError::NoOwner {
                hop,
                kind: resource.kind().to_string(),
                namespace: self.namespace.to_string(),
                name: resource.name().to_string(),
            })?;
        tracing::debug!(%hop, owner = %owner.short_ref(), "walked ownership hop");
        Ok(owner)
    }

    /// Tries the binding's profile references in order against `scan_identity`
    fn find_relevant_profile(
        &self,
        binding: &Resource,
        scan_identity: &ScanIdentity,
    ) -> Result<ProfileResolver<'a, S>> {
        let mut matches = Vec::new();

        for (index, profile_ref) in binding_profile_refs(binding)?.iter().enumerate() {
            let (kind, name) = parse_profile_ref(binding, index, profile_ref)?;
            let resource = self
                .store
                .get(&kind, self.namespace, name)
                .with_context(|| {
                    format!(
                        "Failed to fetch profile '{}' referenced by ScanSettingBinding '{}'",
                        name,
                        binding.name()
                    )
                })?;

            let mut candidate = ProfileResolver::for_resource(
                self.store,
                self.namespace,
                resource,
                binding.name(),
            )?;
            if !candidate.profile_matches(scan_identity) {
                continue;
            }

            match self.policy {
                MatchPolicy::FirstMatch => return Ok(candidate),
                MatchPolicy::Strict => matches.push(candidate),
            }
        }

        if matches.len() > 1 {
            return Err(LineageError::AmbiguousProfile {
                namespace: self.namespace.to_string(),
                binding: binding.name().to_string(),
                matches: matches.iter().map(|m| m.resource().short_ref()).collect(),
            }
            .into());
        }

        matches.pop().ok_or_else(|| {
            LineageError::NoRelevantProfile {
                namespace: self.namespace.to_string(),
                binding: binding.name().to_string(),
                content_file: scan_identity.content_file().to_string(),
                profile_id: scan_identity.profile_id().to_string(),
            }
            .into()
        })
    }
}

/// The binding's profile references: top-level `profiles`, or `spec.profiles`
fn binding_profile_refs(binding: &Resource) -> Result<&Vec<Value>> {
    let refs = match binding.nested_array(&["profiles"])? {
        Some(refs) => refs,
        None => binding
            .nested_array(&["spec", "profiles"])?
            .ok_or_else(|| binding.malformed(&["profiles"], "is missing"))?,
    };

    if refs.is_empty() {
        return Err(binding.malformed(&["profiles"], "is empty").into());
    }
    Ok(refs)
}

/// Reads `{apiGroup, kind, name}`. `apiGroup` actually holds an apiVersion.
fn parse_profile_ref<'v>(
    binding: &Resource,
    index: usize,
    profile_reference: &'v Value,
) -> Result<(ResourceKind, &'v str)> {
    let position = format!("[{}]", index);
    let field = |key: &str| {
        profile_reference
            .get(key)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                binding.malformed(
                    &["profiles", position.as_str(), key],
                    "is missing or not a string",
                )
            })
    };

    let api_version = field("apiGroup")?;
    let kind = field("kind")?;
    let name = field("name")?;
    let kind = ResourceKind::from_api_version_and_kind(api_version, kind);
    Ok((kind, name))
}
