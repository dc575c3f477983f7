//! Kubeconfig support for compliance-inspect.
//!
//! Locates and parses the kubeconfig file, and turns the selected context
//! into a [`ClusterConnection`] the cluster adapter can use.

use anyhow::Context as _;
use base64::Engine;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::shared::error::InspectError;
use crate::shared::security::{read_regular_file, read_regular_file_bytes};
use crate::shared::Result;

/// Namespace used when neither the flag nor the context names one
pub const DEFAULT_NAMESPACE: &str = "default";

/// Top-level kubeconfig schema (the subset this tool needs).
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct KubeConfig {
    #[serde(default)]
    pub clusters: Vec<NamedCluster>,
    #[serde(default)]
    pub contexts: Vec<NamedContext>,
    #[serde(default)]
    pub users: Vec<NamedUser>,
    pub current_context: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NamedCluster {
    pub name: String,
    pub cluster: Cluster,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Cluster {
    pub server: String,
    pub certificate_authority_data: Option<String>,
    pub certificate_authority: Option<PathBuf>,
    #[serde(default)]
    pub insecure_skip_tls_verify: bool,
}

#[derive(Debug, Deserialize)]
pub struct NamedContext {
    pub name: String,
    pub context: KubeContext,
}

#[derive(Debug, Deserialize)]
pub struct KubeContext {
    pub cluster: String,
    pub user: String,
    pub namespace: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NamedUser {
    pub name: String,
    #[serde(default)]
    pub user: AuthInfo,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct AuthInfo {
    pub token: Option<String>,
    #[serde(rename = "tokenFile")]
    pub token_file: Option<PathBuf>,
    pub client_certificate_data: Option<String>,
    pub client_certificate: Option<PathBuf>,
    pub client_key_data: Option<String>,
    pub client_key: Option<PathBuf>,
}

/// Everything needed to talk to one API server.
#[derive(Debug, Clone, Default)]
pub struct ClusterConnection {
    pub server: String,
    /// PEM bundle of extra trusted CAs
    pub ca_pem: Option<Vec<u8>>,
    pub insecure_skip_tls_verify: bool,
    pub token: Option<String>,
    /// Client certificate followed by its private key, both PEM
    pub identity_pem: Option<Vec<u8>>,
    /// Namespace set on the selected context
    pub namespace: Option<String>,
}

/// Picks the kubeconfig file: `--kubeconfig`, then the first entry of
/// `$KUBECONFIG`, then `$HOME/.kube/config`.
pub fn kubeconfig_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Some(paths) = std::env::var_os("KUBECONFIG") {
        if let Some(first) = std::env::split_paths(&paths).find(|p| !p.as_os_str().is_empty()) {
            return Ok(first);
        }
    }

    match std::env::var_os("HOME") {
        Some(home) => Ok(PathBuf::from(home).join(".kube").join("config")),
        None => anyhow::bail!(
            "Cannot locate a kubeconfig: neither --kubeconfig, KUBECONFIG nor HOME is set.\n\n💡 Hint: Pass --kubeconfig <FILE>, or use --from-dir to read exported manifests"
        ),
    }
}

/// Reads and parses the kubeconfig at `path`
pub fn load_kubeconfig(path: &Path) -> Result<KubeConfig> {
    let content = read_regular_file(path, "kubeconfig")?;

    serde_yaml_ng::from_str(&content).map_err(|e| {
        InspectError::InvalidKubeconfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
            hint: "Ensure the file contains valid kubeconfig YAML".to_string(),
        }
        .into()
    })
}

impl KubeConfig {
    /// Resolves `context` (or the current context) into a connection
    ///
    /// # Arguments
    /// * `context` - Context name from `--context`, if given
    /// * `path` - Path the kubeconfig was read from; relative file references
    ///   inside it are resolved against its directory
    pub fn connection(&self, context: Option<&str>, path: &Path) -> Result<ClusterConnection> {
        let invalid = |reason: String, hint: &str| InspectError::InvalidKubeconfig {
            path: path.to_path_buf(),
            reason,
            hint: hint.to_string(),
        };

        let context_name = context
            .or(self.current_context.as_deref())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                invalid(
                    "no current-context is set".to_string(),
                    "Pass --context <NAME> or run `kubectl config use-context`",
                )
            })?;

        let ctx = self
            .contexts
            .iter()
            .find(|c| c.name == context_name)
            .map(|c| &c.context)
            .ok_or_else(|| {
                invalid(
                    format!("context '{}' is not defined", context_name),
                    "Check the name with `kubectl config get-contexts`",
                )
            })?;

        let cluster = self
            .clusters
            .iter()
            .find(|c| c.name == ctx.cluster)
            .map(|c| &c.cluster)
            .ok_or_else(|| {
                invalid(
                    format!("cluster '{}' is not defined", ctx.cluster),
                    "Check the clusters section of the kubeconfig",
                )
            })?;

        // a context may legitimately point at a user with no entry (no auth)
        let default_user = AuthInfo::default();
        let user = self
            .users
            .iter()
            .find(|u| u.name == ctx.user)
            .map(|u| &u.user)
            .unwrap_or(&default_user);

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

        let ca_pem = pem_source(
            cluster.certificate_authority_data.as_deref(),
            cluster.certificate_authority.as_deref(),
            base_dir,
            "certificate-authority",
        )?;
        let cert_pem = pem_source(
            user.client_certificate_data.as_deref(),
            user.client_certificate.as_deref(),
            base_dir,
            "client-certificate",
        )?;
        let key_pem = pem_source(
            user.client_key_data.as_deref(),
            user.client_key.as_deref(),
            base_dir,
            "client-key",
        )?;
        let identity_pem = match (cert_pem, key_pem) {
            (Some(mut cert), Some(key)) => {
                cert.push(b'\n');
                cert.extend_from_slice(&key);
                Some(cert)
            }
            (None, None) => None,
            _ => {
                return Err(invalid(
                    format!("user '{}' lacks a client certificate or key", ctx.user),
                    "Provide both client-certificate and client-key",
                )
                .into())
            }
        };

        let token = match (&user.token, &user.token_file) {
            (Some(token), _) => Some(token.trim().to_string()),
            (None, Some(file)) => {
                let token = read_regular_file(&resolve(base_dir, file), "tokenFile")?;
                Some(token.trim().to_string())
            }
            (None, None) => None,
        };

        Ok(ClusterConnection {
            server: cluster.server.clone(),
            ca_pem,
            insecure_skip_tls_verify: cluster.insecure_skip_tls_verify,
            token,
            identity_pem,
            namespace: ctx.namespace.clone().filter(|ns| !ns.is_empty()),
        })
    }
}

/// Inline base64 data wins over a file reference.
fn pem_source(
    data: Option<&str>,
    file: Option<&Path>,
    base_dir: &Path,
    field: &str,
) -> Result<Option<Vec<u8>>> {
    if let Some(data) = data {
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(data.trim())
            .with_context(|| format!("Failed to decode {}-data", field))?;
        return Ok(Some(decoded));
    }
    match file {
        Some(file) => {
            let path = resolve(base_dir, file);
            Ok(Some(read_regular_file_bytes(&path, field)?))
        }
        None => Ok(None),
    }
}

fn resolve(base_dir: &Path, file: &Path) -> PathBuf {
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        base_dir.join(file)
    }
}

/// `--namespace` wins, then the context namespace, then [`DEFAULT_NAMESPACE`]
pub fn resolve_namespace(flag: Option<&str>, context_namespace: Option<&str>) -> String {
    flag.filter(|ns| !ns.is_empty())
        .or(context_namespace)
        .unwrap_or(DEFAULT_NAMESPACE)
        .to_string()
}
