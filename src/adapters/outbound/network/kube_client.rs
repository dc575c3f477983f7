use crate::config::ClusterConnection;
use crate::lineage::domain::{Resource, ResourceKind};
use crate::ports::outbound::ObjectStore;
use crate::shared::Result;
use anyhow::Context;
use reqwest::blocking::Client;
use reqwest::{Certificate, Identity, StatusCode};
use std::time::Duration;

/// Kubernetes API client serving single-object GETs
///
/// Talks to the API server named by a kubeconfig context. Only read access
/// is needed; each lookup is one `GET` on the object's REST path.
///
/// # Security
/// - Implements timeout (30 seconds)
/// - Does not retry failed requests
/// - TLS verification stays on unless the kubeconfig sets
///   `insecure-skip-tls-verify`
pub struct KubeApiObjectStore {
    client: Client,
    server: String,
    token: Option<String>,
}

impl KubeApiObjectStore {
    const TIMEOUT_SECONDS: u64 = 30;

    pub fn new(connection: &ClusterConnection) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("compliance-inspect/{}", version);
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent);

        if let Some(pem) = &connection.ca_pem {
            let certs = Certificate::from_pem_bundle(pem)
                .context("Failed to parse the cluster certificate authority")?;
            for cert in certs {
                builder = builder.add_root_certificate(cert);
            }
        }
        if let Some(pem) = &connection.identity_pem {
            let identity =
                Identity::from_pem(pem).context("Failed to parse the client certificate/key")?;
            builder = builder.identity(identity);
        }
        if connection.insecure_skip_tls_verify {
            tracing::warn!(server = %connection.server, "TLS verification disabled by kubeconfig");
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(Self {
            client: builder.build()?,
            server: connection.server.trim_end_matches('/').to_string(),
            token: connection.token.clone(),
        })
    }

    /// REST path of a namespaced object: `/api/v1/...` for the core group,
    /// `/apis/<group>/<version>/...` otherwise.
    fn object_url(&self, kind: &ResourceKind, namespace: &str, name: &str) -> String {
        let prefix = if kind.group().is_empty() {
            format!("{}/api/{}", self.server, kind.version())
        } else {
            format!("{}/apis/{}/{}", self.server, kind.group(), kind.version())
        };
        format!(
            "{}/namespaces/{}/{}/{}",
            prefix,
            urlencoding::encode(namespace),
            kind.resource(),
            urlencoding::encode(name)
        )
    }
}

impl ObjectStore for KubeApiObjectStore {
    fn try_get(
        &self,
        kind: &ResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<Option<Resource>> {
        let url = self.object_url(kind, namespace, name);
        tracing::debug!(%url, "GET");

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .with_context(|| format!("Failed to reach the API server at {}", self.server))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => anyhow::bail!(
                "API server denied access to {} '{}/{}' (status {}).\n\n💡 Hint: Check the credentials of the kubeconfig context, or log in again",
                kind,
                namespace,
                name,
                response.status()
            ),
            status if !status.is_success() => anyhow::bail!(
                "API server returned status code {} for {} '{}/{}'",
                status,
                kind,
                namespace,
                name
            ),
            _ => {
                let resource: Resource = response.json().with_context(|| {
                    format!("Failed to decode {} '{}/{}'", kind, namespace, name)
                })?;
                Ok(Some(resource))
            }
        }
    }
}
