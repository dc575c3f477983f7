/// Network adapters for the Kubernetes API
mod kube_client;

pub use kube_client::KubeApiObjectStore;
