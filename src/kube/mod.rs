//! Kubernetes client construction
//!
//! Builds a kube-rs client from the kubeconfig (or in-cluster config) and
//! keeps internal API servers out of any corporate proxy by appending them
//! to `NO_PROXY` before the client is created.

use anyhow::{Context, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use url::Url;

/// Create a client for the given kubeconfig context, or the current one
pub async fn create_client(context: Option<&str>) -> Result<Client> {
    let config = match context {
        Some(context) => {
            let options = KubeConfigOptions {
                context: Some(context.to_string()),
                ..Default::default()
            };
            Config::from_kubeconfig(&options)
                .await
                .with_context(|| format!("Failed to load kubeconfig context '{}'", context))?
        }
        None => Config::infer()
            .await
            .context("Failed to infer Kubernetes configuration")?,
    };

    let cluster_url = Url::parse(&config.cluster_url.to_string()).ok();
    if let Some(host) = cluster_url.as_ref().and_then(Url::host_str) {
        ensure_no_proxy_bypass(host);
    }

    tracing::debug!("Connecting to Kubernetes API at {}", config.cluster_url);
    Client::try_from(config).context("Failed to create Kubernetes client")
}

/// Name of the current kubeconfig context, if a kubeconfig is readable
pub fn current_context() -> Option<String> {
    Kubeconfig::read()
        .ok()
        .and_then(|kubeconfig| kubeconfig.current_context)
}

fn ensure_no_proxy_bypass(host: &str) {
    if !is_internal_host(host) {
        return;
    }

    let current = std::env::var("NO_PROXY")
        .ok()
        .filter(|v| !v.is_empty())
        .or_else(|| std::env::var("no_proxy").ok())
        .unwrap_or_default();
    if no_proxy_contains(&current, host) {
        return;
    }

    let updated = if current.is_empty() {
        host.to_string()
    } else {
        format!("{},{}", current, host)
    };
    tracing::debug!("Adding internal API host {} to NO_PROXY", host);

    // SAFETY: runs once while the client is being built, before any fetch
    // task that could read the environment concurrently is spawned.
    unsafe {
        std::env::set_var("NO_PROXY", &updated);
        std::env::set_var("no_proxy", &updated);
    }
}

/// Private addresses, loopback and the usual internal suffixes
fn is_internal_host(host: &str) -> bool {
    if host == "localhost" || host == "::1" || host.starts_with("127.") {
        return true;
    }
    if let Ok(std::net::IpAddr::V4(ip)) = host.parse::<std::net::IpAddr>() {
        return ip.is_private() || ip.is_loopback();
    }
    [".local", ".internal", ".corp", ".cluster.local"]
        .iter()
        .any(|suffix| host.ends_with(suffix))
}

fn no_proxy_contains(no_proxy: &str, host: &str) -> bool {
    no_proxy
        .split(',')
        .map(str::trim)
        .filter(|pattern| !pattern.is_empty())
        .any(|pattern| {
            let domain = pattern.strip_prefix('.').unwrap_or(pattern);
            pattern == "*" || host == domain || host.ends_with(&format!(".{}", domain))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_hosts() {
        assert!(is_internal_host("10.0.0.1"));
        assert!(is_internal_host("172.16.4.2"));
        assert!(is_internal_host("192.168.1.1"));
        assert!(is_internal_host("localhost"));
        assert!(is_internal_host("api.cluster.local"));
        assert!(is_internal_host("k8s.example.internal"));
    }

    #[test]
    fn test_public_hosts() {
        assert!(!is_internal_host("172.32.0.1"));
        assert!(!is_internal_host("api.github.com"));
        assert!(!is_internal_host("kubernetes.io"));
    }

    #[test]
    fn test_no_proxy_patterns() {
        assert!(no_proxy_contains("example.com", "example.com"));
        assert!(no_proxy_contains(".example.com", "api.example.com"));
        assert!(no_proxy_contains("localhost, example.com", "sub.example.com"));
        assert!(no_proxy_contains("*", "anything"));
        assert!(!no_proxy_contains(".prod.example.com", "devprod.example.com"));
        assert!(!no_proxy_contains("", "example.com"));
    }
}
