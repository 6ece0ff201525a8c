//! Deterministic demo data
//!
//! Generates a small but realistic namespace: five apps, each with a
//! Deployment, one to three Pods, a ConfigMap and a Secret, plus HPAs for
//! the scalable tiers. The RNG is seeded from the namespace name so the same
//! namespace always yields the same resources.

use super::{
    DataMode, DataSourceResult, DemoCache, ResourceProvider, ResourceSnapshot, format_age,
};
use crate::models::{
    ConfigMap, Container, Deployment, Hpa, OwnerReference, Pod, ReplicaCounts, Secret, TargetRef,
};
use crate::topology::FLUX_NAMESPACE_LABEL;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

const APPS: [&str; 5] = ["web-app", "api-server", "worker", "cache", "database"];
const SCALED_APPS: [&str; 3] = ["web-app", "api-server", "worker"];
const NODES: [&str; 4] = ["node-1", "node-2", "node-3", "node-4"];
const TIERS: [&str; 3] = ["frontend", "backend", "database"];
const SECRET_TYPES: [&str; 3] = ["Opaque", "kubernetes.io/tls", "kubernetes.io/dockerconfigjson"];
const DEPLOYMENT_STATUSES: [&str; 3] = ["Available", "Progressing", "Degraded"];
const POD_STATUSES: [&str; 4] = ["Running", "Pending", "Failed", "CrashLoopBackOff"];
const HASH_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// FNV-1a over the namespace, stable across runs and platforms
fn namespace_seed(namespace: &str) -> u64 {
    namespace
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
        })
}

fn random_hash(rng: &mut StdRng, len: usize) -> String {
    (0..len)
        .map(|_| HASH_ALPHABET[rng.random_range(0..HASH_ALPHABET.len())] as char)
        .collect()
}

fn random_age(rng: &mut StdRng, max_days: i64) -> String {
    let minutes = rng.random_range(1..max_days * 24 * 60);
    format_age(chrono::Duration::minutes(minutes))
}

fn pick<'a>(rng: &mut StdRng, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

fn flux_labels(app: &str, namespace: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("app".to_string(), app.to_string()),
        (FLUX_NAMESPACE_LABEL.to_string(), namespace.to_string()),
    ])
}

fn demo_deployment(rng: &mut StdRng, app: &str, namespace: &str) -> Deployment {
    let desired = rng.random_range(1..=3);
    let status = pick(rng, &DEPLOYMENT_STATUSES);
    let ready = if status == "Available" {
        desired
    } else {
        rng.random_range(0..desired)
    };

    Deployment {
        name: app.to_string(),
        namespace: namespace.to_string(),
        replicas: ReplicaCounts {
            desired,
            ready,
            available: ready,
            unavailable: desired - ready,
        },
        status: status.to_string(),
        age: random_age(rng, 90),
        labels: BTreeMap::from([
            ("app".to_string(), app.to_string()),
            ("tier".to_string(), pick(rng, &TIERS).to_string()),
        ]),
        selector: BTreeMap::from([("app".to_string(), app.to_string())]),
        strategy: "RollingUpdate".to_string(),
        config_maps: vec![format!("{}-config", app)],
        secrets: vec![format!("{}-secret", app)],
    }
}

fn demo_pods(rng: &mut StdRng, app: &str, namespace: &str) -> Vec<Pod> {
    let replicas = rng.random_range(1..=3);
    (0..replicas)
        .map(|index| {
            // Roughly one app in five gets a troubled first replica
            let status = if index == 0 && rng.random_bool(0.2) {
                pick(rng, &POD_STATUSES)
            } else {
                "Running"
            };
            let restarts = if status == "CrashLoopBackOff" {
                rng.random_range(1..10)
            } else {
                0
            };
            let hash = random_hash(rng, 10);

            Pod {
                name: format!("{}-{}", app, hash),
                namespace: namespace.to_string(),
                status: status.to_string(),
                restart_count: restarts,
                age: random_age(rng, 30),
                node_name: pick(rng, &NODES).to_string(),
                ip: format!(
                    "10.0.{}.{}",
                    rng.random_range(0..255),
                    rng.random_range(0..255)
                ),
                containers: vec![Container {
                    name: app.to_string(),
                    image: format!("{}:latest", app),
                    ready: status == "Running",
                    restart_count: restarts,
                }],
                labels: BTreeMap::from([
                    ("app".to_string(), app.to_string()),
                    ("version".to_string(), "v1".to_string()),
                ]),
                owner_references: vec![OwnerReference {
                    kind: "ReplicaSet".to_string(),
                    name: format!("{}-{}", app, &hash[..5]),
                    uid: random_hash(rng, 12),
                }],
                config_maps: if rng.random_bool(0.3) {
                    vec![format!("{}-config", app)]
                } else {
                    Vec::new()
                },
                secrets: if rng.random_bool(0.5) {
                    vec![format!("{}-secret", app)]
                } else {
                    Vec::new()
                },
            }
        })
        .collect()
}

fn demo_config_map(rng: &mut StdRng, app: &str, namespace: &str) -> ConfigMap {
    ConfigMap {
        name: format!("{}-config", app),
        namespace: namespace.to_string(),
        age: random_age(rng, 60),
        data: BTreeMap::from([
            ("app.conf".to_string(), format!("key=value\napp={}", app)),
            ("config.yaml".to_string(), "setting: true".to_string()),
        ]),
        labels: flux_labels(app, namespace),
    }
}

fn demo_secret(rng: &mut StdRng, app: &str, namespace: &str) -> Secret {
    Secret {
        name: format!("{}-secret", app),
        namespace: namespace.to_string(),
        secret_type: pick(rng, &SECRET_TYPES).to_string(),
        age: random_age(rng, 60),
        keys: vec![
            "password".to_string(),
            "api-key".to_string(),
            "token".to_string(),
        ],
        labels: flux_labels(app, namespace),
    }
}

fn demo_hpa(rng: &mut StdRng, app: &str, namespace: &str) -> Hpa {
    let (min, max) = (2, 10);
    let current = rng.random_range(min..max);
    Hpa {
        name: format!("{}-hpa", app),
        namespace: namespace.to_string(),
        target_ref: TargetRef {
            kind: "Deployment".to_string(),
            name: app.to_string(),
        },
        min_replicas: min,
        max_replicas: max,
        current_replicas: current,
        desired_replicas: current,
        age: random_age(rng, 30),
    }
}

/// Generate the demo resources for a namespace
pub fn generate_demo_snapshot(namespace: &str) -> ResourceSnapshot {
    let mut rng = StdRng::seed_from_u64(namespace_seed(namespace));
    let mut snapshot = ResourceSnapshot {
        namespace: namespace.to_string(),
        ..Default::default()
    };

    for app in APPS {
        snapshot.pods.extend(demo_pods(&mut rng, app, namespace));
        snapshot
            .deployments
            .push(demo_deployment(&mut rng, app, namespace));
        snapshot
            .config_maps
            .push(demo_config_map(&mut rng, app, namespace));
        snapshot.secrets.push(demo_secret(&mut rng, app, namespace));
    }
    for app in SCALED_APPS {
        snapshot.hpas.push(demo_hpa(&mut rng, app, namespace));
    }

    tracing::debug!(
        "Generated demo data for namespace {}: {} resources",
        namespace,
        snapshot.resource_count()
    );
    snapshot
}

/// Serves generated data through a caller-owned [`DemoCache`]
#[derive(Clone)]
pub struct DemoProvider {
    cache: Arc<Mutex<DemoCache>>,
}

impl DemoProvider {
    pub fn new(cache: Arc<Mutex<DemoCache>>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<Mutex<DemoCache>> {
        &self.cache
    }
}

#[async_trait]
impl ResourceProvider for DemoProvider {
    fn mode(&self) -> DataMode {
        DataMode::Demo
    }

    async fn fetch(&self, namespace: &str) -> DataSourceResult<ResourceSnapshot> {
        let mut cache = self.cache.lock().await;
        let snapshot =
            cache.get_or_insert_with(DataMode::Demo, namespace, || generate_demo_snapshot(namespace));
        Ok(snapshot.clone())
    }

    async fn invalidate(&self) {
        self.cache.lock().await.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_namespace_same_data() {
        assert_eq!(
            generate_demo_snapshot("default"),
            generate_demo_snapshot("default")
        );
    }

    #[test]
    fn test_shape() {
        let snapshot = generate_demo_snapshot("shop");
        assert_eq!(snapshot.deployments.len(), APPS.len());
        assert_eq!(snapshot.config_maps.len(), APPS.len());
        assert_eq!(snapshot.secrets.len(), APPS.len());
        assert_eq!(snapshot.hpas.len(), SCALED_APPS.len());
        assert!(snapshot.pods.len() >= APPS.len() && snapshot.pods.len() <= APPS.len() * 3);
        assert!(snapshot.pods.iter().all(|p| p.namespace == "shop"));
    }

    #[test]
    fn test_replicaset_owner_matches_pod_name() {
        for pod in generate_demo_snapshot("default").pods {
            let owner = &pod.owner_references[0];
            assert_eq!(owner.kind, "ReplicaSet");
            assert!(pod.name.starts_with(&owner.name));
        }
    }

    #[test]
    fn test_replica_counts_consistent() {
        for deployment in generate_demo_snapshot("default").deployments {
            let r = &deployment.replicas;
            assert_eq!(r.ready + r.unavailable, r.desired);
            if deployment.status == "Available" {
                assert_eq!(r.ready, r.desired);
            }
        }
    }

    #[tokio::test]
    async fn test_provider_uses_shared_cache() {
        let cache = Arc::new(Mutex::new(DemoCache::new()));
        let provider = DemoProvider::new(cache.clone());

        let first = provider.fetch("default").await.unwrap();
        assert!(cache.lock().await.contains(DataMode::Demo, "default"));
        let second = provider.fetch("default").await.unwrap();
        assert_eq!(first, second);

        provider.invalidate().await;
        assert!(!cache.lock().await.contains(DataMode::Demo, "default"));
    }
}
