//! Grouping engine
//!
//! Resources are claimed by three passes in strict priority order. A
//! resource claimed by an earlier pass is never reconsidered.
//!
//! 1. **Label**: the first non-empty identity label names the group.
//! 2. **Relationship**: connected components of the (undirected)
//!    relationship graph. A component touching an existing group merges
//!    into it; otherwise it becomes a group named after its first workload.
//! 3. **Namespace / individual**: leftovers are grouped per namespace, or
//!    one group per resource when the namespace is empty.
//!
//! Resource keys are visited in sorted order and adjacency lists are sorted,
//! so the same graph always yields the same groups.
//!
//! Only the label pass joins groups by name. Later passes join a group
//! through a member that is already claimed, never by name alone. A derived
//! name that is already taken gets a suffix: the namespace for relationship
//! groups, `namespace` for namespace groups and the lowercased kind for
//! individual groups, then `-2`, `-3` and so on until it is free.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use packsmith_core::{ProcessedResource, ResourceGraph, ResourceKey};
use tracing::{debug, warn};

use crate::config::GroupingConfig;
use crate::error::{AnalyzeError, Result};
use crate::group::{GroupingStrategy, ServiceGroup};

/// Partition a graph into service groups with the default configuration
pub fn group_resources(graph: &ResourceGraph) -> Result<Vec<ServiceGroup>> {
    GroupingEngine::default().group(graph)
}

/// Splits a resource graph into service groups
#[derive(Debug, Clone, Default)]
pub struct GroupingEngine {
    config: GroupingConfig,
}

impl GroupingEngine {
    pub fn new(config: GroupingConfig) -> Self {
        Self { config }
    }

    /// Partition the graph into groups, ordered by group name
    ///
    /// Every resource of the graph ends up in exactly one group.
    pub fn group(&self, graph: &ResourceGraph) -> Result<Vec<ServiceGroup>> {
        validate(graph)?;

        let mut state = GroupingState::default();
        self.group_by_label(graph, &mut state);
        self.group_by_relationship(graph, &mut state);
        self.group_by_namespace(graph, &mut state);

        debug!(
            "grouped {} resources into {} groups",
            graph.len(),
            state.groups.len()
        );
        Ok(state.into_groups())
    }

    fn group_by_label(&self, graph: &ResourceGraph, state: &mut GroupingState) {
        for resource in graph.resources.values() {
            if let Some(identity) = self.identity_label(resource) {
                if !state.groups.contains_key(identity) {
                    state.open(identity, "", GroupingStrategy::Label, resource.namespace());
                }
                state.join(identity, resource);
            }
        }
        debug!("label pass claimed {} resources", state.owners.len());
    }

    fn group_by_relationship(&self, graph: &ResourceGraph, state: &mut GroupingState) {
        let adjacency = build_adjacency(graph);

        for (key, resource) in &graph.resources {
            if state.is_claimed(key) || !adjacency.contains_key(key) {
                continue;
            }

            let component = connected_component(key, &adjacency);
            let existing = component
                .iter()
                .find_map(|k| state.owner(k))
                .map(str::to_string);

            let members: Vec<&ProcessedResource> = component
                .iter()
                .filter(|k| !state.is_claimed(k))
                .filter_map(|k| graph.get(k))
                .collect();

            let name = match existing {
                Some(name) => {
                    debug!(
                        "merging {} related resources into group '{}'",
                        members.len(),
                        name
                    );
                    name
                }
                None => {
                    let lead = self.lead_member(&members).unwrap_or(resource);
                    let namespace = members.first().unwrap_or(&resource).namespace();
                    let qualifier = if namespace.is_empty() {
                        lead.kind().to_lowercase()
                    } else {
                        namespace.to_string()
                    };
                    state.open(lead.name(), &qualifier, GroupingStrategy::Relationship, namespace)
                }
            };

            for member in members {
                state.join(&name, member);
            }
        }
    }

    fn group_by_namespace(&self, graph: &ResourceGraph, state: &mut GroupingState) {
        let mut by_namespace: BTreeMap<&str, Vec<&ProcessedResource>> = BTreeMap::new();
        let mut individuals = Vec::new();
        for (key, resource) in &graph.resources {
            if state.is_claimed(key) {
                continue;
            }
            if resource.namespace().is_empty() {
                individuals.push(resource);
            } else {
                by_namespace
                    .entry(resource.namespace())
                    .or_default()
                    .push(resource);
            }
        }

        // Namespace groups are opened first and keep the plain namespace
        // name when an individual resource shares it.
        for (namespace, resources) in by_namespace {
            let name = state.open(namespace, "namespace", GroupingStrategy::Namespace, namespace);
            for resource in resources {
                state.join(&name, resource);
            }
        }
        for resource in individuals {
            let qualifier = resource.kind().to_lowercase();
            let name = state.open(resource.name(), &qualifier, GroupingStrategy::Individual, "");
            state.join(&name, resource);
        }
    }

    /// First non-empty identity label, in priority order
    fn identity_label<'a>(&self, resource: &'a ProcessedResource) -> Option<&'a str> {
        self.config
            .label_priority
            .iter()
            .filter_map(|key| resource.label(key))
            .find(|value| !value.is_empty())
    }

    /// First workload in the component, else the first member
    fn lead_member<'a>(&self, members: &[&'a ProcessedResource]) -> Option<&'a ProcessedResource> {
        members
            .iter()
            .find(|r| self.config.is_workload(r.kind()))
            .or_else(|| members.first())
            .copied()
    }
}

/// Groups under construction plus the reverse index from key to group
#[derive(Default)]
struct GroupingState {
    groups: BTreeMap<String, ServiceGroup>,
    owners: HashMap<ResourceKey, String>,
}

impl GroupingState {
    fn is_claimed(&self, key: &ResourceKey) -> bool {
        self.owners.contains_key(key)
    }

    fn owner(&self, key: &ResourceKey) -> Option<&str> {
        self.owners.get(key).map(String::as_str)
    }

    /// Create an empty group and return the name it was given
    fn open(
        &mut self,
        base: &str,
        qualifier: &str,
        strategy: GroupingStrategy,
        namespace: &str,
    ) -> String {
        let name = self.unique_name(base, qualifier);
        if name != base {
            debug!("group name '{}' is taken, using '{}'", base, name);
        }
        self.groups
            .insert(name.clone(), ServiceGroup::new(name.as_str(), namespace, strategy));
        name
    }

    fn unique_name(&self, base: &str, qualifier: &str) -> String {
        if !self.groups.contains_key(base) {
            return base.to_string();
        }
        let qualified = format!("{}-{}", base, qualifier);
        if !self.groups.contains_key(&qualified) {
            return qualified;
        }
        (2..)
            .map(|n| format!("{}-{}", qualified, n))
            .find(|candidate| !self.groups.contains_key(candidate))
            .unwrap_or(qualified)
    }

    /// Add a resource to an existing group
    ///
    /// Claimed resources are left untouched.
    fn join(&mut self, name: &str, resource: &ProcessedResource) {
        if self.is_claimed(&resource.key) {
            return;
        }
        if let Some(group) = self.groups.get_mut(name) {
            group.resources.push(resource.clone());
            self.owners.insert(resource.key.clone(), name.to_string());
        }
    }

    fn into_groups(self) -> Vec<ServiceGroup> {
        self.groups.into_values().collect()
    }
}

fn validate(graph: &ResourceGraph) -> Result<()> {
    for (stored, resource) in &graph.resources {
        if *stored != resource.key {
            return Err(AnalyzeError::KeyMismatch {
                stored: stored.clone(),
                actual: resource.key.clone(),
            });
        }
    }
    Ok(())
}

/// Undirected adjacency over all edges whose endpoints are both known
fn build_adjacency(graph: &ResourceGraph) -> BTreeMap<&ResourceKey, BTreeSet<&ResourceKey>> {
    let mut adjacency: BTreeMap<&ResourceKey, BTreeSet<&ResourceKey>> = BTreeMap::new();

    for edge in &graph.relationships {
        if !graph.contains(&edge.from) || !graph.contains(&edge.to) {
            warn!("ignoring relationship {} -> {}: unknown endpoint", edge.from, edge.to);
            continue;
        }
        adjacency.entry(&edge.from).or_default().insert(&edge.to);
        adjacency.entry(&edge.to).or_default().insert(&edge.from);
    }

    adjacency
}

/// Breadth-first traversal from `start`, in visit order
fn connected_component<'a>(
    start: &'a ResourceKey,
    adjacency: &BTreeMap<&'a ResourceKey, BTreeSet<&'a ResourceKey>>,
) -> Vec<&'a ResourceKey> {
    let mut visited: HashSet<&ResourceKey> = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    let mut component = Vec::new();

    while let Some(key) = queue.pop_front() {
        component.push(key);
        for &neighbor in adjacency.get(key).into_iter().flatten() {
            if visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    component
}

#[cfg(test)]
mod tests {
    use super::*;
    use packsmith_core::RelationshipKind;
    use serde_json::json;

    fn resource(kind: &str, namespace: &str, name: &str, labels: &[(&str, &str)]) -> ProcessedResource {
        let labels: serde_json::Map<String, serde_json::Value> = labels
            .iter()
            .map(|(k, v)| (k.to_string(), json!(v)))
            .collect();
        ProcessedResource::new(
            ResourceKey::new(kind, namespace, name),
            json!({
                "kind": kind,
                "metadata": {"name": name, "namespace": namespace, "labels": labels}
            }),
        )
    }

    fn key(kind: &str, namespace: &str, name: &str) -> ResourceKey {
        ResourceKey::new(kind, namespace, name)
    }

    fn graph(resources: Vec<ProcessedResource>, edges: &[(ResourceKey, ResourceKey)]) -> ResourceGraph {
        let mut graph = ResourceGraph::new();
        for resource in resources {
            graph.insert(resource);
        }
        for (from, to) in edges {
            graph.relate(from.clone(), to.clone(), RelationshipKind::Unspecified);
        }
        graph
    }

    fn find<'a>(groups: &'a [ServiceGroup], name: &str) -> &'a ServiceGroup {
        groups
            .iter()
            .find(|g| g.name == name)
            .unwrap_or_else(|| panic!("group '{}' not found", name))
    }

    fn assert_partition(graph: &ResourceGraph, groups: &[ServiceGroup]) {
        let mut seen = HashSet::new();
        for group in groups {
            for key in group.keys() {
                assert!(seen.insert(key.clone()), "{} appears in two groups", key);
            }
        }
        let expected: HashSet<ResourceKey> = graph.resources.keys().cloned().collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_empty_graph() {
        let groups = group_resources(&ResourceGraph::new()).unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn test_label_priority() {
        let g = graph(
            vec![resource(
                "Deployment",
                "shop",
                "web",
                &[("app", "b"), ("app.kubernetes.io/name", "a")],
            )],
            &[],
        );

        let groups = group_resources(&g).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "a");
        assert_eq!(groups[0].strategy, GroupingStrategy::Label);
        assert_eq!(groups[0].namespace, "shop");
    }

    #[test]
    fn test_empty_label_falls_through() {
        let g = graph(
            vec![resource(
                "Deployment",
                "shop",
                "web",
                &[("app.kubernetes.io/name", ""), ("app.kubernetes.io/instance", "web-prod")],
            )],
            &[],
        );

        let groups = group_resources(&g).unwrap();
        assert_eq!(groups[0].name, "web-prod");
    }

    #[test]
    fn test_shared_label_forms_one_group() {
        let g = graph(
            vec![
                resource("Deployment", "shop", "api", &[("app", "api")]),
                resource("Service", "shop", "api", &[("app", "api")]),
                resource("ConfigMap", "shop", "api-config", &[("name", "api")]),
            ],
            &[],
        );

        let groups = group_resources(&g).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 3);
        // Members follow sorted key order
        let kinds: Vec<&str> = groups[0].resources.iter().map(|r| r.kind()).collect();
        assert_eq!(kinds, vec!["ConfigMap", "Deployment", "Service"]);
    }

    #[test]
    fn test_relationship_merges_into_label_group() {
        let deployment = key("Deployment", "shop", "api");
        let config = key("ConfigMap", "shop", "api-config");
        let secret = key("Secret", "shop", "api-secret");

        let g = graph(
            vec![
                resource("Deployment", "shop", "api", &[("app", "api")]),
                resource("ConfigMap", "shop", "api-config", &[]),
                resource("Secret", "shop", "api-secret", &[]),
            ],
            // secret -> config -> labeled deployment
            &[(config.clone(), deployment.clone()), (secret.clone(), config.clone())],
        );

        let groups = group_resources(&g).unwrap();
        assert_eq!(groups.len(), 1);

        let api = find(&groups, "api");
        assert_eq!(api.strategy, GroupingStrategy::Label);
        assert!(api.contains(&config));
        assert!(api.contains(&secret));
        assert_partition(&g, &groups);
    }

    #[test]
    fn test_relationship_group_named_after_workload() {
        let svc = key("Service", "shop", "frontend-svc");
        let deploy = key("Deployment", "shop", "frontend");
        let cm = key("ConfigMap", "shop", "frontend-config");

        let g = graph(
            vec![
                resource("Service", "shop", "frontend-svc", &[]),
                resource("Deployment", "shop", "frontend", &[]),
                resource("ConfigMap", "shop", "frontend-config", &[]),
            ],
            &[(svc.clone(), deploy.clone()), (deploy.clone(), cm.clone())],
        );

        let groups = group_resources(&g).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "frontend");
        assert_eq!(groups[0].strategy, GroupingStrategy::Relationship);
        assert_eq!(groups[0].namespace, "shop");
        // BFS from the smallest key: ConfigMap, then its neighbour, then the Service
        let members: Vec<&ResourceKey> = groups[0].keys().collect();
        assert_eq!(members, vec![&cm, &deploy, &svc]);
    }

    #[test]
    fn test_relationship_group_without_workload_uses_first_member() {
        let ingress = key("Ingress", "web", "public");
        let svc = key("Service", "web", "gateway");

        let g = graph(
            vec![
                resource("Ingress", "web", "public", &[]),
                resource("Service", "web", "gateway", &[]),
            ],
            &[(ingress.clone(), svc.clone())],
        );

        let groups = group_resources(&g).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "public");
        assert_eq!(groups[0].strategy, GroupingStrategy::Relationship);
    }

    #[test]
    fn test_statefulset_and_daemonset_name_groups() {
        let sts = key("StatefulSet", "data", "postgres");
        let pvc = key("PersistentVolumeClaim", "data", "pg-data");
        let ds = key("DaemonSet", "ops", "node-agent");
        let sa = key("ServiceAccount", "ops", "agent");

        let g = graph(
            vec![
                resource("StatefulSet", "data", "postgres", &[]),
                resource("PersistentVolumeClaim", "data", "pg-data", &[]),
                resource("DaemonSet", "ops", "node-agent", &[]),
                resource("ServiceAccount", "ops", "agent", &[]),
            ],
            &[(sts, pvc), (ds, sa)],
        );

        let groups = group_resources(&g).unwrap();
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["node-agent", "postgres"]);
    }

    #[test]
    fn test_namespace_fallback() {
        let g = graph(
            vec![
                resource("ConfigMap", "ns1", "a", &[]),
                resource("Secret", "ns1", "b", &[]),
                resource("ConfigMap", "ns2", "c", &[]),
            ],
            &[],
        );

        let groups = group_resources(&g).unwrap();
        assert_eq!(groups.len(), 2);

        let ns1 = find(&groups, "ns1");
        assert_eq!(ns1.strategy, GroupingStrategy::Namespace);
        assert_eq!(ns1.namespace, "ns1");
        assert_eq!(ns1.len(), 2);
        assert_eq!(find(&groups, "ns2").len(), 1);
    }

    #[test]
    fn test_empty_namespace_is_individual() {
        let g = graph(
            vec![
                resource("ClusterRole", "", "reader", &[]),
                resource("ClusterRoleBinding", "", "reader-binding", &[]),
            ],
            &[],
        );

        let groups = group_resources(&g).unwrap();
        assert_eq!(groups.len(), 2);
        for group in &groups {
            assert_eq!(group.strategy, GroupingStrategy::Individual);
            assert_eq!(group.len(), 1);
            assert_eq!(group.name, group.resources[0].name());
        }
    }

    #[test]
    fn test_dangling_edges_are_ignored() {
        let known = key("ConfigMap", "ns1", "a");
        let unknown = key("Secret", "ns1", "gone");

        let g = graph(
            vec![resource("ConfigMap", "ns1", "a", &[])],
            &[(known.clone(), unknown)],
        );

        let groups = group_resources(&g).unwrap();
        assert_eq!(groups.len(), 1);
        // Falls through to namespace grouping instead of forming a component
        assert_eq!(groups[0].name, "ns1");
        assert_eq!(groups[0].strategy, GroupingStrategy::Namespace);
    }

    #[test]
    fn test_namespace_group_name_collision_gets_suffix() {
        // Namespace "web" derives the name of the existing label group "web"
        let g = graph(
            vec![
                resource("Deployment", "shop", "frontend", &[("app", "web")]),
                resource("ConfigMap", "web", "leftover", &[]),
            ],
            &[],
        );

        let groups = group_resources(&g).unwrap();
        assert_partition(&g, &groups);
        assert_eq!(groups.len(), 2);

        let label = find(&groups, "web");
        assert_eq!(label.strategy, GroupingStrategy::Label);
        assert_eq!(label.namespace, "shop");
        assert_eq!(label.len(), 1);

        let namespace = find(&groups, "web-namespace");
        assert_eq!(namespace.strategy, GroupingStrategy::Namespace);
        assert_eq!(namespace.namespace, "web");
        assert_eq!(namespace.len(), 1);
    }

    #[test]
    fn test_relationship_group_in_other_namespace_stays_separate() {
        let svc = key("Service", "b", "web-svc");
        let deploy = key("Deployment", "b", "web");

        let g = graph(
            vec![
                resource("Deployment", "a", "web", &[("app", "web")]),
                resource("Deployment", "b", "web", &[]),
                resource("Service", "b", "web-svc", &[]),
            ],
            &[(svc.clone(), deploy.clone())],
        );

        let groups = group_resources(&g).unwrap();
        assert_partition(&g, &groups);
        assert_eq!(groups.len(), 2);

        let label = find(&groups, "web");
        assert_eq!(label.strategy, GroupingStrategy::Label);
        assert_eq!(label.namespace, "a");
        assert_eq!(label.len(), 1);

        let related = find(&groups, "web-b");
        assert_eq!(related.strategy, GroupingStrategy::Relationship);
        assert_eq!(related.namespace, "b");
        assert!(related.contains(&deploy));
        assert!(related.contains(&svc));
    }

    #[test]
    fn test_individuals_with_same_name_stay_separate() {
        let g = graph(
            vec![
                resource("ClusterRole", "", "reader", &[]),
                resource("ClusterRoleBinding", "", "reader", &[]),
            ],
            &[],
        );

        let groups = group_resources(&g).unwrap();
        let summary: Vec<(&str, &str)> = groups
            .iter()
            .map(|g| (g.name.as_str(), g.resources[0].kind()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("reader", "ClusterRole"),
                ("reader-clusterrolebinding", "ClusterRoleBinding"),
            ]
        );
        assert!(groups.iter().all(|g| g.strategy == GroupingStrategy::Individual));
    }

    #[test]
    fn test_unique_name_counts_up_when_qualified_name_is_taken() {
        let mut state = GroupingState::default();
        assert_eq!(state.open("web", "b", GroupingStrategy::Label, "a"), "web");
        assert_eq!(state.open("web", "b", GroupingStrategy::Relationship, "b"), "web-b");
        assert_eq!(state.open("web", "b", GroupingStrategy::Relationship, "b"), "web-b-2");
        assert_eq!(state.open("web", "b", GroupingStrategy::Relationship, "b"), "web-b-3");
        assert_eq!(state.groups.len(), 4);
    }

    #[test]
    fn test_component_touching_two_label_groups_joins_first() {
        let a = key("Deployment", "shop", "a");
        let b = key("Deployment", "shop", "b");
        let bridge = key("ConfigMap", "shop", "bridge");

        let g = graph(
            vec![
                resource("Deployment", "shop", "a", &[("app", "alpha")]),
                resource("Deployment", "shop", "b", &[("app", "beta")]),
                resource("ConfigMap", "shop", "bridge", &[]),
            ],
            &[(a, bridge.clone()), (b, bridge.clone())],
        );

        let groups = group_resources(&g).unwrap();
        assert_eq!(groups.len(), 2);
        assert!(find(&groups, "alpha").contains(&bridge));
        assert!(!find(&groups, "beta").contains(&bridge));
    }

    #[test]
    fn test_partition_mixed_graph() {
        let svc = key("Service", "shop", "cart");
        let deploy = key("Deployment", "shop", "cart");
        let cm = key("ConfigMap", "shop", "cart-config");
        let labeled = key("Deployment", "shop", "api");
        let api_secret = key("Secret", "shop", "api-secret");

        let g = graph(
            vec![
                resource("Deployment", "shop", "api", &[("app.kubernetes.io/name", "api")]),
                resource("Secret", "shop", "api-secret", &[]),
                resource("Service", "shop", "cart", &[]),
                resource("Deployment", "shop", "cart", &[]),
                resource("ConfigMap", "shop", "cart-config", &[]),
                resource("ConfigMap", "shop", "loose", &[]),
                resource("Namespace", "", "shop", &[]),
                resource("ClusterRole", "", "viewer", &[]),
            ],
            &[
                (svc, deploy.clone()),
                (deploy, cm),
                (labeled, api_secret),
            ],
        );

        let groups = group_resources(&g).unwrap();
        assert_partition(&g, &groups);

        let summary: Vec<(&str, GroupingStrategy, usize)> = groups
            .iter()
            .map(|g| (g.name.as_str(), g.strategy, g.len()))
            .collect();
        // The Namespace object "shop" derives the name of the "shop"
        // namespace group and is qualified by its kind.
        assert_eq!(
            summary,
            vec![
                ("api", GroupingStrategy::Label, 2),
                ("cart", GroupingStrategy::Relationship, 3),
                ("shop", GroupingStrategy::Namespace, 1),
                ("shop-namespace", GroupingStrategy::Individual, 1),
                ("viewer", GroupingStrategy::Individual, 1),
            ]
        );
    }

    #[test]
    fn test_deterministic_across_insertion_order() {
        let resources = vec![
            resource("Deployment", "a", "web", &[]),
            resource("Service", "a", "web", &[]),
            resource("ConfigMap", "a", "settings", &[]),
            resource("Deployment", "b", "worker", &[("app", "worker")]),
            resource("Secret", "b", "creds", &[]),
            resource("ClusterRole", "", "admin", &[]),
        ];
        let edges = vec![
            (key("Service", "a", "web"), key("Deployment", "a", "web")),
            (key("Deployment", "b", "worker"), key("Secret", "b", "creds")),
        ];

        let forward = graph(resources.clone(), &edges);
        let mut reversed_resources = resources;
        reversed_resources.reverse();
        let mut reversed_edges = edges;
        reversed_edges.reverse();
        let backward = graph(reversed_resources, &reversed_edges);

        let first = group_resources(&forward).unwrap();
        let second = group_resources(&backward).unwrap();
        let again = group_resources(&forward).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, again);
    }

    #[test]
    fn test_custom_label_priority() {
        let g = graph(
            vec![resource(
                "Deployment",
                "shop",
                "web",
                &[("app", "web"), ("team", "storefront")],
            )],
            &[],
        );

        let engine = GroupingEngine::new(GroupingConfig::new().with_label_priority(["team"]));
        let groups = engine.group(&g).unwrap();
        assert_eq!(groups[0].name, "storefront");
    }

    #[test]
    fn test_key_mismatch_is_rejected() {
        let mut g = ResourceGraph::new();
        g.resources.insert(
            key("Service", "shop", "web"),
            resource("Service", "shop", "api", &[]),
        );

        let err = group_resources(&g).unwrap_err();
        assert!(matches!(err, AnalyzeError::KeyMismatch { .. }));
        assert!(err.to_string().contains("Service/shop/api"));
    }

    #[test]
    fn test_connected_component_bfs_order() {
        let a = key("A", "", "a");
        let b = key("B", "", "b");
        let c = key("C", "", "c");
        let d = key("D", "", "d");

        let mut adjacency: BTreeMap<&ResourceKey, BTreeSet<&ResourceKey>> = BTreeMap::new();
        adjacency.entry(&a).or_default().extend([&c, &b]);
        adjacency.entry(&b).or_default().extend([&a, &d]);
        adjacency.entry(&c).or_default().insert(&a);
        adjacency.entry(&d).or_default().insert(&b);

        let component = connected_component(&a, &adjacency);
        assert_eq!(component, vec![&a, &b, &c, &d]);
    }
}
