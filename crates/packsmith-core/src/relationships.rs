//! Relationship inference between resources
//!
//! Edges are only recorded between resources that exist in the input and
//! share a namespace. Each edge points from the resource holding the
//! reference to the resource being referenced.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value as JsonValue;

use crate::manifest::{array, pod_labels, pod_spec, string_map};
use crate::resource::{ProcessedResource, Relationship, RelationshipKind, ResourceKey};

/// Infer relationships between a set of resources
///
/// The result is de-duplicated and sorted.
pub fn infer_relationships(
    resources: &BTreeMap<ResourceKey, ProcessedResource>,
) -> Vec<Relationship> {
    let mut collector = EdgeCollector {
        resources,
        edges: BTreeSet::new(),
    };

    for resource in resources.values() {
        collector.owner_references(resource);

        match resource.kind() {
            "Service" => collector.service_selector(resource),
            "Ingress" => collector.ingress_backends(resource),
            "HorizontalPodAutoscaler" => collector.scale_target(resource),
            _ => {}
        }

        if let Some(spec) = pod_spec(resource.kind(), &resource.object) {
            collector.pod_references(resource, spec);
        }
    }

    let edges: Vec<Relationship> = collector.edges.into_iter().collect();
    tracing::debug!("inferred {} relationships", edges.len());
    edges
}

struct EdgeCollector<'a> {
    resources: &'a BTreeMap<ResourceKey, ProcessedResource>,
    edges: BTreeSet<Relationship>,
}

impl EdgeCollector<'_> {
    fn link(&mut self, from: &ResourceKey, kind: &str, name: &str, relation: RelationshipKind) {
        let target = ResourceKey::new(kind, from.namespace.as_str(), name);
        if target != *from && self.resources.contains_key(&target) {
            self.edges
                .insert(Relationship::new(from.clone(), target, relation));
        }
    }

    fn owner_references(&mut self, resource: &ProcessedResource) {
        for owner in array(resource.object.pointer("/metadata/ownerReferences")) {
            if let (Some(kind), Some(name)) = (str_at(owner, "/kind"), str_at(owner, "/name")) {
                self.link(&resource.key, kind, name, RelationshipKind::Owner);
            }
        }
    }

    fn service_selector(&mut self, service: &ProcessedResource) {
        let selector = string_map(service.object.pointer("/spec/selector"));
        if selector.is_empty() {
            return;
        }

        let resources = self.resources;
        for candidate in resources.values() {
            if candidate.namespace() != service.namespace() {
                continue;
            }
            let labels = pod_labels(candidate.kind(), &candidate.object);
            if labels.is_empty() {
                continue;
            }
            let matches = selector
                .iter()
                .all(|(k, v)| labels.get(k).is_some_and(|l| l == v));
            if matches {
                self.link(
                    &service.key,
                    candidate.kind(),
                    candidate.name(),
                    RelationshipKind::Selector,
                );
            }
        }
    }

    fn ingress_backends(&mut self, ingress: &ProcessedResource) {
        let spec = ingress.object.get("spec");
        let mut backends: Vec<&JsonValue> = Vec::new();

        if let Some(spec) = spec {
            backends.extend(spec.get("defaultBackend"));
            backends.extend(spec.get("backend"));
            for rule in array(spec.get("rules")) {
                for path in array(rule.pointer("/http/paths")) {
                    backends.extend(path.get("backend"));
                }
            }
        }

        for backend in backends {
            // networking.k8s.io/v1 first, then extensions/v1beta1
            let service = str_at(backend, "/service/name").or_else(|| str_at(backend, "/serviceName"));
            if let Some(service) = service {
                self.link(&ingress.key, "Service", service, RelationshipKind::IngressBackend);
            }
        }

        for tls in array(spec.and_then(|s| s.get("tls"))) {
            if let Some(secret) = str_at(tls, "/secretName") {
                self.link(&ingress.key, "Secret", secret, RelationshipKind::ConfigRef);
            }
        }
    }

    fn scale_target(&mut self, autoscaler: &ProcessedResource) {
        let target = autoscaler.object.pointer("/spec/scaleTargetRef");
        if let Some(target) = target
            && let (Some(kind), Some(name)) = (str_at(target, "/kind"), str_at(target, "/name"))
        {
            self.link(&autoscaler.key, kind, name, RelationshipKind::ScaleTarget);
        }
    }

    fn pod_references(&mut self, workload: &ProcessedResource, spec: &JsonValue) {
        let from = &workload.key;

        let account = str_at(spec, "/serviceAccountName").or_else(|| str_at(spec, "/serviceAccount"));
        if let Some(account) = account {
            self.link(from, "ServiceAccount", account, RelationshipKind::ServiceAccount);
        }

        for secret in array(spec.get("imagePullSecrets")) {
            if let Some(name) = str_at(secret, "/name") {
                self.link(from, "Secret", name, RelationshipKind::ConfigRef);
            }
        }

        let containers = array(spec.get("containers"))
            .iter()
            .chain(array(spec.get("initContainers")));
        for container in containers {
            for source in array(container.get("envFrom")) {
                if let Some(name) = str_at(source, "/configMapRef/name") {
                    self.link(from, "ConfigMap", name, RelationshipKind::ConfigRef);
                }
                if let Some(name) = str_at(source, "/secretRef/name") {
                    self.link(from, "Secret", name, RelationshipKind::ConfigRef);
                }
            }
            for var in array(container.get("env")) {
                if let Some(name) = str_at(var, "/valueFrom/configMapKeyRef/name") {
                    self.link(from, "ConfigMap", name, RelationshipKind::ConfigRef);
                }
                if let Some(name) = str_at(var, "/valueFrom/secretKeyRef/name") {
                    self.link(from, "Secret", name, RelationshipKind::ConfigRef);
                }
            }
        }

        for volume in array(spec.get("volumes")) {
            if let Some(name) = str_at(volume, "/configMap/name") {
                self.link(from, "ConfigMap", name, RelationshipKind::ConfigRef);
            }
            if let Some(name) = str_at(volume, "/secret/secretName") {
                self.link(from, "Secret", name, RelationshipKind::ConfigRef);
            }
            if let Some(name) = str_at(volume, "/persistentVolumeClaim/claimName") {
                self.link(from, "PersistentVolumeClaim", name, RelationshipKind::VolumeClaim);
            }
            for source in array(volume.pointer("/projected/sources")) {
                if let Some(name) = str_at(source, "/configMap/name") {
                    self.link(from, "ConfigMap", name, RelationshipKind::ConfigRef);
                }
                if let Some(name) = str_at(source, "/secret/name") {
                    self.link(from, "Secret", name, RelationshipKind::ConfigRef);
                }
            }
        }
    }
}

fn str_at<'a>(value: &'a JsonValue, pointer: &str) -> Option<&'a str> {
    value
        .pointer(pointer)
        .and_then(JsonValue::as_str)
        .filter(|s| !s.is_empty())
}
