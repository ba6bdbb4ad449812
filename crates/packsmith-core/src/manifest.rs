//! Manifest loading
//!
//! Turns multi-document YAML into [`ProcessedResource`]s and extracts the
//! semantic values the analysis works with:
//!
//! - `image`: first container image of a workload, as `{registry, repository, tag}`
//! - `env`: literal environment variables of all containers
//! - `commonLabels`: `metadata.labels` minus the identity labels

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use crate::error::{CoreError, Result};
use crate::image::ImageReference;
use crate::labels;
use crate::resource::ProcessedResource;
use crate::values::{Values, keys};

/// Parse a multi-document YAML stream into resources
///
/// Empty documents are skipped, `kind: List` documents are expanded, and
/// documents without `kind` or `metadata.name` are skipped with a warning.
pub fn parse_manifests(yaml: &str) -> Result<Vec<ProcessedResource>> {
    let mut resources = Vec::new();

    for (index, document) in serde_yaml::Deserializer::from_str(yaml).enumerate() {
        let value = JsonValue::deserialize(document)?;
        collect_document(value, index + 1, &mut resources)?;
    }

    Ok(resources)
}

/// Read and parse a manifest file
pub fn load_manifest_file<P: AsRef<Path>>(path: P) -> Result<Vec<ProcessedResource>> {
    let path = path.as_ref();
    let wrap = |source: CoreError| CoreError::ManifestFile {
        path: path.to_path_buf(),
        source: Box::new(source),
    };

    let content = std::fs::read_to_string(path).map_err(|e| wrap(e.into()))?;
    parse_manifests(&content).map_err(wrap)
}

fn collect_document(
    value: JsonValue,
    document: usize,
    resources: &mut Vec<ProcessedResource>,
) -> Result<()> {
    match value {
        JsonValue::Null => Ok(()),
        JsonValue::Object(_) if value.get("kind").and_then(JsonValue::as_str) == Some("List") => {
            let Some(JsonValue::Array(items)) = value.get("items") else {
                return Ok(());
            };
            for item in items {
                collect_object(item.clone(), document, resources);
            }
            Ok(())
        }
        JsonValue::Object(_) => {
            collect_object(value, document, resources);
            Ok(())
        }
        _ => Err(CoreError::InvalidManifest {
            document,
            message: "expected a mapping at the document root".to_string(),
        }),
    }
}

fn collect_object(object: JsonValue, document: usize, resources: &mut Vec<ProcessedResource>) {
    match ProcessedResource::from_object(object) {
        Some(resource) => resources.push(resource),
        None => tracing::warn!("skipping document #{}: missing kind or metadata.name", document),
    }
}

/// Extract semantic values from a manifest object
pub fn extract_values(kind: &str, object: &JsonValue) -> Values {
    let mut values = Values::new();

    if let Some(spec) = pod_spec(kind, object) {
        let containers = array(spec.get("containers"));

        if let Some(image) = containers
            .first()
            .and_then(|c| c.get("image"))
            .and_then(JsonValue::as_str)
        {
            values.insert(keys::IMAGE, ImageReference::parse(image).to_value());
        }

        let mut env = Map::new();
        for container in containers {
            for var in array(container.get("env")) {
                let name = var.get("name").and_then(JsonValue::as_str);
                if let (Some(name), Some(value)) = (name, var.get("value")) {
                    env.insert(name.to_string(), value.clone());
                }
            }
        }
        if !env.is_empty() {
            values.insert(keys::ENV, JsonValue::Object(env));
        }
    }

    let common: Map<String, JsonValue> = string_map(object.pointer("/metadata/labels"))
        .into_iter()
        .filter(|(key, _)| !labels::is_identity_label(key))
        .map(|(key, value)| (key, JsonValue::String(value)))
        .collect();
    if !common.is_empty() {
        values.insert(keys::COMMON_LABELS, JsonValue::Object(common));
    }

    values
}

/// Locate the pod spec of a workload
pub fn pod_spec<'a>(kind: &str, object: &'a JsonValue) -> Option<&'a JsonValue> {
    match kind {
        "Pod" => object.get("spec"),
        "CronJob" => object.pointer("/spec/jobTemplate/spec/template/spec"),
        "Deployment" | "StatefulSet" | "DaemonSet" | "ReplicaSet" | "ReplicationController"
        | "Job" => object.pointer("/spec/template/spec"),
        _ => None,
    }
}

/// Labels carried by the pods of a workload
pub fn pod_labels(kind: &str, object: &JsonValue) -> BTreeMap<String, String> {
    let labels = match kind {
        "Pod" => object.pointer("/metadata/labels"),
        "CronJob" => object.pointer("/spec/jobTemplate/spec/template/metadata/labels"),
        _ if pod_spec(kind, object).is_some() => object.pointer("/spec/template/metadata/labels"),
        _ => None,
    };
    string_map(labels)
}

/// Collect the string entries of a JSON object
pub fn string_map(value: Option<&JsonValue>) -> BTreeMap<String, String> {
    value
        .and_then(JsonValue::as_object)
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

pub(crate) fn array(value: Option<&JsonValue>) -> &[JsonValue] {
    value
        .and_then(JsonValue::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DEPLOYMENT: &str = r#"
apiVersion: apps/v1
kind: Deployment
metadata:
  name: api
  namespace: shop
  labels:
    app.kubernetes.io/name: api
    app.kubernetes.io/part-of: shop
spec:
  template:
    metadata:
      labels:
        app.kubernetes.io/name: api
    spec:
      containers:
        - name: api
          image: ghcr.io/acme/api:1.4.0
          env:
            - name: LOG_LEVEL
              value: info
            - name: DB_PASSWORD
              valueFrom:
                secretKeyRef:
                  name: db
                  key: password
        - name: sidecar
          image: envoyproxy/envoy:v1.30
          env:
            - name: LOG_LEVEL
              value: warn
            - name: PORT
              value: "9901"
"#;

    #[test]
    fn test_parse_multi_document() {
        let yaml = format!(
            "{}\n---\napiVersion: v1\nkind: Service\nmetadata:\n  name: api\n  namespace: shop\n",
            DEPLOYMENT
        );
        let resources = parse_manifests(&yaml).unwrap();

        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].kind(), "Deployment");
        assert_eq!(resources[1].kind(), "Service");
    }

    #[test]
    fn test_extract_image_from_first_container() {
        let resources = parse_manifests(DEPLOYMENT).unwrap();
        let image = resources[0].value(keys::IMAGE).unwrap();

        assert_eq!(image["registry"], "ghcr.io");
        assert_eq!(image["repository"], "acme/api");
        assert_eq!(image["tag"], "1.4.0");
    }

    #[test]
    fn test_extract_env_later_container_wins() {
        let resources = parse_manifests(DEPLOYMENT).unwrap();
        let env = resources[0].value(keys::ENV).unwrap();

        assert_eq!(env["LOG_LEVEL"], "warn");
        assert_eq!(env["PORT"], "9901");
        // valueFrom entries carry no literal value
        assert!(env.get("DB_PASSWORD").is_none());
    }

    #[test]
    fn test_extract_common_labels_drops_identity() {
        let resources = parse_manifests(DEPLOYMENT).unwrap();
        let common = resources[0].value(keys::COMMON_LABELS).unwrap();

        assert_eq!(common["app.kubernetes.io/part-of"], "shop");
        assert!(common.get("app.kubernetes.io/name").is_none());
    }

    #[test]
    fn test_cronjob_pod_spec() {
        let yaml = r#"
apiVersion: batch/v1
kind: CronJob
metadata:
  name: nightly
spec:
  jobTemplate:
    spec:
      template:
        metadata:
          labels:
            job: nightly
        spec:
          containers:
            - name: run
              image: busybox
"#;
        let resources = parse_manifests(yaml).unwrap();
        let image = resources[0].value(keys::IMAGE).unwrap();
        assert_eq!(image["repository"], "busybox");
        assert!(image.get("registry").is_none());
        assert_eq!(
            pod_labels("CronJob", &resources[0].object).get("job").map(String::as_str),
            Some("nightly")
        );
    }

    #[test]
    fn test_non_workload_has_no_image() {
        let resources =
            parse_manifests("kind: ConfigMap\nmetadata:\n  name: settings\ndata:\n  a: b\n")
                .unwrap();
        assert!(resources[0].values.is_empty());
        assert_eq!(resources[0].namespace(), "");
    }

    #[test]
    fn test_list_documents_are_expanded() {
        let yaml = r#"
apiVersion: v1
kind: List
items:
  - kind: ConfigMap
    metadata:
      name: one
  - kind: ConfigMap
    metadata:
      name: two
"#;
        let resources = parse_manifests(yaml).unwrap();
        let names: Vec<&str> = resources.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["one", "two"]);
    }

    #[test]
    fn test_documents_without_identity_are_skipped() {
        let yaml = "kind: ConfigMap\n---\nmetadata:\n  name: orphan\n---\nkind: Secret\nmetadata:\n  name: ok\n";
        let resources = parse_manifests(yaml).unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].name(), "ok");
    }

    #[test]
    fn test_scalar_document_is_rejected() {
        let err = parse_manifests("just a string\n").unwrap_err();
        assert!(matches!(err, CoreError::InvalidManifest { document: 1, .. }));
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        assert!(parse_manifests("kind: [unclosed\n").is_err());
    }

    #[test]
    fn test_load_manifest_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DEPLOYMENT.as_bytes()).unwrap();

        let resources = load_manifest_file(file.path()).unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].name(), "api");
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = load_manifest_file("/nonexistent/manifest.yaml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/manifest.yaml"));
    }
}
