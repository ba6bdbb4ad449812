//! Global value extraction
//!
//! Finds values that several service groups agree on so a parent pack can
//! declare them once under `global`:
//!
//! | Key             | Source value   | Promoted when                  |
//! |-----------------|----------------|--------------------------------|
//! | `imageRegistry` | `image`        | every group uses the registry  |
//! | `env`           | `env`          | at least two groups agree      |
//! | `labels`        | `commonLabels` | at least two groups agree      |
//!
//! Registries are all-or-nothing because a registry override applies to
//! every subpack; environment variables and labels only need two groups.
//!
//! When one variable name qualifies with two different values, the pair met
//! first wins. Pairs are met in group order, then in variable name order,
//! so the choice is stable but arbitrary.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use packsmith_core::values::keys;
use packsmith_core::{ImageReference, Values};
use serde_json::{Map, Value as JsonValue};
use tracing::debug;

use crate::group::ServiceGroup;

/// Promoted image registry
pub const IMAGE_REGISTRY: &str = "imageRegistry";
/// Promoted environment variables
pub const ENV: &str = "env";
/// Promoted common labels
pub const LABELS: &str = "labels";

/// Groups that must agree on an env var or label before it is promoted
const MIN_SHARED_GROUPS: usize = 2;

/// Extract values shared across groups
///
/// Returns an empty object for fewer than two groups. Keys are only present
/// when something was promoted under them.
pub fn extract_global_values(groups: &[ServiceGroup]) -> Values {
    let mut global = Values::new();
    if groups.len() < MIN_SHARED_GROUPS {
        return global;
    }

    if let Some(registry) = extract_image_registry(groups) {
        debug!("promoting image registry '{}'", registry);
        global.insert(IMAGE_REGISTRY, JsonValue::String(registry));
    }

    let env = extract_shared_entries(groups, keys::ENV);
    if !env.is_empty() {
        global.insert(ENV, JsonValue::Object(env));
    }

    let labels = extract_shared_entries(groups, keys::COMMON_LABELS);
    if !labels.is_empty() {
        global.insert(LABELS, JsonValue::Object(labels));
    }

    global
}

/// Registry used by every group, if there is one
///
/// Each group contributes the registry of its first member whose `image`
/// names one.
pub fn extract_image_registry(groups: &[ServiceGroup]) -> Option<String> {
    if groups.is_empty() {
        return None;
    }

    let mut tally: IndexMap<String, usize> = IndexMap::new();
    for group in groups {
        let registry = group
            .resources
            .iter()
            .find_map(|r| r.value(keys::IMAGE).and_then(image_registry));
        if let Some(registry) = registry {
            *tally.entry(registry).or_default() += 1;
        }
    }

    tally
        .into_iter()
        .find(|(_, count)| *count == groups.len())
        .map(|(registry, _)| registry)
}

/// Entries of the `key` mapping shared by at least two groups
///
/// Within a group the mappings of all members are merged, later members
/// overriding earlier ones.
pub fn extract_shared_entries(groups: &[ServiceGroup], key: &str) -> Map<String, JsonValue> {
    // (name, serialized value) -> (value, groups)
    let mut tally: IndexMap<(String, String), (JsonValue, usize)> = IndexMap::new();

    for group in groups {
        for (name, value) in group_snapshot(group, key) {
            let fingerprint = value.to_string();
            let slot = tally.entry((name, fingerprint)).or_insert_with(|| (value, 0));
            slot.1 += 1;
        }
    }

    let mut shared = Map::new();
    for ((name, _), (value, count)) in tally {
        if count >= MIN_SHARED_GROUPS && !shared.contains_key(&name) {
            debug!("promoting {} '{}' shared by {} groups", key, name, count);
            shared.insert(name, value);
        }
    }
    shared
}

/// Merge the `key` mappings of every member of a group
fn group_snapshot(group: &ServiceGroup, key: &str) -> BTreeMap<String, JsonValue> {
    let mut snapshot = BTreeMap::new();

    for resource in &group.resources {
        match resource.value(key) {
            Some(JsonValue::Object(entries)) => {
                for (name, value) in entries {
                    snapshot.insert(name.clone(), value.clone());
                }
            }
            Some(JsonValue::Array(entries)) => {
                for entry in entries {
                    let name = entry.get("name").and_then(JsonValue::as_str);
                    if let (Some(name), Some(value)) = (name, entry.get("value")) {
                        snapshot.insert(name.to_string(), value.clone());
                    }
                }
            }
            _ => {}
        }
    }

    snapshot
}

fn image_registry(image: &JsonValue) -> Option<String> {
    match image {
        JsonValue::Object(fields) => fields
            .get("registry")
            .and_then(JsonValue::as_str)
            .filter(|r| !r.is_empty())
            .map(str::to_string),
        JsonValue::String(reference) => ImageReference::parse(reference).registry,
        _ => None,
    }
}
