//! Container image reference parsing
//!
//! Follows the Docker reference grammar closely enough to split a reference
//! into registry, repository, tag and digest. The registry is only reported
//! when it is explicit: `nginx:1.25` and `library/nginx` have none, while
//! `ghcr.io/acme/api:1.0` and `localhost:5000/api` do.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// A parsed container image reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,
    pub repository: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

impl ImageReference {
    /// Parse an image reference such as `ghcr.io/acme/api:1.2.0@sha256:...`
    pub fn parse(reference: &str) -> Self {
        let reference = reference.trim();

        let (name, digest) = match reference.split_once('@') {
            Some((name, digest)) => (name, Some(digest.to_string())),
            None => (reference, None),
        };

        // A colon after the last slash separates the tag; one before it
        // belongs to a registry port.
        let last_slash = name.rfind('/');
        let (name, tag) = match name.rfind(':') {
            Some(colon) if last_slash.is_none_or(|slash| colon > slash) => {
                (&name[..colon], Some(name[colon + 1..].to_string()))
            }
            _ => (name, None),
        };

        let (registry, repository) = match name.split_once('/') {
            Some((first, rest)) if is_registry_host(first) => {
                (Some(first.to_string()), rest.to_string())
            }
            _ => (None, name.to_string()),
        };

        Self {
            registry,
            repository,
            tag: tag.filter(|t| !t.is_empty()),
            digest: digest.filter(|d| !d.is_empty()),
        }
    }

    /// Convert to the `image` value shape: `{registry, repository, tag, digest}`
    pub fn to_value(&self) -> JsonValue {
        let mut map = Map::new();
        if let Some(registry) = &self.registry {
            map.insert("registry".to_string(), JsonValue::String(registry.clone()));
        }
        map.insert(
            "repository".to_string(),
            JsonValue::String(self.repository.clone()),
        );
        if let Some(tag) = &self.tag {
            map.insert("tag".to_string(), JsonValue::String(tag.clone()));
        }
        if let Some(digest) = &self.digest {
            map.insert("digest".to_string(), JsonValue::String(digest.clone()));
        }
        JsonValue::Object(map)
    }
}

impl std::fmt::Display for ImageReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(registry) = &self.registry {
            write!(f, "{}/", registry)?;
        }
        write!(f, "{}", self.repository)?;
        if let Some(tag) = &self.tag {
            write!(f, ":{}", tag)?;
        }
        if let Some(digest) = &self.digest {
            write!(f, "@{}", digest)?;
        }
        Ok(())
    }
}

fn is_registry_host(component: &str) -> bool {
    component == "localhost" || component.contains('.') || component.contains(':')
}
