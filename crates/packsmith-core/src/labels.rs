//! Well-known Kubernetes labels
//!
//! The identity labels are listed in the order they are trusted when
//! deciding which service a resource belongs to.

/// Recommended application name label
pub const APP_NAME: &str = "app.kubernetes.io/name";
/// Recommended application instance label
pub const APP_INSTANCE: &str = "app.kubernetes.io/instance";
/// Legacy `app` label
pub const APP: &str = "app";
/// Legacy `name` label
pub const NAME: &str = "name";

/// Identity labels, highest priority first
pub const IDENTITY: [&str; 4] = [APP_NAME, APP_INSTANCE, APP, NAME];

/// Check whether a label key carries service identity
pub fn is_identity_label(key: &str) -> bool {
    IDENTITY.contains(&key)
}
