//! Built-in provider profiles embedded in the binary
//!
//! Lets users write `--provider digitalocean` instead of a file path.

use crate::config::{load_profile_from_str, ProviderProfile};
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Built-in provider profile YAML definitions
pub static BUILTIN_PROFILES: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        let mut m = HashMap::new();
        m.insert("aliyun-ecs", include_str!("../profiles/aliyun-ecs.yaml"));
        m.insert(
            "digitalocean",
            include_str!("../profiles/digitalocean.yaml"),
        );
        m
    });

/// Get a built-in profile's YAML by name
pub fn get_builtin(name: &str) -> Option<&'static str> {
    BUILTIN_PROFILES.get(name).copied()
}

/// Check if a name refers to a built-in profile
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_PROFILES.contains_key(name)
}

/// List built-in profile names, sorted
pub fn list_builtin() -> Vec<&'static str> {
    let mut names: Vec<_> = BUILTIN_PROFILES.keys().copied().collect();
    names.sort_unstable();
    names
}

/// Load a built-in profile by name
pub fn load_builtin(name: &str) -> Result<ProviderProfile> {
    let yaml = get_builtin(name)
        .ok_or_else(|| Error::config(format!("no built-in provider named '{name}'")))?;
    load_profile_from_str(yaml)
}
