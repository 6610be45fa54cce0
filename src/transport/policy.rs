//! Per-endpoint encryption policy
//!
//! The backend mixes encrypted and plaintext bodies across endpoints, so the
//! choice is configuration: a default pair of modes plus exact-path
//! overrides.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{EnvelopeError, EnvelopeResult};

use super::mode::EndpointModes;

/// Default modes plus per-path overrides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EndpointPolicy {
    #[serde(default)]
    pub default: EndpointModes,

    #[serde(default)]
    overrides: BTreeMap<String, EndpointModes>,
}

impl EndpointPolicy {
    pub fn new(default: EndpointModes) -> Self {
        Self {
            default,
            overrides: BTreeMap::new(),
        }
    }

    /// Modes for a request path, falling back to the default
    pub fn modes_for(&self, path: &str) -> EndpointModes {
        self.overrides
            .get(&normalize_path(path))
            .copied()
            .unwrap_or(self.default)
    }

    /// Set the modes for one path, returning the previous override
    pub fn set(&mut self, path: &str, modes: EndpointModes) -> EnvelopeResult<Option<EndpointModes>> {
        validate_path(path)?;
        Ok(self.overrides.insert(normalize_path(path), modes))
    }

    /// Remove the override for one path
    pub fn remove(&mut self, path: &str) -> Option<EndpointModes> {
        self.overrides.remove(&normalize_path(path))
    }

    /// Iterate overrides in path order
    pub fn overrides(&self) -> impl Iterator<Item = (&str, &EndpointModes)> {
        self.overrides.iter().map(|(path, modes)| (path.as_str(), modes))
    }

    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }
}

/// Normalize a request path for lookup
///
/// Drops the query string and fragment, adds a leading `/` and removes
/// trailing slashes.
pub fn normalize_path(path: &str) -> String {
    let path = path.trim();
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_matches('/');
    format!("/{}", trimmed)
}

fn validate_path(path: &str) -> EnvelopeResult<()> {
    if path.trim().is_empty() {
        return Err(EnvelopeError::Validation("Endpoint path cannot be empty".into()));
    }
    if path.trim().chars().any(char::is_whitespace) {
        return Err(EnvelopeError::Validation(format!(
            "Endpoint path '{}' contains whitespace",
            path.trim()
        )));
    }
    Ok(())
}
