//! Settings for api-envelope
//!
//! Holds where the envelope key comes from and the per-endpoint body modes.

use serde::{Deserialize, Serialize};

use super::paths::AppPaths;
use crate::crypto::{derive_key, EnvelopeKey, KeyDerivationParams, SecureString};
use crate::envelope::EnvelopeCodec;
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::transport::{BodyCodec, EndpointPolicy};

/// Where the key was found during resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// Base64 key in the named environment variable
    Environment(String),
    /// Base64 key stored in the settings file
    Inline,
    /// Passphrase in the named environment variable, derived with Argon2id
    Passphrase(String),
}

impl std::fmt::Display for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Environment(var) => write!(f, "environment variable {}", var),
            Self::Inline => write!(f, "settings file"),
            Self::Passphrase(var) => write!(f, "passphrase from {} (Argon2id)", var),
        }
    }
}

/// Key configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeySettings {
    /// Base64 key stored inline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Environment variable holding a base64 key
    #[serde(default = "default_key_env")]
    pub key_env: String,

    /// Shared Argon2id parameters for passphrase-derived keys
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_params: Option<KeyDerivationParams>,

    /// Environment variable holding the passphrase
    #[serde(default = "default_passphrase_env")]
    pub passphrase_env: String,
}

fn default_key_env() -> String {
    "API_ENVELOPE_KEY".to_string()
}

fn default_passphrase_env() -> String {
    "API_ENVELOPE_PASSPHRASE".to_string()
}

impl Default for KeySettings {
    fn default() -> Self {
        Self {
            key: None,
            key_env: default_key_env(),
            key_params: None,
            passphrase_env: default_passphrase_env(),
        }
    }
}

impl KeySettings {
    /// Which source would supply the key, given an environment lookup
    pub fn source_with<F>(&self, lookup: F) -> Option<KeySource>
    where
        F: Fn(&str) -> Option<String>,
    {
        if lookup(&self.key_env).is_some() {
            Some(KeySource::Environment(self.key_env.clone()))
        } else if self.key.is_some() {
            Some(KeySource::Inline)
        } else if self.key_params.is_some() && lookup(&self.passphrase_env).is_some() {
            Some(KeySource::Passphrase(self.passphrase_env.clone()))
        } else {
            None
        }
    }

    /// Resolve the key: key env var, then inline key, then passphrase env var
    ///
    /// # Errors
    ///
    /// Returns an encryption error when nothing is configured or the
    /// configured key is malformed.
    pub fn resolve_with<F>(&self, lookup: F) -> EnvelopeResult<EnvelopeKey>
    where
        F: Fn(&str) -> Option<String>,
    {
        match self.source_with(&lookup) {
            Some(KeySource::Environment(var)) => {
                let encoded = SecureString::from(lookup(&var).unwrap_or_default());
                EnvelopeKey::from_base64(&encoded)
            }
            Some(KeySource::Inline) => {
                EnvelopeKey::from_base64(self.key.as_deref().unwrap_or_default())
            }
            Some(KeySource::Passphrase(var)) => {
                let passphrase = SecureString::from(lookup(&var).unwrap_or_default());
                self.derive(&passphrase)
            }
            None => Err(EnvelopeError::Encryption(format!(
                "No envelope key configured (set {} or run 'api-envelope key generate')",
                self.key_env
            ))),
        }
    }

    /// Resolve the key from the process environment
    pub fn resolve(&self) -> EnvelopeResult<EnvelopeKey> {
        self.resolve_with(|var| std::env::var(var).ok())
    }

    /// Derive the key from a passphrase using the stored parameters
    pub fn derive(&self, passphrase: &str) -> EnvelopeResult<EnvelopeKey> {
        let params = self.key_params.as_ref().ok_or_else(|| {
            EnvelopeError::Encryption("No key derivation parameters configured".to_string())
        })?;
        derive_key(passphrase, params)
    }
}

/// Settings for api-envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub key: KeySettings,

    /// Per-endpoint request/response modes
    #[serde(default)]
    pub endpoints: EndpointPolicy,
}

fn default_schema_version() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            key: KeySettings::default(),
            endpoints: EndpointPolicy::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or default settings if the file doesn't exist
    pub fn load_or_create(paths: &AppPaths) -> Result<Self, EnvelopeError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                EnvelopeError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                EnvelopeError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &AppPaths) -> Result<(), EnvelopeError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            EnvelopeError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| EnvelopeError::Io(format!("Failed to write settings file: {}", e)))?;

        tracing::debug!(path = %paths.settings_file().display(), "settings saved");
        Ok(())
    }

    /// Build a body codec from a resolved key and the endpoint policy
    pub fn body_codec(&self, key: EnvelopeKey) -> BodyCodec {
        BodyCodec::new(EnvelopeCodec::new(key), self.endpoints.clone())
    }
}
