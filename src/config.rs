//! Configuration for certificate generation.

use crate::error::{Error, Result};

/// Environment variable holding the organization name printed in the header.
pub const ENV_ORG_NAME: &str = "BRIEFING_ORG_NAME";
/// Environment variable holding the header subtitle (usually an address).
pub const ENV_ORG_SUBTITLE: &str = "BRIEFING_ORG_SUBTITLE";
/// Environment variable enabling Flate compression of page content streams.
pub const ENV_COMPRESS: &str = "BRIEFING_COMPRESS";

const DEFAULT_ORG_NAME: &str = "FIRMA";
const DEFAULT_ORG_SUBTITLE: &str = "ADDRESSE";

/// Certificate generation configuration.
///
/// Resolved once by the caller and passed into
/// [`generate`](crate::certificate::generate); the generator never reads the
/// environment itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BriefingConfig {
    /// Organization name shown in bold inside the header box.
    pub org_name: String,

    /// Smaller line below the organization name.
    pub org_subtitle: String,

    /// Compress page content streams.
    pub compress: bool,
}

impl Default for BriefingConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl BriefingConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            org_name: DEFAULT_ORG_NAME.to_string(),
            org_subtitle: DEFAULT_ORG_SUBTITLE.to_string(),
            compress: false,
        }
    }

    /// Set the organization name.
    pub fn with_org_name(mut self, name: impl Into<String>) -> Self {
        self.org_name = name.into();
        self
    }

    /// Set the organization subtitle.
    pub fn with_org_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.org_subtitle = subtitle.into();
        self
    }

    /// Enable or disable content stream compression.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Read configuration from the process environment.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(name) = lookup(ENV_ORG_NAME) {
            config.org_name = name;
        }
        if let Some(subtitle) = lookup(ENV_ORG_SUBTITLE) {
            config.org_subtitle = subtitle;
        }
        if let Some(raw) = lookup(ENV_COMPRESS) {
            config.compress = parse_flag(ENV_COMPRESS, &raw)?;
        }

        log::debug!(
            "Resolved briefing config: org_name={:?}, compress={}",
            config.org_name,
            config.compress
        );
        Ok(config)
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => Ok(false),
        "1" | "true" | "yes" | "on" => Ok(true),
        other => Err(Error::Config(format!("{}={}", key, other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = BriefingConfig::default();
        assert_eq!(config.org_name, "FIRMA");
        assert_eq!(config.org_subtitle, "ADDRESSE");
        assert!(!config.compress);
    }

    #[test]
    fn test_builder_setters() {
        let config = BriefingConfig::new()
            .with_org_name("ACME GmbH")
            .with_org_subtitle("Hauptstr. 5, 10115 Berlin")
            .with_compress(true);
        assert_eq!(config.org_name, "ACME GmbH");
        assert_eq!(config.org_subtitle, "Hauptstr. 5, 10115 Berlin");
        assert!(config.compress);
    }

    #[test]
    fn test_lookup_overrides() {
        let config = BriefingConfig::from_lookup(lookup_from(&[
            (ENV_ORG_NAME, "Werk Nord"),
            (ENV_COMPRESS, "yes"),
        ]))
        .unwrap();
        assert_eq!(config.org_name, "Werk Nord");
        assert_eq!(config.org_subtitle, "ADDRESSE");
        assert!(config.compress);
    }

    #[test]
    fn test_lookup_empty_keeps_defaults() {
        let config = BriefingConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, BriefingConfig::default());
    }

    #[test]
    fn test_invalid_compress_flag() {
        let result = BriefingConfig::from_lookup(lookup_from(&[(ENV_COMPRESS, "maybe")]));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
