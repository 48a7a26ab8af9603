//! Named configuration lookup.

use crate::config::clamav::ClamAvConfig;
use crate::core::LookupError;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Resolves named ClamAV configurations.
///
/// The client factory receives an implementation explicitly instead of
/// reaching for process-wide state. Closures of the shape
/// `Fn(&str) -> Result<ClamAvConfig, LookupError>` implement this trait.
pub trait ConfigLookup {
    /// Returns the configuration registered under `name`.
    fn clamav_config(&self, name: &str) -> Result<ClamAvConfig, LookupError>;
}

impl<F> ConfigLookup for F
where
    F: Fn(&str) -> Result<ClamAvConfig, LookupError>,
{
    fn clamav_config(&self, name: &str) -> Result<ClamAvConfig, LookupError> {
        self(name)
    }
}

/// In-memory set of named configurations.
///
/// Can be loaded from TOML:
///
/// ```toml
/// [clamav.default]
/// service_url = "http://clamav.svc:8080"
///
/// [clamav.staging]
/// service_url = "http://clamav.staging.svc:8080"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigSet {
    #[serde(default)]
    clamav: BTreeMap<String, ClamAvConfig>,
}

impl ConfigSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a set from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, LookupError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LookupError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LookupError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let set = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), count = set.len(), "Loaded clamav configurations");
        Ok(set)
    }

    /// Adds a configuration under `name`, replacing any previous entry.
    pub fn with_config(mut self, name: impl Into<String>, config: ClamAvConfig) -> Self {
        self.insert(name, config);
        self
    }

    /// Adds a configuration under `name`, returning the previous entry.
    pub fn insert(&mut self, name: impl Into<String>, config: ClamAvConfig) -> Option<ClamAvConfig> {
        self.clamav.insert(name.into(), config)
    }

    /// Returns the configured names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.clamav.keys().map(String::as_str)
    }

    /// Number of configurations.
    pub fn len(&self) -> usize {
        self.clamav.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.clamav.is_empty()
    }
}

impl ConfigLookup for ConfigSet {
    fn clamav_config(&self, name: &str) -> Result<ClamAvConfig, LookupError> {
        self.clamav
            .get(name)
            .cloned()
            .ok_or_else(|| LookupError::not_found(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
[clamav.default]
service_url = "http://clamav.svc:8080"

[clamav.staging]
service_url = "http://clamav.staging.svc:8080"
"#;

    #[test]
    fn test_from_toml_str() {
        let set = ConfigSet::from_toml_str(SAMPLE).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["default", "staging"]);
        assert_eq!(
            set.clamav_config("staging").unwrap().service_url(),
            "http://clamav.staging.svc:8080"
        );
    }

    #[test]
    fn test_missing_name() {
        let set = ConfigSet::new().with_config("default", ClamAvConfig::new("http://a"));
        let err = set.clamav_config("other").unwrap_err();
        assert!(matches!(err, LookupError::NotFound { name } if name == "other"));
    }

    #[test]
    fn test_empty_document() {
        let set = ConfigSet::from_toml_str("").unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_malformed_document() {
        let err = ConfigSet::from_toml_str("[clamav.default]\nservice_url = 42\n").unwrap_err();
        assert!(matches!(err, LookupError::Parse(_)));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let set = ConfigSet::from_path(file.path()).unwrap();
        assert_eq!(
            set.clamav_config("default").unwrap(),
            ClamAvConfig::new("http://clamav.svc:8080")
        );
    }

    #[test]
    fn test_from_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigSet::from_path(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, LookupError::Io { .. }));
    }

    #[test]
    fn test_closure_lookup() {
        let lookup =
            |name: &str| Ok::<_, LookupError>(ClamAvConfig::new(format!("http://{name}.svc")));
        assert_eq!(
            lookup.clamav_config("scanner").unwrap().service_url(),
            "http://scanner.svc"
        );
    }
}
