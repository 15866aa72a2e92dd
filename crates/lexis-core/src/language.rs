use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// One suffix rewrite: `inflected` → each of `dict`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConjugationRule {
    pub inflected: String,
    pub dict: Vec<String>,
    /// When a rewritten candidate starts with this prefix, the stripped form is emitted too
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl ConjugationRule {
    pub fn new(inflected: impl Into<String>, dict: &[&str]) -> Self {
        Self {
            inflected: inflected.into(),
            dict: dict.iter().map(|form| form.to_string()).collect(),
            prefix: None,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}

/// Ordered rules of one language
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConjugationRuleSet {
    rules: Vec<ConjugationRule>,
}

impl ConjugationRuleSet {
    pub fn new(rules: Vec<ConjugationRule>) -> Self {
        Self { rules }
    }

    /// Parse a JSON list of `{inflected, dict, prefix?}` objects
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let set: Self = serde_json::from_str(json)?;
        if let Some(rule) = set.rules.iter().find(|rule| rule.inflected.is_empty()) {
            return Err(LoadError::InvalidFormat(format!(
                "rule with forms {:?} has an empty inflected suffix",
                rule.dict
            )));
        }
        Ok(set)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, LoadError> {
        tracing::info!("Loading conjugation rules from file: {}", path.display());
        let json = std::fs::read_to_string(path)?;
        let set = Self::from_json(&json)?;
        tracing::info!("Loaded {} conjugation rules", set.len());
        Ok(set)
    }

    pub fn rules(&self) -> &[ConjugationRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Per-language rule sets, loaded once and cached.
///
/// Lookup order: `<dir>/<language>.json`, then a rule set registered with
/// [`ConjugationLibrary::with_embedded`]. A language with neither is
/// searched without deconjugation.
#[derive(Debug, Default)]
pub struct ConjugationLibrary {
    dir: Option<PathBuf>,
    embedded: HashMap<String, Arc<ConjugationRuleSet>>,
    cache: RwLock<HashMap<String, Option<Arc<ConjugationRuleSet>>>>,
}

impl ConjugationLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
            ..Self::default()
        }
    }

    pub fn with_embedded(mut self, language: impl Into<String>, rules: ConjugationRuleSet) -> Self {
        self.embedded.insert(language.into(), Arc::new(rules));
        self
    }

    /// Rules for a language, or `None` when no conjugation data is available
    pub fn rules_for(&self, language: &str) -> Option<Arc<ConjugationRuleSet>> {
        if let Some(cached) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(language)
        {
            return cached.clone();
        }

        let loaded = self.load(language);
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(language.to_string())
            .or_insert(loaded)
            .clone()
    }

    fn load(&self, language: &str) -> Option<Arc<ConjugationRuleSet>> {
        if let Some(path) = self.file_for(language) {
            if path.is_file() {
                match ConjugationRuleSet::load_from_file(&path) {
                    Ok(set) => return Some(Arc::new(set)),
                    Err(e) => {
                        tracing::warn!("Failed to load conjugation rules from {}: {}", path.display(), e)
                    }
                }
            }
        }

        let embedded = self.embedded.get(language).cloned();
        if embedded.is_none() {
            tracing::debug!(language, "No conjugation data, deconjugation disabled");
        }
        embedded
    }

    fn file_for(&self, language: &str) -> Option<PathBuf> {
        let dir = self.dir.as_ref()?;
        if language.is_empty() || language.contains(['/', '\\']) || language.contains("..") {
            return None;
        }
        Some(dir.join(format!("{language}.json")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_json_format() {
        let json = r#"[
            {"inflected": "た", "dict": ["る"]},
            {"inflected": "きになる", "dict": ["く"], "prefix": "お"}
        ]"#;
        let set = ConjugationRuleSet::from_json(json).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.rules()[0], ConjugationRule::new("た", &["る"]));
        assert_eq!(set.rules()[1].prefix.as_deref(), Some("お"));
    }

    #[test]
    fn test_empty_suffix_rejected() {
        let err = ConjugationRuleSet::from_json(r#"[{"inflected": "", "dict": ["a"]}]"#);
        assert!(matches!(err, Err(LoadError::InvalidFormat(_))));
    }

    #[test]
    fn test_file_overrides_embedded() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("Japanese.json"),
            r#"[{"inflected": "ます", "dict": ["る"]}]"#,
        )
        .unwrap();

        let embedded = ConjugationRuleSet::new(vec![ConjugationRule::new("た", &["る"])]);
        let library = ConjugationLibrary::from_dir(dir.path())
            .with_embedded("Japanese", embedded.clone())
            .with_embedded("Korean", embedded.clone());

        let japanese = library.rules_for("Japanese").unwrap();
        assert_eq!(japanese.rules()[0].inflected, "ます");
        assert_eq!(*library.rules_for("Korean").unwrap(), embedded);
        assert!(library.rules_for("English").is_none());
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("German.json"), "not json").unwrap();

        let library = ConjugationLibrary::from_dir(dir.path());
        assert!(library.rules_for("German").is_none());
    }

    #[test]
    fn test_rules_are_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Spanish.json");
        std::fs::write(&path, r#"[{"inflected": "é", "dict": ["ar"]}]"#).unwrap();

        let library = ConjugationLibrary::from_dir(dir.path());
        let first = library.rules_for("Spanish").unwrap();
        std::fs::remove_file(&path).unwrap();
        let second = library.rules_for("Spanish").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_path_like_language_is_ignored() {
        let library = ConjugationLibrary::from_dir("/tmp");
        assert!(library.rules_for("../etc/passwd").is_none());
    }
}
