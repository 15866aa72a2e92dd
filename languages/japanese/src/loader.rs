use std::path::Path;

use lexis_core::{ConjugationRuleSet, LoadError};

pub struct JapaneseConjugations;

impl JapaneseConjugations {
    /// Load embedded rule data
    pub fn load_embedded() -> Result<ConjugationRuleSet, LoadError> {
        let json = include_str!("../data/conjugations.json");
        tracing::debug!("Loading embedded Japanese conjugation rules...");
        let rules = ConjugationRuleSet::from_json(json)?;
        tracing::debug!("Loaded {} conjugation rules", rules.len());
        Ok(rules)
    }

    /// Load rules from file path, replacing the embedded set
    pub fn load_from_file(path: &Path) -> Result<ConjugationRuleSet, LoadError> {
        ConjugationRuleSet::load_from_file(path)
    }
}
