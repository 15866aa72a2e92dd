use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_db_path() -> PathBuf {
    PathBuf::from("lexis.db")
}

fn default_conjugations_dir() -> PathBuf {
    PathBuf::from("conjugations")
}

/// Where dictionaries and per-language conjugation rules live
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    /// Holds `<Language>.json` rule files; missing files fall back to built-in rules
    #[serde(default = "default_conjugations_dir")]
    pub conjugations_dir: PathBuf,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            conjugations_dir: default_conjugations_dir(),
        }
    }
}

impl DictionaryConfig {
    pub(crate) fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        let db_path = lookup("LEXIS_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);

        let conjugations_dir = lookup("LEXIS_CONJUGATIONS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_conjugations_dir);

        Self {
            db_path,
            conjugations_dir,
        }
    }
}
