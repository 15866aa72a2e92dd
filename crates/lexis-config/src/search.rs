use std::time::Duration;

use lexis_core::SearchType;
use lexis_core::types::{ALL_GROUP, DEFAULT_GLOBAL_LIMIT, DEFAULT_PER_DICTIONARY_LIMIT};
use serde::{Deserialize, Serialize};

use crate::parse_var;

fn default_per_dictionary_limit() -> usize {
    DEFAULT_PER_DICTIONARY_LIMIT
}

fn default_global_limit() -> usize {
    DEFAULT_GLOBAL_LIMIT
}

fn default_deinflect() -> bool {
    true
}

fn default_group() -> String {
    ALL_GROUP.to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

/// Defaults applied to searches that don't override them
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    #[serde(default = "default_per_dictionary_limit")]
    pub per_dictionary_limit: usize,
    #[serde(default = "default_global_limit")]
    pub global_limit: usize,
    pub search_type: SearchType,
    #[serde(default = "default_deinflect")]
    pub deinflect: bool,
    #[serde(default = "default_group")]
    pub default_group: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            per_dictionary_limit: default_per_dictionary_limit(),
            global_limit: default_global_limit(),
            search_type: SearchType::default(),
            deinflect: default_deinflect(),
            default_group: default_group(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl SearchConfig {
    pub(crate) fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        let per_dictionary_limit = parse_var(lookup, "LEXIS_DICT_LIMIT")
            .unwrap_or_else(default_per_dictionary_limit);

        let global_limit =
            parse_var(lookup, "LEXIS_GLOBAL_LIMIT").unwrap_or_else(default_global_limit);

        let search_type = parse_var(lookup, "LEXIS_SEARCH_TYPE").unwrap_or_default();

        let deinflect = parse_var(lookup, "LEXIS_DEINFLECT").unwrap_or_else(default_deinflect);

        let default_group = lookup("LEXIS_DEFAULT_GROUP")
            .filter(|group| !group.trim().is_empty())
            .unwrap_or_else(default_group);

        let timeout_ms =
            parse_var(lookup, "LEXIS_SEARCH_TIMEOUT_MS").unwrap_or_else(default_timeout_ms); // 5 seconds

        Self {
            per_dictionary_limit,
            global_limit,
            search_type,
            deinflect,
            default_group,
            timeout_ms,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
