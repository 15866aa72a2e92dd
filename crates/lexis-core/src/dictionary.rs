use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::types::{
    ALL_GROUP, Column, DictionaryGroup, DictionaryInfo, FORVO, GOOGLE_IMAGES, Operator,
};

/// Legacy frequency value meaning "not ranked"
pub const UNRANKED_SENTINEL: u32 = 999_999;

/// One entry of a dictionary table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryRow {
    pub term: String,
    pub altterm: String,
    pub pronunciation: String,
    #[serde(alias = "partOfSpeech", alias = "pos")]
    pub part_of_speech: String,
    pub definition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    /// Frequency rank, lower is more common; `None` sorts after every ranked row
    #[serde(alias = "frequencyRank", deserialize_with = "deserialize_rank")]
    pub frequency: Option<u32>,
}

impl DictionaryRow {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Default::default()
        }
    }

    pub fn with_altterm(mut self, altterm: impl Into<String>) -> Self {
        self.altterm = altterm.into();
        self
    }

    pub fn with_pronunciation(mut self, pronunciation: impl Into<String>) -> Self {
        self.pronunciation = pronunciation.into();
        self
    }

    pub fn with_part_of_speech(mut self, pos: impl Into<String>) -> Self {
        self.part_of_speech = pos.into();
        self
    }

    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = definition.into();
        self
    }

    pub fn with_frequency(mut self, rank: u32) -> Self {
        self.frequency = Self::rank_from_raw(Some(i64::from(rank)));
        self
    }

    /// Maps a stored rank to the optional model, folding the legacy sentinel into `None`
    pub fn rank_from_raw(raw: Option<i64>) -> Option<u32> {
        raw.and_then(|rank| u32::try_from(rank).ok())
            .filter(|rank| *rank < UNRANKED_SENTINEL)
    }

    /// Value of a searchable column
    pub fn column(&self, column: Column) -> &str {
        match column {
            Column::Term => &self.term,
            Column::Altterm => &self.altterm,
            Column::Pronunciation => &self.pronunciation,
            Column::Definition => &self.definition,
        }
    }
}

fn deserialize_rank<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(DictionaryRow::rank_from_raw(raw))
}

/// Parts a result header may be built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderPart {
    Term,
    Altterm,
    Pronunciation,
}

/// How exported fields are written to an existing note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExportPolicy {
    #[default]
    Add,
    Overwrite,
    IfEmpty,
}

fn default_header_parts() -> Vec<HeaderPart> {
    vec![HeaderPart::Term, HeaderPart::Altterm, HeaderPart::Pronunciation]
}

/// Per-dictionary display and export settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionarySettings {
    #[serde(default = "default_header_parts")]
    pub term_header_parts: Vec<HeaderPart>,
    /// The definition already embeds the header
    pub duplicate_header: bool,
    pub export_fields: BTreeSet<String>,
    pub export_policy: ExportPolicy,
}

impl Default for DictionarySettings {
    fn default() -> Self {
        Self {
            term_header_parts: default_header_parts(),
            duplicate_header: false,
            export_fields: BTreeSet::new(),
            export_policy: ExportPolicy::default(),
        }
    }
}

/// A single storage query against one dictionary
#[derive(Debug, Clone, Copy)]
pub struct TermQuery<'a> {
    pub column: Column,
    pub operator: Operator,
    /// Rows matching any of these patterns are returned
    pub patterns: &'a [String],
    pub limit: usize,
}

impl<'a> TermQuery<'a> {
    pub fn new(column: Column, operator: Operator, patterns: &'a [String], limit: usize) -> Self {
        Self {
            column,
            operator,
            patterns,
            limit,
        }
    }

    pub fn on(self, column: Column) -> Self {
        Self { column, ..self }
    }
}

/// Read side of dictionary storage consumed by the search engine.
///
/// `query` must order rows by term length (in characters), then frequency
/// rank with unranked rows last, then storage order, and return at most
/// `query.limit` rows.
pub trait DictionaryStore: Send + Sync {
    /// Run one query against a dictionary
    fn query(&self, dictionary: &str, query: &TermQuery<'_>)
    -> Result<Vec<DictionaryRow>, StoreError>;

    /// Every dictionary across all languages, in storage order
    fn list_dictionaries(&self) -> Result<Vec<DictionaryInfo>, StoreError>;

    fn list_languages(&self) -> Result<Vec<String>, StoreError> {
        let mut languages: Vec<String> = Vec::new();
        for info in self.list_dictionaries()? {
            if !languages.contains(&info.language) {
                languages.push(info.language);
            }
        }
        Ok(languages)
    }

    fn list_dictionaries_for_language(
        &self,
        language: &str,
    ) -> Result<Vec<DictionaryInfo>, StoreError> {
        Ok(self
            .list_dictionaries()?
            .into_iter()
            .filter(|info| info.language == language)
            .collect())
    }

    /// Query every dictionary of a language in storage order, up to `query.limit` rows total
    fn query_by_language(
        &self,
        language: &str,
        query: &TermQuery<'_>,
    ) -> Result<Vec<DictionaryRow>, StoreError> {
        let mut rows = Vec::new();
        for info in self.list_dictionaries_for_language(language)? {
            let remaining = query.limit.saturating_sub(rows.len());
            if remaining == 0 {
                break;
            }
            let bounded = TermQuery {
                limit: remaining,
                ..*query
            };
            rows.extend(self.query(&info.name, &bounded)?);
        }
        Ok(rows)
    }

    /// Display settings of a dictionary
    fn settings(&self, dictionary: &str) -> Result<DictionarySettings, StoreError>;

    /// Persisted user-defined groups
    fn user_groups(&self) -> Result<Vec<DictionaryGroup>, StoreError>;
}

/// Write side of dictionary storage, owned by settings and tooling
pub trait MetadataStore: DictionaryStore {
    fn create_dictionary(&self, name: &str, language: &str) -> Result<(), StoreError>;

    /// Append rows; rows with an empty term are rejected
    fn insert_rows(&self, dictionary: &str, rows: &[DictionaryRow]) -> Result<usize, StoreError>;

    /// Drop a dictionary, its rows, its settings and its group memberships
    fn remove_dictionary(&self, dictionary: &str) -> Result<(), StoreError>;

    fn update_settings(
        &self,
        dictionary: &str,
        settings: &DictionarySettings,
    ) -> Result<(), StoreError>;

    fn save_group(&self, group: &DictionaryGroup) -> Result<(), StoreError>;

    /// Returns whether a group was deleted
    fn delete_group(&self, name: &str) -> Result<bool, StoreError>;
}

/// Rejects names that collide with built-in groups or pseudo-dictionaries
pub fn validate_dictionary_name(name: &str) -> Result<(), StoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed != name || [ALL_GROUP, GOOGLE_IMAGES, FORVO].contains(&name) {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Rejects rows with an empty term
pub fn validate_rows(dictionary: &str, rows: &[DictionaryRow]) -> Result<(), StoreError> {
    match rows.iter().position(|row| row.term.is_empty()) {
        Some(index) => Err(StoreError::InvalidRow {
            dictionary: dictionary.to_string(),
            reason: format!("row {index} has an empty term"),
        }),
        None => Ok(()),
    }
}
