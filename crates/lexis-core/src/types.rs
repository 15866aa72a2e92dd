use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Name of the built-in group containing every dictionary
pub const ALL_GROUP: &str = "All";
/// Display name of the Google Images pseudo-dictionary
pub const GOOGLE_IMAGES: &str = "Google Images";
/// Display name of the Forvo pseudo-dictionary
pub const FORVO: &str = "Forvo";

/// How the search term is matched against a dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    #[default]
    Forward,
    Backward,
    Anywhere,
    Exact,
    Definition,
    Example,
    Pronunciation,
}

impl SearchType {
    pub const ALL: [SearchType; 7] = [
        SearchType::Forward,
        SearchType::Backward,
        SearchType::Anywhere,
        SearchType::Exact,
        SearchType::Definition,
        SearchType::Example,
        SearchType::Pronunciation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Forward => "forward",
            SearchType::Backward => "backward",
            SearchType::Anywhere => "anywhere",
            SearchType::Exact => "exact",
            SearchType::Definition => "definition",
            SearchType::Example => "example",
            SearchType::Pronunciation => "pronunciation",
        }
    }

    /// Column the primary query targets
    pub fn column(&self) -> Column {
        match self {
            SearchType::Definition | SearchType::Example => Column::Definition,
            SearchType::Pronunciation => Column::Pronunciation,
            _ => Column::Term,
        }
    }

    pub fn operator(&self) -> Operator {
        match self {
            SearchType::Exact => Operator::Equals,
            _ => Operator::Like,
        }
    }

    /// Whether an empty primary query falls back to altterm, then pronunciation
    pub fn cascades(&self) -> bool {
        !matches!(
            self,
            SearchType::Definition | SearchType::Example | SearchType::Pronunciation
        )
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        SearchType::ALL
            .into_iter()
            .find(|t| t.as_str() == lowered)
            .ok_or_else(|| format!("Unknown search type: {s}"))
    }
}

/// Searchable row column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Term,
    Altterm,
    Pronunciation,
    Definition,
}

impl Column {
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Term => "term",
            Column::Altterm => "altterm",
            Column::Pronunciation => "pronunciation",
            Column::Definition => "definition",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// SQL-style `LIKE` with `%`/`_` wildcards and `\` escapes, ASCII case-insensitive
    Like,
    Equals,
}

/// One entry of a dictionary group
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DictionaryRef {
    Real { name: String, language: String },
    GoogleImages,
    Forvo,
}

impl DictionaryRef {
    pub fn real(name: impl Into<String>, language: impl Into<String>) -> Self {
        DictionaryRef::Real {
            name: name.into(),
            language: language.into(),
        }
    }

    /// Display name used as the result key
    pub fn name(&self) -> &str {
        match self {
            DictionaryRef::Real { name, .. } => name,
            DictionaryRef::GoogleImages => GOOGLE_IMAGES,
            DictionaryRef::Forvo => FORVO,
        }
    }
}

/// A stored dictionary as listed by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryInfo {
    pub name: String,
    pub language: String,
}

impl DictionaryInfo {
    pub fn new(name: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language: language.into(),
        }
    }

    pub fn to_ref(&self) -> DictionaryRef {
        DictionaryRef::real(&self.name, &self.language)
    }
}

/// Ordered list of dictionaries searched together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryGroup {
    pub name: String,
    pub dictionaries: Vec<DictionaryRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
}

impl DictionaryGroup {
    pub fn new(name: impl Into<String>, dictionaries: Vec<DictionaryRef>) -> Self {
        Self {
            name: name.into(),
            dictionaries,
            font: None,
        }
    }

    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }
}

pub const DEFAULT_PER_DICTIONARY_LIMIT: usize = 50;
pub const DEFAULT_GLOBAL_LIMIT: usize = 1000;

/// Parameters of one multi-dictionary search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub term: String,
    pub group: String,
    pub search_type: SearchType,
    pub deinflect: bool,
    pub per_dictionary_limit: usize,
    pub global_limit: usize,
}

impl SearchRequest {
    pub fn new(term: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            group: group.into(),
            search_type: SearchType::default(),
            deinflect: true,
            per_dictionary_limit: DEFAULT_PER_DICTIONARY_LIMIT,
            global_limit: DEFAULT_GLOBAL_LIMIT,
        }
    }

    pub fn search_type(mut self, search_type: SearchType) -> Self {
        self.search_type = search_type;
        self
    }

    pub fn deinflect(mut self, deinflect: bool) -> Self {
        self.deinflect = deinflect;
        self
    }

    pub fn per_dictionary_limit(mut self, limit: usize) -> Self {
        self.per_dictionary_limit = limit;
        self
    }

    pub fn global_limit(mut self, limit: usize) -> Self {
        self.global_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_type_columns() {
        assert_eq!(SearchType::Forward.column(), Column::Term);
        assert_eq!(SearchType::Backward.column(), Column::Term);
        assert_eq!(SearchType::Exact.column(), Column::Term);
        assert_eq!(SearchType::Definition.column(), Column::Definition);
        assert_eq!(SearchType::Example.column(), Column::Definition);
        assert_eq!(SearchType::Pronunciation.column(), Column::Pronunciation);
    }

    #[test]
    fn test_only_exact_uses_equality() {
        for search_type in SearchType::ALL {
            let expected = if search_type == SearchType::Exact {
                Operator::Equals
            } else {
                Operator::Like
            };
            assert_eq!(search_type.operator(), expected, "{search_type}");
        }
    }

    #[test]
    fn test_search_type_parse() {
        assert_eq!("Exact".parse::<SearchType>(), Ok(SearchType::Exact));
        assert_eq!(" anywhere ".parse::<SearchType>(), Ok(SearchType::Anywhere));
        assert!("sideways".parse::<SearchType>().is_err());
    }

    #[test]
    fn test_dictionary_ref_serde() {
        let group = DictionaryGroup::new(
            "Reading",
            vec![DictionaryRef::real("JMdict", "Japanese"), DictionaryRef::Forvo],
        );
        let json = serde_json::to_string(&group).unwrap();
        let back: DictionaryGroup = serde_json::from_str(&json).unwrap();
        assert_eq!(back, group);
        assert_eq!(back.dictionaries[1].name(), FORVO);
    }
}
