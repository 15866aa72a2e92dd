use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;

use crate::dictionary::{
    DictionaryRow, DictionarySettings, DictionaryStore, MetadataStore, TermQuery,
    validate_dictionary_name, validate_rows,
};
use crate::error::StoreError;
use crate::pattern::LIKE_ESCAPE;
use crate::types::{DictionaryGroup, DictionaryInfo, DictionaryRef, Operator};

struct MemoryDictionary {
    language: String,
    rows: Vec<DictionaryRow>,
    settings: DictionarySettings,
}

#[derive(Default)]
struct Inner {
    dictionaries: IndexMap<String, MemoryDictionary>,
    groups: IndexMap<String, DictionaryGroup>,
}

/// In-process store with the same matching and ordering rules as the SQLite backend
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor: create a dictionary and fill it
    pub fn with_dictionary(
        self,
        name: &str,
        language: &str,
        rows: Vec<DictionaryRow>,
    ) -> Result<Self, StoreError> {
        self.create_dictionary(name, language)?;
        self.insert_rows(name, &rows)?;
        Ok(self)
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DictionaryStore for MemoryStore {
    fn query(
        &self,
        dictionary: &str,
        query: &TermQuery<'_>,
    ) -> Result<Vec<DictionaryRow>, StoreError> {
        let inner = self.read();
        let dict = inner
            .dictionaries
            .get(dictionary)
            .ok_or_else(|| StoreError::UnknownDictionary(dictionary.to_string()))?;

        let mut rows: Vec<&DictionaryRow> = dict
            .rows
            .iter()
            .filter(|row| {
                let value = row.column(query.column);
                query.patterns.iter().any(|pattern| match query.operator {
                    Operator::Equals => value == pattern,
                    Operator::Like => like_match(pattern, value),
                })
            })
            .collect();

        // stable sort keeps storage order for ties
        rows.sort_by_key(|row| {
            (
                row.term.chars().count(),
                row.frequency.is_none(),
                row.frequency,
            )
        });

        Ok(rows.into_iter().take(query.limit).cloned().collect())
    }

    fn list_dictionaries(&self) -> Result<Vec<DictionaryInfo>, StoreError> {
        Ok(self
            .read()
            .dictionaries
            .iter()
            .map(|(name, dict)| DictionaryInfo::new(name, &dict.language))
            .collect())
    }

    fn settings(&self, dictionary: &str) -> Result<DictionarySettings, StoreError> {
        self.read()
            .dictionaries
            .get(dictionary)
            .map(|dict| dict.settings.clone())
            .ok_or_else(|| StoreError::UnknownDictionary(dictionary.to_string()))
    }

    fn user_groups(&self) -> Result<Vec<DictionaryGroup>, StoreError> {
        Ok(self.read().groups.values().cloned().collect())
    }
}

impl MetadataStore for MemoryStore {
    fn create_dictionary(&self, name: &str, language: &str) -> Result<(), StoreError> {
        validate_dictionary_name(name)?;
        let mut inner = self.write();
        if inner.dictionaries.contains_key(name) {
            return Err(StoreError::AlreadyExists(name.to_string()));
        }
        inner.dictionaries.insert(
            name.to_string(),
            MemoryDictionary {
                language: language.to_string(),
                rows: Vec::new(),
                settings: DictionarySettings::default(),
            },
        );
        Ok(())
    }

    fn insert_rows(&self, dictionary: &str, rows: &[DictionaryRow]) -> Result<usize, StoreError> {
        validate_rows(dictionary, rows)?;
        let mut inner = self.write();
        let dict = inner
            .dictionaries
            .get_mut(dictionary)
            .ok_or_else(|| StoreError::UnknownDictionary(dictionary.to_string()))?;
        dict.rows.extend_from_slice(rows);
        Ok(rows.len())
    }

    fn remove_dictionary(&self, dictionary: &str) -> Result<(), StoreError> {
        let mut inner = self.write();
        if inner.dictionaries.shift_remove(dictionary).is_none() {
            return Err(StoreError::UnknownDictionary(dictionary.to_string()));
        }
        for group in inner.groups.values_mut() {
            group
                .dictionaries
                .retain(|d| !matches!(d, DictionaryRef::Real { name, .. } if name == dictionary));
        }
        Ok(())
    }

    fn update_settings(
        &self,
        dictionary: &str,
        settings: &DictionarySettings,
    ) -> Result<(), StoreError> {
        let mut inner = self.write();
        let dict = inner
            .dictionaries
            .get_mut(dictionary)
            .ok_or_else(|| StoreError::UnknownDictionary(dictionary.to_string()))?;
        dict.settings = settings.clone();
        Ok(())
    }

    fn save_group(&self, group: &DictionaryGroup) -> Result<(), StoreError> {
        validate_dictionary_name(&group.name)?;
        self.write().groups.insert(group.name.clone(), group.clone());
        Ok(())
    }

    fn delete_group(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.write().groups.shift_remove(name).is_some())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LikeToken {
    Any,
    One,
    Literal(char),
}

fn tokenize_like(pattern: &str) -> Vec<LikeToken> {
    let mut tokens = Vec::new();
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        tokens.push(match c {
            '%' => LikeToken::Any,
            '_' => LikeToken::One,
            LIKE_ESCAPE => LikeToken::Literal(chars.next().unwrap_or(LIKE_ESCAPE)),
            c => LikeToken::Literal(c),
        });
    }
    tokens
}

/// SQL `LIKE` semantics: `%` any run, `_` one character, `\` escapes, ASCII case-insensitive
pub fn like_match(pattern: &str, text: &str) -> bool {
    let tokens = tokenize_like(pattern);
    let text: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        let step = match tokens.get(p) {
            Some(LikeToken::One) => true,
            Some(LikeToken::Literal(c)) => c.eq_ignore_ascii_case(&text[t]),
            _ => false,
        };

        if step {
            p += 1;
            t += 1;
        } else if tokens.get(p) == Some(&LikeToken::Any) {
            backtrack = Some((p, t));
            p += 1;
        } else if let Some((star, consumed)) = backtrack {
            p = star + 1;
            t = consumed + 1;
            backtrack = Some((star, consumed + 1));
        } else {
            return false;
        }
    }

    tokens[p..].iter().all(|token| *token == LikeToken::Any)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::types::Column;

    #[test]
    fn test_like_match() {
        assert!(like_match("cat%", "category"));
        assert!(like_match("CAT%", "cat"));
        assert!(like_match("%cat", "bobcat"));
        assert!(like_match("%_cat", "bobcat"));
        assert!(!like_match("%_cat", "cat"));
        assert!(like_match("%a%b%", "xaxxbx"));
        assert!(!like_match("%a%b%", "xbxa"));
        assert!(like_match("%「%食べ%」%", "例：「パンを食べた」"));
        assert!(!like_match("cat", "cats"));
        assert!(like_match(r"100\%%", "100% off"));
        assert!(!like_match(r"100\%%", "1000 off"));
    }

    fn store() -> MemoryStore {
        MemoryStore::new()
            .with_dictionary(
                "Animals",
                "English",
                vec![
                    DictionaryRow::new("category"),
                    DictionaryRow::new("cats").with_frequency(900),
                    DictionaryRow::new("cat").with_frequency(2_000),
                    DictionaryRow::new("catty"),
                    DictionaryRow::new("cab").with_frequency(10),
                ],
            )
            .unwrap()
    }

    #[test]
    fn test_query_orders_by_length_then_frequency() {
        let patterns = vec!["ca%".to_string()];
        let query = TermQuery::new(Column::Term, Operator::Like, &patterns, 10);
        let rows = store().query("Animals", &query).unwrap();
        let terms: Vec<&str> = rows.iter().map(|r| r.term.as_str()).collect();
        assert_eq!(terms, vec!["cab", "cat", "cats", "catty", "category"]);
    }

    #[test]
    fn test_query_limit_and_equality() {
        let patterns = vec!["cat".to_string()];
        let exact = TermQuery::new(Column::Term, Operator::Equals, &patterns, 10);
        let rows = store().query("Animals", &exact).unwrap();
        assert_eq!(rows.len(), 1);

        let like = vec!["cat%".to_string()];
        let limited = TermQuery::new(Column::Term, Operator::Like, &like, 2);
        assert_eq!(store().query("Animals", &limited).unwrap().len(), 2);
    }

    #[test]
    fn test_query_by_language_spans_dictionaries_in_order() {
        let rows = |prefix: &str| -> Vec<DictionaryRow> {
            (1..=3).map(|n| DictionaryRow::new(format!("{prefix}{n}"))).collect()
        };
        let store = MemoryStore::new()
            .with_dictionary("A", "English", rows("a"))
            .unwrap()
            .with_dictionary("B", "German", rows("b"))
            .unwrap()
            .with_dictionary("C", "English", rows("c"))
            .unwrap();

        let patterns = vec!["%".to_string()];
        let query = TermQuery::new(Column::Term, Operator::Like, &patterns, 5);
        let found = store.query_by_language("English", &query).unwrap();
        let terms: Vec<&str> = found.iter().map(|r| r.term.as_str()).collect();
        assert_eq!(terms, vec!["a1", "a2", "a3", "c1", "c2"]);

        let wide = TermQuery::new(Column::Term, Operator::Like, &patterns, 50);
        assert_eq!(store.query_by_language("German", &wide).unwrap().len(), 3);
        assert!(store.query_by_language("French", &wide).unwrap().is_empty());
    }

    #[test]
    fn test_remove_dictionary_cascades_to_groups() {
        let store = store();
        store
            .save_group(&DictionaryGroup::new(
                "Mine",
                vec![DictionaryRef::real("Animals", "English"), DictionaryRef::Forvo],
            ))
            .unwrap();
        store.remove_dictionary("Animals").unwrap();

        assert!(store.list_dictionaries().unwrap().is_empty());
        assert_eq!(store.user_groups().unwrap()[0].dictionaries, vec![DictionaryRef::Forvo]);
        assert!(matches!(
            store.settings("Animals"),
            Err(StoreError::UnknownDictionary(_))
        ));
    }

    #[test]
    fn test_empty_term_rows_rejected() {
        let store = store();
        let err = store.insert_rows("Animals", &[DictionaryRow::default()]);
        assert!(matches!(err, Err(StoreError::InvalidRow { .. })));
    }
}
