use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use crate::deconjugation::deconjugate;
use crate::dictionary::{DictionaryRow, DictionaryStore, TermQuery};
use crate::error::{SearchError, StoreError};
use crate::format::ResultFormatter;
use crate::groups;
use crate::language::ConjugationLibrary;
use crate::pattern::apply_pattern;
use crate::preprocess::{Preprocessor, TermNormalizer};
use crate::result::SearchResult;
use crate::types::{Column, DictionaryRef, SearchRequest};

/// Columns tried, in order, when the primary term query finds nothing
const CASCADE_COLUMNS: [Column; 2] = [Column::Altterm, Column::Pronunciation];

/// Memo key for transformed patterns. `language` is `None` when not
/// deinflecting, so every dictionary shares one entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PatternKey {
    language: Option<String>,
    deinflect: bool,
}

/// Searches groups of dictionaries in priority order
pub struct SearchEngine<S: ?Sized> {
    store: Arc<S>,
    normalizer: TermNormalizer,
}

impl<S: DictionaryStore + ?Sized> SearchEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            normalizer: TermNormalizer,
        }
    }

    /// Ordered dictionaries of a group name
    pub fn resolve_group(&self, name: &str) -> Result<Vec<DictionaryRef>, SearchError> {
        let all = self.store.list_dictionaries()?;
        let user_groups = self.store.user_groups()?;
        let defaults = groups::default_groups(&all);
        groups::resolve(name, &user_groups, &defaults, &all)
    }

    /// Run one multi-dictionary search.
    ///
    /// A term that normalizes to nothing yields an empty result without
    /// touching the store. Only an unknown group is an error; a dictionary
    /// whose query fails is logged and left out of the result.
    pub fn search(
        &self,
        request: &SearchRequest,
        conjugations: &ConjugationLibrary,
    ) -> Result<SearchResult, SearchError> {
        let mut result = SearchResult::default();

        let term = self.normalizer.process(&request.term);
        if term.is_empty() {
            tracing::debug!(raw = %request.term, "Empty search term, skipping search");
            return Ok(result);
        }

        let dictionaries = self.resolve_group(&request.group)?;
        if request.global_limit == 0 {
            return Ok(result);
        }

        let seeds = self.normalizer.expand_case(&term);
        let mut memo: HashMap<PatternKey, Vec<String>> = HashMap::new();
        let mut total = 0usize;

        tracing::debug!(
            term = %term,
            group = %request.group,
            search_type = %request.search_type,
            dictionaries = dictionaries.len(),
            "Searching"
        );

        for dictionary in &dictionaries {
            let (name, language) = match dictionary {
                DictionaryRef::GoogleImages => {
                    result.google_images = true;
                    continue;
                }
                DictionaryRef::Forvo => {
                    result.forvo = true;
                    continue;
                }
                DictionaryRef::Real { name, language } => (name, language),
            };

            if result.contains(name) {
                continue;
            }

            let patterns = Self::patterns_for(&mut memo, &seeds, language, request, conjugations);

            let rows = match self.lookup_dictionary(name, patterns, request) {
                Ok(rows) => rows,
                Err(e) => {
                    tracing::warn!(dictionary = %name, "Dictionary query failed, skipping: {}", e);
                    continue;
                }
            };
            if rows.is_empty() {
                continue;
            }

            let settings = self.store.settings(name).unwrap_or_else(|e| {
                tracing::warn!(dictionary = %name, "Failed to read settings, using defaults: {}", e);
                Default::default()
            });

            let remaining = request.global_limit - total;
            let entries: Vec<_> = rows
                .iter()
                .take(request.per_dictionary_limit.min(remaining))
                .map(|row| ResultFormatter::format(row, &settings))
                .collect();

            total += entries.len();
            tracing::debug!(dictionary = %name, rows = entries.len(), total, "Dictionary matched");
            result.insert(name.clone(), entries);

            if total >= request.global_limit {
                tracing::debug!(limit = request.global_limit, "Global result limit reached");
                break;
            }
        }

        Ok(result)
    }

    /// Transformed patterns for a dictionary's language, computed once per search
    fn patterns_for<'m>(
        memo: &'m mut HashMap<PatternKey, Vec<String>>,
        seeds: &[String],
        language: &str,
        request: &SearchRequest,
        conjugations: &ConjugationLibrary,
    ) -> &'m [String] {
        let key = PatternKey {
            language: request.deinflect.then(|| language.to_string()),
            deinflect: request.deinflect,
        };

        let patterns: &'m Vec<String> = match memo.entry(key) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let rules = request
                    .deinflect
                    .then(|| conjugations.rules_for(language))
                    .flatten();
                let candidates = match rules {
                    Some(rules) => deconjugate(seeds, &rules),
                    None => seeds.to_vec(),
                };
                tracing::debug!(language, candidates = ?candidates, "Prepared search candidates");
                entry.insert(apply_pattern(&candidates, request.search_type))
            }
        };
        patterns
    }

    /// Primary query, then the altterm/pronunciation cascade when allowed
    fn lookup_dictionary(
        &self,
        name: &str,
        patterns: &[String],
        request: &SearchRequest,
    ) -> Result<Vec<DictionaryRow>, StoreError> {
        if request.per_dictionary_limit == 0 || patterns.is_empty() {
            return Ok(Vec::new());
        }

        let search_type = request.search_type;
        let query = TermQuery::new(
            search_type.column(),
            search_type.operator(),
            patterns,
            request.per_dictionary_limit,
        );

        let rows = self.store.query(name, &query)?;
        if !rows.is_empty() || !search_type.cascades() {
            return Ok(rows);
        }

        for column in CASCADE_COLUMNS {
            let rows = self.store.query(name, &query.on(column))?;
            if !rows.is_empty() {
                tracing::debug!(dictionary = %name, column = column.as_str(), "Matched on fallback column");
                return Ok(rows);
            }
        }

        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::types::SearchType;

    #[test]
    fn test_memo_shared_without_deinflection() {
        let mut memo = HashMap::new();
        let seeds = vec!["cat".to_string()];
        let library = ConjugationLibrary::new();
        let request = SearchRequest::new("cat", "All").deinflect(false);

        SearchEngine::<MemoryStore>::patterns_for(&mut memo, &seeds, "English", &request, &library);
        SearchEngine::<MemoryStore>::patterns_for(&mut memo, &seeds, "German", &request, &library);
        assert_eq!(memo.len(), 1);

        let request = request.deinflect(true).search_type(SearchType::Anywhere);
        let patterns = SearchEngine::<MemoryStore>::patterns_for(
            &mut memo, &seeds, "English", &request, &library,
        );
        assert_eq!(patterns, ["%cat%".to_string()]);
        SearchEngine::<MemoryStore>::patterns_for(&mut memo, &seeds, "German", &request, &library);
        assert_eq!(memo.len(), 3);
    }
}
