pub mod deconjugation;
pub mod dictionary;
pub mod error;
pub mod format;
pub mod groups;
pub mod language;
pub mod lookup;
pub mod memory;
pub mod pattern;
pub mod preprocess;
pub mod result;
pub mod types;

pub use deconjugation::deconjugate;
pub use dictionary::{
    DictionaryRow, DictionarySettings, DictionaryStore, ExportPolicy, HeaderPart, MetadataStore,
    TermQuery,
};
pub use error::{LoadError, SearchError, StoreError};
pub use format::ResultFormatter;
pub use language::{ConjugationLibrary, ConjugationRule, ConjugationRuleSet};
pub use lookup::SearchEngine;
pub use memory::MemoryStore;
pub use pattern::apply_pattern;
pub use preprocess::{Preprocessor, TermNormalizer};
pub use result::{SearchEntry, SearchResult};
pub use types::{
    Column, DictionaryGroup, DictionaryInfo, DictionaryRef, Operator, SearchRequest, SearchType,
};
