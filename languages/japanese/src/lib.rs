//! Built-in Japanese conjugation data

pub mod loader;

pub use loader::JapaneseConjugations;

use lexis_core::{ConjugationLibrary, LoadError};

/// Language name dictionaries are registered under
pub const LANGUAGE: &str = "Japanese";

/// Add the embedded rules to `library` as the Japanese fallback
pub fn register(library: ConjugationLibrary) -> Result<ConjugationLibrary, LoadError> {
    let rules = JapaneseConjugations::load_embedded()?;
    Ok(library.with_embedded(LANGUAGE, rules))
}
