use std::path::Path;

use anyhow::Context;
use lexis_core::{DictionarySettings, DictionaryStore, MetadataStore};
use lexis_store::load_rows_from_file;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DictionaryListing {
    pub name: String,
    pub settings: DictionarySettings,
}

#[derive(Debug, Serialize)]
pub struct LanguageListing {
    pub language: String,
    pub dictionaries: Vec<DictionaryListing>,
}

pub fn handle_list_dictionaries(state: &AppState) -> anyhow::Result<Vec<LanguageListing>> {
    let mut listings = Vec::new();
    for language in state.store.list_languages()? {
        let mut dictionaries = Vec::new();
        for info in state.store.list_dictionaries_for_language(&language)? {
            let settings = state.store.settings(&info.name)?;
            dictionaries.push(DictionaryListing {
                name: info.name,
                settings,
            });
        }
        listings.push(LanguageListing {
            language,
            dictionaries,
        });
    }
    Ok(listings)
}

/// Create `dictionary` and fill it from a JSON rows file. Nothing is kept on failure.
pub fn handle_load(
    state: &AppState,
    language: &str,
    dictionary: &str,
    path: &Path,
) -> anyhow::Result<usize> {
    let rows = load_rows_from_file(path)
        .with_context(|| format!("Failed to read rows from {}", path.display()))?;

    state.store.create_dictionary(dictionary, language)?;
    match state.store.insert_rows(dictionary, &rows) {
        Ok(inserted) => {
            tracing::info!("Loaded {} rows into '{}' ({})", inserted, dictionary, language);
            Ok(inserted)
        }
        Err(e) => {
            if let Err(cleanup) = state.store.remove_dictionary(dictionary) {
                tracing::warn!("Failed to clean up '{}': {}", dictionary, cleanup);
            }
            Err(e.into())
        }
    }
}

pub fn handle_remove(state: &AppState, dictionary: &str) -> anyhow::Result<()> {
    state.store.remove_dictionary(dictionary)?;
    tracing::info!("Removed dictionary '{}'", dictionary);
    Ok(())
}
