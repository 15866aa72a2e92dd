use std::sync::Arc;

use lexis_config::Config;
use lexis_core::{ConjugationLibrary, SearchEngine};
use lexis_store::SqliteStore;

pub struct AppState {
    pub config: Config,
    pub store: Arc<SqliteStore>,
    pub engine: SearchEngine<SqliteStore>,
    pub conjugations: ConjugationLibrary,
}

impl AppState {
    /// Open the configured database and prepare conjugation data
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let store = SqliteStore::open(&config.dictionary.db_path)?;
        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: SqliteStore) -> anyhow::Result<Self> {
        let store = Arc::new(store);
        let conjugations = lexis_lang_japanese::register(ConjugationLibrary::from_dir(
            config.dictionary.conjugations_dir.clone(),
        ))?;

        Ok(Self {
            engine: SearchEngine::new(Arc::clone(&store)),
            store,
            config,
            conjugations,
        })
    }
}
