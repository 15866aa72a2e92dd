use std::sync::Arc;

use anyhow::Context;
use lexis_config::search::SearchConfig;
use lexis_core::{SearchRequest, SearchResult};

use crate::cli::SearchArgs;
use crate::state::AppState;

/// Fill unset arguments from the configured defaults
pub fn build_request(config: &SearchConfig, args: SearchArgs) -> SearchRequest {
    let group = args
        .group
        .unwrap_or_else(|| config.default_group.clone());

    SearchRequest::new(args.term, group)
        .search_type(args.search_type.unwrap_or(config.search_type))
        .deinflect(config.deinflect && !args.no_deinflect)
        .per_dictionary_limit(args.dict_limit.unwrap_or(config.per_dictionary_limit))
        .global_limit(args.limit.unwrap_or(config.global_limit))
}

/// Search on the blocking pool, giving up after the configured timeout
pub async fn handle_search(state: Arc<AppState>, args: SearchArgs) -> anyhow::Result<SearchResult> {
    let request = build_request(&state.config.search, args);
    let timeout = state.config.search.timeout();
    tracing::info!(
        "Searching '{}' in group '{}' ({})",
        request.term,
        request.group,
        request.search_type
    );

    let task = tokio::task::spawn_blocking(move || {
        state.engine.search(&request, &state.conjugations)
    });

    let joined = tokio::time::timeout(timeout, task)
        .await
        .with_context(|| format!("Search timed out after {} ms", timeout.as_millis()))?;
    let result = joined.context("Search task panicked")??;

    tracing::info!(
        "Found {} entries in {} dictionaries",
        result.total_entries(),
        result.len()
    );
    Ok(result)
}
