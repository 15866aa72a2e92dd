use std::sync::Arc;

use serde_json::Value;

use crate::cli::Command;
use crate::state::AppState;

pub mod dictionaries;
pub mod groups;
pub mod search;

use dictionaries::{handle_list_dictionaries, handle_load, handle_remove};
use groups::{handle_delete_group, handle_list_groups, handle_save_group};
use search::handle_search;

/// Run one CLI command, returning what should be printed
pub async fn run(state: Arc<AppState>, command: Command) -> anyhow::Result<Value> {
    let output = match command {
        Command::Search(args) => serde_json::to_value(handle_search(state, args).await?)?,
        Command::Dictionaries => serde_json::to_value(handle_list_dictionaries(&state)?)?,
        Command::Groups => serde_json::to_value(handle_list_groups(&state)?)?,
        Command::SaveGroup { name, members } => {
            serde_json::to_value(handle_save_group(&state, &name, &members)?)?
        }
        Command::DeleteGroup { name } => {
            handle_delete_group(&state, &name)?;
            serde_json::json!({ "deleted": name })
        }
        Command::Load {
            language,
            dictionary,
            rows,
        } => {
            let inserted = handle_load(&state, &language, &dictionary, &rows)?;
            serde_json::json!({ "dictionary": dictionary, "rows": inserted })
        }
        Command::Remove { dictionary } => {
            handle_remove(&state, &dictionary)?;
            serde_json::json!({ "removed": dictionary })
        }
    };

    Ok(output)
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
