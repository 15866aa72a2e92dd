use anyhow::bail;
use lexis_core::groups::default_groups;
use lexis_core::{DictionaryGroup, DictionaryInfo, DictionaryRef, DictionaryStore, MetadataStore};

use crate::state::AppState;

/// User groups first, then one default group per language
pub fn handle_list_groups(state: &AppState) -> anyhow::Result<Vec<DictionaryGroup>> {
    let mut groups = state.store.user_groups()?;
    groups.extend(default_groups(&state.store.list_dictionaries()?));
    Ok(groups)
}

/// Parse `Language:Dictionary`, `google-images` or `forvo` against the stored dictionaries
pub fn parse_member(raw: &str, known: &[DictionaryInfo]) -> anyhow::Result<DictionaryRef> {
    match raw.trim().to_lowercase().as_str() {
        "google-images" | "google images" => return Ok(DictionaryRef::GoogleImages),
        "forvo" => return Ok(DictionaryRef::Forvo),
        _ => {}
    }

    let Some((language, name)) = raw.split_once(':') else {
        bail!("Expected Language:Dictionary, google-images or forvo, got '{raw}'");
    };

    match known
        .iter()
        .find(|info| info.name == name.trim() && info.language == language.trim())
    {
        Some(info) => Ok(info.to_ref()),
        None => bail!("No {} dictionary named '{}'", language.trim(), name.trim()),
    }
}

pub fn handle_save_group(
    state: &AppState,
    name: &str,
    members: &[String],
) -> anyhow::Result<DictionaryGroup> {
    let known = state.store.list_dictionaries()?;
    let dictionaries = members
        .iter()
        .map(|raw| parse_member(raw, &known))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let group = DictionaryGroup::new(name, dictionaries);
    state.store.save_group(&group)?;
    tracing::info!("Saved group '{}' with {} members", name, group.dictionaries.len());
    Ok(group)
}

pub fn handle_delete_group(state: &AppState, name: &str) -> anyhow::Result<()> {
    if !state.store.delete_group(name)? {
        bail!("Group not found: {name}");
    }
    tracing::info!("Deleted group '{}'", name);
    Ok(())
}
