use crate::error::SearchError;
use crate::types::{
    ALL_GROUP, DictionaryGroup, DictionaryInfo, DictionaryRef, FORVO, GOOGLE_IMAGES,
};

/// One group per language holding all its dictionaries in storage order
pub fn default_groups(dictionaries: &[DictionaryInfo]) -> Vec<DictionaryGroup> {
    let mut groups: Vec<DictionaryGroup> = Vec::new();
    for info in dictionaries {
        match groups.iter_mut().find(|g| g.name == info.language) {
            Some(group) => group.dictionaries.push(info.to_ref()),
            None => groups.push(DictionaryGroup::new(&info.language, vec![info.to_ref()])),
        }
    }
    groups
}

/// Resolve a group name into the ordered dictionaries to search.
///
/// Built-in names win, then user-defined groups, then language defaults.
pub fn resolve(
    name: &str,
    user_groups: &[DictionaryGroup],
    default_groups: &[DictionaryGroup],
    all_dictionaries: &[DictionaryInfo],
) -> Result<Vec<DictionaryRef>, SearchError> {
    match name {
        ALL_GROUP => return Ok(all_dictionaries.iter().map(DictionaryInfo::to_ref).collect()),
        GOOGLE_IMAGES => return Ok(vec![DictionaryRef::GoogleImages]),
        FORVO => return Ok(vec![DictionaryRef::Forvo]),
        _ => {}
    }

    user_groups
        .iter()
        .chain(default_groups)
        .find(|group| group.name == name)
        .map(|group| group.dictionaries.clone())
        .ok_or_else(|| SearchError::GroupNotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn stored() -> Vec<DictionaryInfo> {
        vec![
            DictionaryInfo::new("JMdict", "Japanese"),
            DictionaryInfo::new("Wiktionary", "German"),
            DictionaryInfo::new("Daijirin", "Japanese"),
        ]
    }

    #[test]
    fn test_default_groups_per_language() {
        let groups = default_groups(&stored());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "Japanese");
        assert_eq!(
            groups[0].dictionaries,
            vec![
                DictionaryRef::real("JMdict", "Japanese"),
                DictionaryRef::real("Daijirin", "Japanese"),
            ]
        );
        assert_eq!(groups[1].name, "German");
    }

    #[test]
    fn test_all_keeps_storage_order() {
        let all = resolve(ALL_GROUP, &[], &[], &stored()).unwrap();
        let names: Vec<&str> = all.iter().map(DictionaryRef::name).collect();
        assert_eq!(names, vec!["JMdict", "Wiktionary", "Daijirin"]);
    }

    #[test]
    fn test_pseudo_groups() {
        assert_eq!(
            resolve(GOOGLE_IMAGES, &[], &[], &stored()).unwrap(),
            vec![DictionaryRef::GoogleImages]
        );
        assert_eq!(resolve(FORVO, &[], &[], &stored()).unwrap(), vec![DictionaryRef::Forvo]);
    }

    #[test]
    fn test_user_group_shadows_default() {
        let user = vec![DictionaryGroup::new(
            "Japanese",
            vec![DictionaryRef::real("Daijirin", "Japanese"), DictionaryRef::Forvo],
        )];
        let defaults = default_groups(&stored());
        let resolved = resolve("Japanese", &user, &defaults, &stored()).unwrap();
        assert_eq!(resolved, user[0].dictionaries);

        let german = resolve("German", &user, &defaults, &stored()).unwrap();
        assert_eq!(german, vec![DictionaryRef::real("Wiktionary", "German")]);
    }

    #[test]
    fn test_unknown_group() {
        let err = resolve("Stale", &[], &default_groups(&stored()), &stored()).unwrap_err();
        assert!(matches!(err, SearchError::GroupNotFound(name) if name == "Stale"));
    }
}
