use std::path::Path;

use lexis_core::{DictionaryRow, StoreError};

/// Read a JSON array of rows, as produced by external import tooling
pub fn load_rows_from_file(path: &Path) -> Result<Vec<DictionaryRow>, StoreError> {
    tracing::info!("Loading dictionary rows from file: {}", path.display());
    let json = std::fs::read_to_string(path).map_err(StoreError::backend)?;
    let rows: Vec<DictionaryRow> = serde_json::from_str(&json)?;
    tracing::info!("Loaded {} rows from file", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        std::fs::write(
            &path,
            r#"[
                {"term": "猫", "pronunciation": "ねこ", "definition": "cat", "frequency": 1200},
                {"term": "犬", "pos": "noun", "frequencyRank": 999999}
            ]"#,
        )
        .unwrap();

        let rows = load_rows_from_file(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].frequency, Some(1200));
        assert_eq!(rows[1].part_of_speech, "noun");
        assert_eq!(rows[1].frequency, None);
    }

    #[test]
    fn test_missing_file() {
        let err = load_rows_from_file(Path::new("/nonexistent/rows.json")).unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }
}
