use lexis_core::{Operator, TermQuery};
use rusqlite::Connection;

/// Applied in order; index + 1 is the schema version
const MIGRATIONS: &[&str] = &[r#"
    CREATE TABLE dictionaries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        language TEXT NOT NULL,
        settings TEXT NOT NULL
    );
    CREATE INDEX dictionaries_language ON dictionaries (language);
    CREATE TABLE dictionary_groups (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        body TEXT NOT NULL
    );
"#];

pub(crate) fn migrate(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS _migrations (version INTEGER PRIMARY KEY)")?;

    let current: i64 =
        conn.query_row("SELECT COALESCE(MAX(version), 0) FROM _migrations", [], |row| row.get(0))?;

    for (index, sql) in MIGRATIONS.iter().enumerate() {
        let version = index as i64 + 1;
        if version <= current {
            continue;
        }
        tracing::info!(version, "Applying store migration");
        conn.execute_batch(sql)?;
        conn.execute("INSERT INTO _migrations (version) VALUES (?1)", [version])?;
    }

    Ok(())
}

/// Backing table of a dictionary. Ids are generated, so user names never reach SQL text.
pub(crate) fn table_name(id: i64) -> String {
    format!("dict_{id}")
}

pub(crate) fn create_rows_table(conn: &Connection, table: &str) -> rusqlite::Result<()> {
    conn.execute_batch(&format!(
        r#"
        CREATE TABLE {table} (
            term TEXT NOT NULL,
            altterm TEXT NOT NULL DEFAULT '',
            pronunciation TEXT NOT NULL DEFAULT '',
            pos TEXT NOT NULL DEFAULT '',
            definition TEXT NOT NULL DEFAULT '',
            examples TEXT,
            audio TEXT,
            frequency INTEGER
        );
        CREATE INDEX {table}_term ON {table} (term);
        CREATE INDEX {table}_altterm ON {table} (altterm);
        CREATE INDEX {table}_pronunciation ON {table} (pronunciation);
        "#
    ))
}

pub(crate) const ROW_COLUMNS: &str =
    "term, altterm, pronunciation, pos, definition, examples, audio, frequency";

/// One `?` per pattern, followed by `?` for the limit
pub(crate) fn select_rows(table: &str, query: &TermQuery<'_>) -> String {
    let column = query.column.as_str();
    let predicate = match query.operator {
        Operator::Equals => format!("{column} = ?"),
        Operator::Like => format!("{column} LIKE ? ESCAPE '\\'"),
    };
    let filter = vec![predicate; query.patterns.len()].join(" OR ");

    format!(
        "SELECT {ROW_COLUMNS} FROM {table} WHERE {filter} \
         ORDER BY length(term), frequency IS NULL, frequency, rowid LIMIT ?"
    )
}

#[cfg(test)]
mod tests {
    use lexis_core::Column;

    use super::*;

    #[test]
    fn test_select_rows_sql() {
        let patterns = vec!["a%".to_string(), "b%".to_string()];
        let query = TermQuery::new(Column::Altterm, Operator::Like, &patterns, 5);
        assert_eq!(
            select_rows("dict_3", &query),
            "SELECT term, altterm, pronunciation, pos, definition, examples, audio, frequency \
             FROM dict_3 WHERE altterm LIKE ? ESCAPE '\\' OR altterm LIKE ? ESCAPE '\\' \
             ORDER BY length(term), frequency IS NULL, frequency, rowid LIMIT ?"
        );
    }

    #[test]
    fn test_migrate_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        migrate(&conn).unwrap();
        let versions: i64 = conn
            .query_row("SELECT COUNT(*) FROM _migrations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(versions, MIGRATIONS.len() as i64);
    }
}
