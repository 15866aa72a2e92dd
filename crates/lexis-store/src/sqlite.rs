use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use lexis_core::dictionary::{validate_dictionary_name, validate_rows};
use lexis_core::{
    DictionaryGroup, DictionaryInfo, DictionaryRef, DictionaryRow, DictionarySettings,
    DictionaryStore, MetadataStore, StoreError, TermQuery,
};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};

use crate::schema::{self, ROW_COLUMNS};

fn sql_err(err: rusqlite::Error) -> StoreError {
    StoreError::backend(err)
}

fn row_from_sql(row: &Row<'_>) -> rusqlite::Result<DictionaryRow> {
    Ok(DictionaryRow {
        term: row.get(0)?,
        altterm: row.get(1)?,
        pronunciation: row.get(2)?,
        part_of_speech: row.get(3)?,
        definition: row.get(4)?,
        examples: row.get(5)?,
        audio: row.get(6)?,
        frequency: DictionaryRow::rank_from_raw(row.get(7)?),
    })
}

fn info_from_sql(row: &Row<'_>) -> rusqlite::Result<DictionaryInfo> {
    Ok(DictionaryInfo::new(
        row.get::<_, String>(0)?,
        row.get::<_, String>(1)?,
    ))
}

/// SQLite-backed dictionary store: one table per dictionary plus metadata tables.
///
/// A single connection is shared behind a mutex.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        tracing::info!("Opening dictionary store: {}", path.display());
        let conn = Connection::open(path).map_err(sql_err)?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(sql_err)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        schema::migrate(&conn).map_err(sql_err)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn table_for(conn: &Connection, dictionary: &str) -> Result<String, StoreError> {
        conn.query_row(
            "SELECT id FROM dictionaries WHERE name = ?1",
            [dictionary],
            |row| row.get::<_, i64>(0),
        )
        .optional()
        .map_err(sql_err)?
        .map(schema::table_name)
        .ok_or_else(|| StoreError::UnknownDictionary(dictionary.to_string()))
    }

    fn read_groups(conn: &Connection) -> Result<Vec<DictionaryGroup>, StoreError> {
        let mut stmt = conn
            .prepare_cached("SELECT body FROM dictionary_groups ORDER BY id")
            .map_err(sql_err)?;
        let bodies = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(sql_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(sql_err)?;

        bodies
            .iter()
            .map(|body| serde_json::from_str(body).map_err(StoreError::from))
            .collect()
    }

    fn write_group(conn: &Connection, group: &DictionaryGroup) -> Result<(), StoreError> {
        let body = serde_json::to_string(group)?;
        conn.execute(
            "INSERT INTO dictionary_groups (name, body) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET body = excluded.body",
            params![group.name, body],
        )
        .map_err(sql_err)?;
        Ok(())
    }
}

impl DictionaryStore for SqliteStore {
    fn query(
        &self,
        dictionary: &str,
        query: &TermQuery<'_>,
    ) -> Result<Vec<DictionaryRow>, StoreError> {
        if query.patterns.is_empty() || query.limit == 0 {
            return Ok(Vec::new());
        }

        let conn = self.conn();
        let table = Self::table_for(&conn, dictionary)?;
        let sql = schema::select_rows(&table, query);
        let limit = i64::try_from(query.limit).unwrap_or(i64::MAX);

        let values = query
            .patterns
            .iter()
            .map(|pattern| Value::Text(pattern.clone()))
            .chain(std::iter::once(Value::Integer(limit)));

        let mut stmt = conn.prepare_cached(&sql).map_err(sql_err)?;
        let rows = stmt
            .query_map(params_from_iter(values), row_from_sql)
            .map_err(sql_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(sql_err)?;

        tracing::debug!(
            dictionary,
            column = query.column.as_str(),
            rows = rows.len(),
            "Store query"
        );
        Ok(rows)
    }

    fn list_dictionaries(&self) -> Result<Vec<DictionaryInfo>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare_cached("SELECT name, language FROM dictionaries ORDER BY id")
            .map_err(sql_err)?;
        let infos = stmt
            .query_map([], info_from_sql)
            .map_err(sql_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(sql_err)?;
        Ok(infos)
    }

    fn list_dictionaries_for_language(
        &self,
        language: &str,
    ) -> Result<Vec<DictionaryInfo>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare_cached(
                "SELECT name, language FROM dictionaries WHERE language = ?1 ORDER BY id",
            )
            .map_err(sql_err)?;
        let infos = stmt
            .query_map([language], info_from_sql)
            .map_err(sql_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(sql_err)?;
        Ok(infos)
    }

    fn settings(&self, dictionary: &str) -> Result<DictionarySettings, StoreError> {
        let body: Option<String> = self
            .conn()
            .query_row(
                "SELECT settings FROM dictionaries WHERE name = ?1",
                [dictionary],
                |row| row.get(0),
            )
            .optional()
            .map_err(sql_err)?;

        match body {
            Some(body) => Ok(serde_json::from_str(&body)?),
            None => Err(StoreError::UnknownDictionary(dictionary.to_string())),
        }
    }

    fn user_groups(&self) -> Result<Vec<DictionaryGroup>, StoreError> {
        Self::read_groups(&self.conn())
    }
}

impl MetadataStore for SqliteStore {
    fn create_dictionary(&self, name: &str, language: &str) -> Result<(), StoreError> {
        validate_dictionary_name(name)?;
        let settings = serde_json::to_string(&DictionarySettings::default())?;

        let mut conn = self.conn();
        let tx = conn.transaction().map_err(sql_err)?;
        if Self::table_for(&tx, name).is_ok() {
            return Err(StoreError::AlreadyExists(name.to_string()));
        }

        tx.execute(
            "INSERT INTO dictionaries (name, language, settings) VALUES (?1, ?2, ?3)",
            params![name, language, settings],
        )
        .map_err(sql_err)?;
        let table = schema::table_name(tx.last_insert_rowid());
        schema::create_rows_table(&tx, &table).map_err(sql_err)?;
        tx.commit().map_err(sql_err)?;

        tracing::info!(dictionary = name, language, "Created dictionary");
        Ok(())
    }

    fn insert_rows(&self, dictionary: &str, rows: &[DictionaryRow]) -> Result<usize, StoreError> {
        validate_rows(dictionary, rows)?;

        let mut conn = self.conn();
        let tx = conn.transaction().map_err(sql_err)?;
        let table = Self::table_for(&tx, dictionary)?;
        {
            let mut stmt = tx
                .prepare(&format!(
                    "INSERT INTO {table} ({ROW_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
                ))
                .map_err(sql_err)?;
            for row in rows {
                stmt.execute(params![
                    row.term,
                    row.altterm,
                    row.pronunciation,
                    row.part_of_speech,
                    row.definition,
                    row.examples,
                    row.audio,
                    row.frequency,
                ])
                .map_err(sql_err)?;
            }
        }
        tx.commit().map_err(sql_err)?;

        tracing::info!(dictionary, rows = rows.len(), "Inserted dictionary rows");
        Ok(rows.len())
    }

    fn remove_dictionary(&self, dictionary: &str) -> Result<(), StoreError> {
        let mut conn = self.conn();
        let tx = conn.transaction().map_err(sql_err)?;
        let table = Self::table_for(&tx, dictionary)?;

        tx.execute_batch(&format!("DROP TABLE IF EXISTS {table}"))
            .map_err(sql_err)?;
        tx.execute("DELETE FROM dictionaries WHERE name = ?1", [dictionary])
            .map_err(sql_err)?;

        for mut group in Self::read_groups(&tx)? {
            let before = group.dictionaries.len();
            group
                .dictionaries
                .retain(|d| !matches!(d, DictionaryRef::Real { name, .. } if name == dictionary));
            if group.dictionaries.len() != before {
                Self::write_group(&tx, &group)?;
            }
        }

        tx.commit().map_err(sql_err)?;
        tracing::info!(dictionary, "Removed dictionary");
        Ok(())
    }

    fn update_settings(
        &self,
        dictionary: &str,
        settings: &DictionarySettings,
    ) -> Result<(), StoreError> {
        let body = serde_json::to_string(settings)?;
        let changed = self
            .conn()
            .execute(
                "UPDATE dictionaries SET settings = ?2 WHERE name = ?1",
                params![dictionary, body],
            )
            .map_err(sql_err)?;

        if changed == 0 {
            return Err(StoreError::UnknownDictionary(dictionary.to_string()));
        }
        Ok(())
    }

    fn save_group(&self, group: &DictionaryGroup) -> Result<(), StoreError> {
        validate_dictionary_name(&group.name)?;
        Self::write_group(&self.conn(), group)
    }

    fn delete_group(&self, name: &str) -> Result<bool, StoreError> {
        let deleted = self
            .conn()
            .execute("DELETE FROM dictionary_groups WHERE name = ?1", [name])
            .map_err(sql_err)?;
        Ok(deleted > 0)
    }
}
