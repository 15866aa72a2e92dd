pub mod loaders;
mod schema;
pub mod sqlite;

pub use loaders::rows::load_rows_from_file;
pub use sqlite::SqliteStore;
