use notekeep_core::db::migrations::latest_version;
use notekeep_core::db::{open_db, open_db_in_memory, DbError};
use notekeep_core::{LocalStore, SqliteLocalStore, StoreError, OWNERSHIP_KEY};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "local_store");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.sqlite3");

    let first = open_db(&path).unwrap();
    assert_eq!(schema_version(&first), latest_version());
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second), latest_version());
    assert_table_exists(&second, "local_store");
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }

    let store_err = SqliteLocalStore::open(&path).err().unwrap();
    assert!(matches!(
        store_err,
        StoreError::Db(DbError::UnsupportedSchemaVersion { .. })
    ));
}

#[test]
fn local_store_keys_are_unique_and_upserted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.sqlite3");

    let store = SqliteLocalStore::open(&path).unwrap();
    store.set_item(OWNERSHIP_KEY, "[1]").unwrap();
    store.set_item(OWNERSHIP_KEY, "[1,2]").unwrap();
    drop(store);

    let conn = open_db(&path).unwrap();
    let mut stmt = conn
        .prepare("SELECT key, value FROM local_store ORDER BY key;")
        .unwrap();
    let rows: Vec<(String, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(rows, vec![("noteIds".to_string(), "[1,2]".to_string())]);
    drop(stmt);

    let duplicate = conn.execute(
        "INSERT INTO local_store (key, value) VALUES ('noteIds', '[]');",
        [],
    );
    assert!(duplicate.is_err());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
