use blocknote_core::db::migrations::{apply_migrations, latest_version, schema_version};
use blocknote_core::db::{open_db, open_db_in_memory, DbError};
use blocknote_core::{SlotRepository, SqliteSlotRepository};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    assert_table_exists(&conn, "storage_slots");
}

#[test]
fn reopening_database_keeps_schema_and_slot_payloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blocknote.sqlite3");

    let repo = SqliteSlotRepository::try_new(open_db(&path).unwrap()).unwrap();
    repo.write_slot("notion-notes", "[]").unwrap();
    drop(repo);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    let repo = SqliteSlotRepository::try_new(conn).unwrap();
    assert_eq!(repo.read_slot("notion-notes").unwrap().as_deref(), Some("[]"));
}

#[test]
fn applying_migrations_twice_keeps_slot_rows() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO storage_slots (slot_key, payload) VALUES ('notion-notes', '[1]');",
        [],
    )
    .unwrap();

    apply_migrations(&mut conn).unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    let payload: String = conn
        .query_row(
            "SELECT payload FROM storage_slots WHERE slot_key = 'notion-notes';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(payload, "[1]");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
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
