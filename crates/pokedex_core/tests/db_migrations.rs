use pokedex_core::db::migrations::latest_version;
use pokedex_core::db::{open_db, open_db_in_memory, DbError};
use pokedex_core::repo::country_repo::SqliteCountryRepository;
use pokedex_core::RepoError;
use rusqlite::Connection;
use std::sync::Barrier;
use std::thread;

const CATALOG_TABLES: &[&str] = &[
    "categories",
    "countries",
    "owners",
    "pokemon",
    "reviewers",
    "reviews",
    "pokemon_owners",
    "pokemon_categories",
];

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    for table in CATALOG_TABLES {
        assert_table_exists(&conn, table);
    }
}

#[test]
fn open_db_enables_foreign_keys() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);

    let err = conn
        .execute(
            "INSERT INTO owners (first_name, last_name, name_key, country_id)
             VALUES ('Ash', 'Ketchum', 'ASHKETCHUM', 42);",
            [],
        )
        .unwrap_err();
    assert!(err.to_string().contains("FOREIGN KEY"));
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pokedex.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO countries (name, name_key) VALUES ('Canada', 'CANADA');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let countries: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM countries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(countries, 1);
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

#[test]
fn repositories_reject_unmigrated_connections() {
    let conn = Connection::open_in_memory().unwrap();

    let err = SqliteCountryRepository::try_new(&conn).err().unwrap();
    match err {
        RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        } => {
            assert_eq!(expected_version, latest_version());
            assert_eq!(actual_version, 0);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn repositories_reject_connections_missing_catalog_tables() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE pokemon_categories;").unwrap();

    let err = SqliteCountryRepository::try_new(&conn).err().unwrap();
    assert!(matches!(
        err,
        RepoError::MissingRequiredTable("pokemon_categories")
    ));
}

#[test]
fn concurrent_first_opens_migrate_once() {
    for _ in 0..8 {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("catalog.sqlite3");
        let barrier = Barrier::new(4);

        thread::scope(|scope| {
            let handles = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        barrier.wait();
                        open_db(&db_path).map(|conn| schema_version(&conn))
                    })
                })
                .collect::<Vec<_>>();

            for handle in handles {
                let version = handle.join().unwrap().unwrap();
                assert_eq!(version, latest_version());
            }
        });

        let conn = open_db(&db_path).unwrap();
        for table in CATALOG_TABLES {
            assert_table_exists(&conn, table);
        }
    }
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
