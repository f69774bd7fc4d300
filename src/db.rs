use std::collections::HashMap;
use std::path::Path;

use rusqlite::{Connection, OpenFlags, Statement};

use crate::error::{ConvertError, Result};
use crate::models::{CategoryDefinition, SourceTransaction};

// Column positions in the NaWallet tables. Rows are read positionally, so
// these must match the backup's CREATE TABLE order.
const ASSETS_ID: usize = 0;
const ASSETS_NAME: usize = 1;
const ASSETS_MIN_COLUMNS: usize = 2;

const RECORD_TYPE_ID: usize = 0;
const RECORD_TYPE_NAME: usize = 1;
const RECORD_TYPE_DIRECTION: usize = 3;
const RECORD_TYPE_MIN_COLUMNS: usize = 4;

// id, money, remark, time, create_time, record_type_id, assets_id
const RECORD_COLUMNS: usize = 7;

pub fn open_source(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    log::debug!("opened source database {}", db_path.display());
    Ok(conn)
}

fn check_min_columns(stmt: &Statement, table: &'static str, min: usize) -> Result<()> {
    let found = stmt.column_count();
    if found < min {
        return Err(ConvertError::SchemaMismatch {
            table,
            expected: format!("at least {min}"),
            found,
        });
    }
    Ok(())
}

pub fn load_accounts(conn: &Connection) -> Result<HashMap<i64, String>> {
    let mut stmt = conn.prepare("SELECT * FROM Assets")?;
    check_min_columns(&stmt, "Assets", ASSETS_MIN_COLUMNS)?;
    let accounts: HashMap<i64, String> = stmt
        .query_map([], |row| {
            Ok((
                row.get(ASSETS_ID)?,
                row.get::<_, Option<String>>(ASSETS_NAME)?.unwrap_or_default(),
            ))
        })?
        .collect::<std::result::Result<_, _>>()?;
    log::info!("loaded {} accounts", accounts.len());
    Ok(accounts)
}

pub fn load_category_definitions(conn: &Connection) -> Result<HashMap<i64, CategoryDefinition>> {
    let mut stmt = conn.prepare("SELECT * FROM RecordType")?;
    check_min_columns(&stmt, "RecordType", RECORD_TYPE_MIN_COLUMNS)?;
    let defs: HashMap<i64, CategoryDefinition> = stmt
        .query_map([], |row| {
            Ok((
                row.get(RECORD_TYPE_ID)?,
                CategoryDefinition {
                    name: row.get::<_, Option<String>>(RECORD_TYPE_NAME)?.unwrap_or_default(),
                    direction: row.get(RECORD_TYPE_DIRECTION)?,
                },
            ))
        })?
        .collect::<std::result::Result<_, _>>()?;
    log::info!("loaded {} category definitions", defs.len());
    Ok(defs)
}

/// All transactions, in the order SQLite returns them.
pub fn load_transactions(conn: &Connection) -> Result<Vec<SourceTransaction>> {
    let mut stmt = conn.prepare("SELECT * FROM Record")?;
    let found = stmt.column_count();
    if found != RECORD_COLUMNS {
        return Err(ConvertError::SchemaMismatch {
            table: "Record",
            expected: format!("exactly {RECORD_COLUMNS}"),
            found,
        });
    }
    let records = stmt
        .query_map([], |row| {
            Ok(SourceTransaction {
                id: row.get(0)?,
                amount: row.get(1)?,
                note: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                occurred_at: row.get(3)?,
                created_at: row.get(4)?,
                category_id: row.get(5)?,
                account_id: row.get(6)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    log::info!("loaded {} transactions", records.len());
    Ok(records)
}

pub fn count_rows(conn: &Connection, table: &str) -> Result<i64> {
    let count = conn.query_row(&format!("SELECT count(*) FROM {table}"), [], |r| r.get(0))?;
    Ok(count)
}

/// Throwaway NaWallet-shaped databases for tests.
#[cfg(test)]
pub(crate) mod fixtures {
    use std::path::{Path, PathBuf};

    use rusqlite::Connection;

    pub const SCHEMA: &str = "
    CREATE TABLE Assets (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        money INTEGER DEFAULT 0,
        type INTEGER DEFAULT 0
    );

    CREATE TABLE RecordType (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        img_name TEXT,
        type INTEGER NOT NULL,
        ranking INTEGER DEFAULT 0
    );

    CREATE TABLE Record (
        id INTEGER PRIMARY KEY,
        money INTEGER NOT NULL,
        remark TEXT,
        time INTEGER NOT NULL,
        create_time INTEGER NOT NULL,
        record_type_id INTEGER NOT NULL,
        assets_id INTEGER NOT NULL
    );
    ";

    pub fn create_source(dir: &Path) -> (PathBuf, Connection) {
        let path = dir.join("MoneyKeeper.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        (path, conn)
    }

    pub fn add_account(conn: &Connection, id: i64, name: &str) {
        conn.execute("INSERT INTO Assets (id, name) VALUES (?1, ?2)", rusqlite::params![id, name])
            .unwrap();
    }

    pub fn add_record_type(conn: &Connection, id: i64, name: &str, direction: i64) {
        conn.execute(
            "INSERT INTO RecordType (id, name, img_name, type) VALUES (?1, ?2, '', ?3)",
            rusqlite::params![id, name, direction],
        )
        .unwrap();
    }

    pub fn add_record(
        conn: &Connection,
        id: i64,
        money: i64,
        remark: Option<&str>,
        time: i64,
        record_type_id: i64,
        assets_id: i64,
    ) {
        conn.execute(
            "INSERT INTO Record (id, money, remark, time, create_time, record_type_id, assets_id) \
             VALUES (?1, ?2, ?3, ?4, ?4, ?5, ?6)",
            rusqlite::params![id, money, remark, time, record_type_id, assets_id],
        )
        .unwrap();
    }
}
