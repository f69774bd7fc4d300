use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Cannot read source database: {0}")]
    StoreAccess(#[from] rusqlite::Error),

    #[error("Source table {table} has {found} columns, expected {expected}")]
    SchemaMismatch {
        table: &'static str,
        expected: String,
        found: usize,
    },

    #[error("Record {record_id}: category {category_id} is not defined in the RecordType table")]
    UnknownCategory { record_id: i64, category_id: i64 },

    #[error("Record {record_id}: category {category_id} has no entry in the category mapping table")]
    UnmappedCategory { record_id: i64, category_id: i64 },

    #[error("Record {record_id}: account {account_id} has no entry in the account mapping table")]
    UnmappedAccount { record_id: i64, account_id: i64 },

    #[error("Record {record_id}: timestamp {millis} cannot be represented in local time")]
    InvalidTimestamp { record_id: i64, millis: i64 },

    #[error("Cannot write destination file: {0}")]
    DestinationWrite(#[from] csv::Error),

    #[error("Mapping table error: {0}")]
    Mapping(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
