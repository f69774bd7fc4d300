use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::db::{load_accounts, load_category_definitions, load_transactions, open_source};
use crate::error::{ConvertError, Result};
use crate::mapper::RecordMapper;
use crate::mapping::MappingTables;
use crate::models::TransactionKind;
use crate::writer::write_records;

#[derive(Debug)]
pub struct ConvertResult {
    pub written: usize,
    pub expense_total: f64,
    pub income_total: f64,
    pub output: PathBuf,
}

/// Read the NaWallet store, map every record, then write the iCost CSV.
///
/// Every record is mapped before the destination is opened, so a mapping
/// failure leaves any existing output file untouched.
pub fn convert_file(source: &Path, output: &Path, tables: &MappingTables) -> Result<ConvertResult> {
    let records = {
        let conn = open_source(source)?;
        let accounts = load_accounts(&conn)?;
        log::debug!("source accounts: {accounts:?}");
        let definitions = load_category_definitions(&conn)?;
        let transactions = load_transactions(&conn)?;
        RecordMapper::new(&definitions, tables).map_all(&transactions)?
    };

    let written = write_records(output, &records)?;

    let total = |kind: TransactionKind| -> f64 {
        records
            .iter()
            .filter(|r| r.kind == kind)
            .map(|r| r.amount.abs())
            .sum()
    };
    Ok(ConvertResult {
        written,
        expense_total: total(TransactionKind::Expense),
        income_total: total(TransactionKind::Income),
        output: output.to_path_buf(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProblemKind {
    UnknownCategory,
    UnmappedCategory,
    UnmappedAccount,
    InvalidTimestamp,
}

impl ProblemKind {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::UnknownCategory => "category missing from RecordType",
            Self::UnmappedCategory => "category not in mapping table",
            Self::UnmappedAccount => "account not in mapping table",
            Self::InvalidTimestamp => "timestamp out of range",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub kind: ProblemKind,
    pub key: i64,
    /// Source name of the offending id, when the store has one.
    pub source_name: Option<String>,
    pub records: usize,
    pub first_record_id: i64,
}

#[derive(Debug)]
pub struct CheckReport {
    pub checked: usize,
    /// Records with at least one problem.
    pub affected_records: usize,
    pub problems: Vec<Problem>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Run every lookup on every record without writing anything, collecting
/// each distinct missing key instead of stopping at the first one.
pub fn check_source(source: &Path, tables: &MappingTables) -> Result<CheckReport> {
    let conn = open_source(source)?;
    let accounts = load_accounts(&conn)?;
    let definitions = load_category_definitions(&conn)?;
    let transactions = load_transactions(&conn)?;
    let mapper = RecordMapper::new(&definitions, tables);

    let mut found: BTreeMap<(ProblemKind, i64), Problem> = BTreeMap::new();
    let mut affected_records = 0usize;
    for t in &transactions {
        let problems = mapper.problems(t);
        if !problems.is_empty() {
            affected_records += 1;
        }
        for problem in problems {
            let (kind, key, source_name) = match problem {
                ConvertError::UnknownCategory { category_id, .. } => {
                    (ProblemKind::UnknownCategory, category_id, None)
                }
                ConvertError::UnmappedCategory { category_id, .. } => (
                    ProblemKind::UnmappedCategory,
                    category_id,
                    definitions.get(&category_id).map(|d| d.name.clone()),
                ),
                ConvertError::UnmappedAccount { account_id, .. } => (
                    ProblemKind::UnmappedAccount,
                    account_id,
                    accounts.get(&account_id).cloned(),
                ),
                ConvertError::InvalidTimestamp { millis, .. } => {
                    (ProblemKind::InvalidTimestamp, millis, None)
                }
                other => return Err(other),
            };
            found
                .entry((kind, key))
                .and_modify(|p| p.records += 1)
                .or_insert(Problem {
                    kind,
                    key,
                    source_name,
                    records: 1,
                    first_record_id: t.id,
                });
        }
    }

    Ok(CheckReport {
        checked: transactions.len(),
        affected_records,
        problems: found.into_values().collect(),
    })
}
