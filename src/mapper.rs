use std::collections::HashMap;
use std::fmt::Display;

use chrono::{Local, TimeZone};

use crate::error::{ConvertError, Result};
use crate::fmt::major_units;
use crate::mapping::MappingTables;
use crate::models::{CategoryDefinition, NormalizedRecord, SourceTransaction};

/// iCost's home currency. Every exported row carries it.
pub const CURRENCY: &str = "CNY";

/// iCost's date column: full date with CJK markers, then 24-hour time.
pub const DATE_FORMAT: &str = "%Y年%m月%d日 %H:%M:%S";

pub fn format_occurred_at<Tz>(tz: &Tz, millis: i64) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    tz.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.format(DATE_FORMAT).to_string())
}

/// Turns NaWallet transactions into iCost rows. Dates render in `tz`, which is
/// the machine's local zone outside of tests.
pub struct RecordMapper<'a, Tz: TimeZone = Local> {
    definitions: &'a HashMap<i64, CategoryDefinition>,
    tables: &'a MappingTables,
    tz: Tz,
}

impl<'a> RecordMapper<'a, Local> {
    pub fn new(definitions: &'a HashMap<i64, CategoryDefinition>, tables: &'a MappingTables) -> Self {
        Self::with_timezone(definitions, tables, Local)
    }
}

impl<'a, Tz> RecordMapper<'a, Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    pub fn with_timezone(
        definitions: &'a HashMap<i64, CategoryDefinition>,
        tables: &'a MappingTables,
        tz: Tz,
    ) -> Self {
        Self {
            definitions,
            tables,
            tz,
        }
    }

    pub fn map(&self, t: &SourceTransaction) -> Result<NormalizedRecord> {
        let date = format_occurred_at(&self.tz, t.occurred_at).ok_or(ConvertError::InvalidTimestamp {
            record_id: t.id,
            millis: t.occurred_at,
        })?;

        let kind = self
            .definitions
            .get(&t.category_id)
            .ok_or(ConvertError::UnknownCategory {
                record_id: t.id,
                category_id: t.category_id,
            })?
            .kind();

        let label = self
            .tables
            .category(t.category_id)
            .ok_or(ConvertError::UnmappedCategory {
                record_id: t.id,
                category_id: t.category_id,
            })?;

        let account = self
            .tables
            .account(t.account_id)
            .ok_or(ConvertError::UnmappedAccount {
                record_id: t.id,
                account_id: t.account_id,
            })?;

        Ok(NormalizedRecord {
            date,
            kind,
            amount: major_units(t.amount),
            category: label.category.clone(),
            subcategory: label.subcategory.clone(),
            account_1: account.to_string(),
            account_2: String::new(),
            note: t.note.clone(),
            currency: CURRENCY.to_string(),
            tags: String::new(),
        })
    }

    /// Every lookup `map` would fail on for `t`, not just the first.
    pub fn problems(&self, t: &SourceTransaction) -> Vec<ConvertError> {
        let mut problems = Vec::new();
        if format_occurred_at(&self.tz, t.occurred_at).is_none() {
            problems.push(ConvertError::InvalidTimestamp {
                record_id: t.id,
                millis: t.occurred_at,
            });
        }
        if !self.definitions.contains_key(&t.category_id) {
            problems.push(ConvertError::UnknownCategory {
                record_id: t.id,
                category_id: t.category_id,
            });
        }
        if self.tables.category(t.category_id).is_none() {
            problems.push(ConvertError::UnmappedCategory {
                record_id: t.id,
                category_id: t.category_id,
            });
        }
        if self.tables.account(t.account_id).is_none() {
            problems.push(ConvertError::UnmappedAccount {
                record_id: t.id,
                account_id: t.account_id,
            });
        }
        problems
    }

    /// One row per transaction, same order. Stops at the first failure.
    pub fn map_all(&self, transactions: &[SourceTransaction]) -> Result<Vec<NormalizedRecord>> {
        transactions.iter().map(|t| self.map(t)).collect()
    }
}
