use std::path::Path;

use crate::error::{ConvertError, Result};
use crate::fmt::csv_amount;
use crate::models::NormalizedRecord;

/// iCost's import header, in column order.
pub const HEADER: [&str; 10] = [
    "日期", "类型", "金额", "一级分类", "二级分类", "账户1", "账户2", "备注", "货币", "标签",
];

/// Create (or truncate) `path` and write the header plus one row per record.
/// A failure partway leaves whatever was already flushed on disk.
pub fn write_records(path: &Path, records: &[NormalizedRecord]) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b',')
        .quote_style(csv::QuoteStyle::Necessary)
        .from_path(path)?;

    wtr.write_record(HEADER)?;
    for record in records {
        let amount = csv_amount(record.amount);
        wtr.write_record([
            record.date.as_str(),
            record.kind.label(),
            amount.as_str(),
            record.category.as_str(),
            record.subcategory.as_str(),
            record.account_1.as_str(),
            record.account_2.as_str(),
            record.note.as_str(),
            record.currency.as_str(),
            record.tags.as_str(),
        ])?;
    }
    wtr.flush().map_err(|e| ConvertError::DestinationWrite(e.into()))?;
    log::info!("wrote {} rows to {}", records.len(), path.display());
    Ok(records.len())
}
