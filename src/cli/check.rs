use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::ConvertArgs;
use crate::converter::check_source;
use crate::error::{ConvertError, Result};
use crate::mapping::load_tables;
use crate::settings::load_settings;

pub fn run(source: Option<PathBuf>, mapping: Option<PathBuf>) -> Result<()> {
    let settings = load_settings()?;
    let paths = ConvertArgs {
        source,
        output: None,
        mapping,
    }
    .resolve(&settings);
    let tables = load_tables(paths.mapping.as_deref())?;

    let report = check_source(&paths.source, &tables)?;
    if report.is_clean() {
        println!(
            "{} all {} records map cleanly",
            "OK".green().bold(),
            report.checked
        );
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Problem", "Key", "Source Name", "Records", "First Record"]);
    for p in &report.problems {
        table.add_row(vec![
            Cell::new(p.kind.describe()),
            Cell::new(p.key),
            Cell::new(p.source_name.as_deref().unwrap_or("")),
            Cell::new(p.records),
            Cell::new(p.first_record_id),
        ]);
    }
    println!("{}\n{table}", "Unmapped keys".red().bold());

    Err(ConvertError::Mapping(format!(
        "{} unmapped key(s) across {} of {} records",
        report.problems.len(),
        report.affected_records,
        report.checked
    )))
}
