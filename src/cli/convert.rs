use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::ConvertArgs;
use crate::converter::convert_file;
use crate::error::Result;
use crate::fmt::money;
use crate::mapping::load_tables;
use crate::models::TransactionKind;
use crate::settings::load_settings;

pub fn run(args: ConvertArgs) -> Result<()> {
    let settings = load_settings()?;
    let paths = args.resolve(&settings);
    let tables = load_tables(paths.mapping.as_deref())?;

    log::info!("converting {} -> {}", paths.source.display(), paths.output.display());
    let result = convert_file(&paths.source, &paths.output, &tables)?;

    let mut table = Table::new();
    table.set_header(vec!["类型", "Total"]);
    table.add_row(vec![
        Cell::new(TransactionKind::Expense.label().red()),
        Cell::new(money(result.expense_total)),
    ]);
    table.add_row(vec![
        Cell::new(TransactionKind::Income.label().green()),
        Cell::new(money(result.income_total)),
    ]);

    println!(
        "{} {} records written to {}",
        "Done.".green().bold(),
        result.written,
        result.output.display()
    );
    println!("{table}");
    Ok(())
}
