use std::path::PathBuf;

use comfy_table::{Cell, Table};

use crate::cli::resolve_mapping;
use crate::error::Result;
use crate::mapping::load_tables;
use crate::settings::load_settings;

pub fn run(mapping: Option<PathBuf>, export: Option<PathBuf>) -> Result<()> {
    let settings = load_settings()?;
    let mapping = resolve_mapping(mapping, &settings);
    let tables = load_tables(mapping.as_deref())?;

    if let Some(path) = export {
        tables.save(&path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let origin = mapping
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in".to_string());

    let mut categories = Table::new();
    categories.set_header(vec!["RecordType ID", "一级分类", "二级分类"]);
    for (id, label) in &tables.categories {
        categories.add_row(vec![
            Cell::new(id),
            Cell::new(&label.category),
            Cell::new(&label.subcategory),
        ]);
    }

    let mut accounts = Table::new();
    accounts.set_header(vec!["Assets ID", "账户"]);
    for (id, name) in &tables.accounts {
        accounts.add_row(vec![Cell::new(id), Cell::new(name)]);
    }

    println!("Mapping tables ({origin})");
    println!("Categories\n{categories}");
    println!("Accounts\n{accounts}");
    Ok(())
}
