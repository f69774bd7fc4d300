use crate::cli::ConvertArgs;
use crate::db::{count_rows, open_source};
use crate::error::Result;
use crate::fmt::format_bytes;
use crate::settings::{load_settings, settings_path};

pub fn run(args: ConvertArgs) -> Result<()> {
    let settings = load_settings()?;
    let config = settings_path();
    let paths = args.resolve(&settings);
    let source = paths.source;

    println!(
        "Settings:   {}{}",
        config.display(),
        if config.exists() { "" } else { " (not created, using defaults)" }
    );
    println!("Source:     {}", source.display());
    println!("Output:     {}", paths.output.display());
    println!(
        "Mapping:    {}",
        paths
            .mapping
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(built-in)".to_string())
    );

    if source.exists() {
        let size = std::fs::metadata(&source)?.len();
        println!("DB size:    {}", format_bytes(size));

        let conn = open_source(&source)?;
        let accounts = count_rows(&conn, "Assets")?;
        let categories = count_rows(&conn, "RecordType")?;
        let records = count_rows(&conn, "Record")?;

        println!();
        println!("Accounts:      {accounts}");
        println!("Categories:    {categories}");
        println!("Records:       {records}");
    } else {
        println!();
        println!("Source database not found. Pass --source or run `nawallet2icost init --source <path>`.");
    }

    Ok(())
}
