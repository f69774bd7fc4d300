use crate::error::Result;
use crate::settings::{load_settings, save_settings, settings_path};

pub fn run(source: Option<String>, output: Option<String>, mapping: Option<String>) -> Result<()> {
    let mut settings = load_settings()?;
    if let Some(source) = source {
        settings.source_db = source;
    }
    if let Some(output) = output {
        settings.output_csv = output;
    }
    if mapping.is_some() {
        settings.mapping_file = mapping;
    }
    save_settings(&settings)?;

    println!("Settings saved to {}", settings_path().display());
    println!("Source:   {}", settings.source_db);
    println!("Output:   {}", settings.output_csv);
    println!(
        "Mapping:  {}",
        settings.mapping_file.as_deref().unwrap_or("(built-in)")
    );
    Ok(())
}
