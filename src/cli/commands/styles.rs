//! Styles command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::style::StyleCatalog;
use anyhow::Result;

/// Run the styles command.
pub fn run_styles(settings: &Settings) -> Result<()> {
    let catalog = StyleCatalog::with_overrides(&settings.styles);

    Output::header(&format!("Styles ({})", catalog.entries().len()));
    println!();
    for entry in catalog.entries() {
        let is_default = entry
            .name
            .eq_ignore_ascii_case(&settings.rewrite.default_style);
        Output::style_entry(&entry.name, &entry.directive, is_default);
    }

    Ok(())
}
