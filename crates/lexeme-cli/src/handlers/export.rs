use anyhow::Result;
use lexeme_engine::{SessionContext, render_summary, render_summary_json};
use std::path::Path;

use crate::export_target::{ExportTarget, FileTarget};
use crate::types::ExportFormat;

/// Non-interactive mode: print the summary (or write it to `output`) and return.
pub fn handle(ctx: &SessionContext, format: ExportFormat, output: Option<&Path>) -> Result<()> {
    let text = match format {
        ExportFormat::Tsv => render_summary(ctx.categories(), false),
        ExportFormat::Json => render_summary_json(ctx.categories())?,
    };

    match output {
        Some(path) => {
            let mut target = FileTarget::new(path);
            target.put(&text)?;
            eprintln!("Summary written to {}", target.describe());
        }
        None => println!("{}", text),
    }

    Ok(())
}
