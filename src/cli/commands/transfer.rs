use std::{fs, path::Path};

use crate::cli::commands::arg;
use crate::cli::output;
use crate::cli::shell_context::{CommandError, CommandResult, LoopControl, ShellContext};
use crate::export::{CsvExporter, Exporter, JsonExporter};
use crate::import::{CsvImporter, ImportReport, Importer, JsonImporter, YamlImporter};

pub fn handle_import(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let format = arg(args, 0, "format")?;
    let path = Path::new(arg(args, 1, "path")?);
    let report = match format.to_ascii_lowercase().as_str() {
        "csv" => {
            let delimiter = context.config.csv_delimiter_byte()?;
            CsvImporter::new(delimiter).import_file(&mut context.finance, path)?
        }
        "json" => JsonImporter.import_file(&mut context.finance, path)?,
        "yaml" | "yml" => YamlImporter.import_file(&mut context.finance, path)?,
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unsupported import format `{other}`"
            )))
        }
    };
    print_report(&report);
    Ok(LoopControl::Continue)
}

pub fn handle_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let format = arg(args, 0, "format")?;
    let text = match format.to_ascii_lowercase().as_str() {
        "csv" => {
            let mut exporter = CsvExporter::new(context.config.csv_delimiter_byte()?);
            exporter.write_all(context.finance.entities())?;
            exporter.finish()?
        }
        "json" => {
            let mut exporter = JsonExporter::new();
            exporter.write_all(context.finance.entities())?;
            exporter.finish()?
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unsupported export format `{other}`"
            )))
        }
    };

    match args.get(1) {
        Some(path) => {
            fs::write(path, &text)?;
            output::success(format!("Exported to {path}."));
        }
        None => print!("{text}"),
    }
    Ok(LoopControl::Continue)
}

fn print_report(report: &ImportReport) {
    output::success(format!(
        "Imported {} rows, {} failed.",
        report.created.len(),
        report.failures.len()
    ));
    for failure in &report.failures {
        output::warning(format!("row {}: {}", failure.row, failure.message));
    }
}
