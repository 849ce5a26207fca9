//! Archive load order report.

use std::fmt::Write;
use std::path::Path;

use pgcore::archive::ArchiveResolution;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Resolve the archive order and print or write the report.
pub fn run(runner: &CliRunner, json: bool, output: Option<&Path>) -> Result<(), CliError> {
    runner.log_startup("archives");

    let resolution = runner.context().resolve_archive_order()?;

    let report = if json {
        let mut text = serde_json::to_string_pretty(&resolution)?;
        text.push('\n');
        text
    } else {
        format_text(&resolution)
    };

    match output {
        Some(path) => runner.write_output(path, report),
        None => {
            print!("{}", report);
            Ok(())
        }
    }
}

/// Plain text report: numbered load order, then orphans.
fn format_text(resolution: &ArchiveResolution) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Archive load order (last loaded wins):");
    for (index, archive) in resolution.order.iter().enumerate() {
        let _ = writeln!(out, "{:>4}  {}", index, archive);
    }

    if !resolution.orphans.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Not loaded by any active plugin or INI:");
        for archive in &resolution.orphans {
            let _ = writeln!(out, "      {}", archive);
        }
    }

    out
}
