use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context;

use crate::schema::{puzzle::Puzzle, report::RunReport};

/// Reads a puzzle definition from a JSON file.
pub fn read_puzzle(path: &Path) -> anyhow::Result<Puzzle> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open puzzle file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse puzzle file: {}", path.display()))
}

/// Writes `report` as pretty JSON to `output`, or to stdout when no path is given.
pub fn write_report(report: &RunReport, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create report file: {}", path.display()))?;
            emit_report(report, BufWriter::new(file))
                .with_context(|| format!("Failed to write report to {}", path.display()))
        }
        None => emit_report(report, io::stdout().lock())
            .context("Failed to write report to stdout"),
    }
}

fn emit_report(report: &RunReport, mut writer: impl Write) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
