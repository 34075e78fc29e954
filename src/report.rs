use crate::error::{Result, StatsError};
use crate::models::{RankedEntry, ReportKind};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Line breaks inside a quoted csv field would split an entry over two report lines.
fn single_line(label: &str) -> String {
    label.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

/// Render a ranked list as the `;`-separated report text, header line included.
pub fn render_report(kind: ReportKind, entries: &[RankedEntry]) -> String {
    let mut content = String::new();
    content.push_str(kind.header());
    content.push('\n');

    for entry in entries {
        content.push_str(&format!(
            "{};{};{:.1}%\n",
            single_line(&entry.label),
            entry.count,
            entry.percentage
        ));
    }

    content
}

pub fn write_report<W: Write>(
    mut sink: W,
    kind: ReportKind,
    entries: &[RankedEntry],
) -> Result<()> {
    let output_error = |source: std::io::Error| StatsError::OutputWrite {
        target: kind.to_string(),
        source,
    };
    sink.write_all(render_report(kind, entries).as_bytes())
        .map_err(output_error)?;
    sink.flush().map_err(output_error)
}

/// Replace `path` with the rendered report. The text goes to a temporary file next
/// to the destination first, so `path` is either left untouched or fully rewritten.
pub fn write_report_file(path: &Path, content: &str) -> Result<()> {
    let output_error = |source: std::io::Error| StatsError::OutputWrite {
        target: path.display().to_string(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(output_error)?;
    file.write_all(content.as_bytes()).map_err(output_error)?;
    file.flush().map_err(output_error)?;
    file.persist(path).map_err(|e| output_error(e.error))?;
    Ok(())
}
