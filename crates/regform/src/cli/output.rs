//! Rendering of record listings.

use std::fmt::Write as _;

use crate::error::Result;
use crate::record::Record;

use super::OutputFormat;

/// Render records in the requested format.
///
/// The returned text has no trailing newline.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_records(records: &[Record], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Plain => Ok(records
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Table => Ok(render_table(records)),
    }
}

/// Column widths count characters, not terminal cells, so full-width names
/// (CJK and the like) leave the EMAIL column out of line.
fn render_table(records: &[Record]) -> String {
    if records.is_empty() {
        return "No registrations.".to_string();
    }

    let id_width = records
        .iter()
        .map(|r| r.id.to_string().len())
        .max()
        .unwrap_or(0)
        .max("ID".len());
    let name_width = records
        .iter()
        .map(|r| r.payload.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    let mut out = format!("{:>id_width$}  {:<name_width$}  EMAIL", "ID", "NAME");
    for record in records {
        let _ = write!(
            out,
            "\n{:>id_width$}  {:<name_width$}  {}",
            record.id, record.payload.name, record.payload.email
        );
    }
    out
}
