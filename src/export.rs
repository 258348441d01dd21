//! Statistics export
//!
//! CSV: one `key,value` line per entry, no header.
//! JSON: pretty-printed object, two-space indent (requires `visualize`).

use anyhow::{anyhow, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::stats::TextStats;

/// Write statistics as `key,value` lines
pub fn write_csv<W: Write>(writer: &mut W, stats: &TextStats) -> Result<()> {
    let lines: Vec<String> = stats
        .entries()
        .iter()
        .map(|(key, value)| format!("{},{}", key, value))
        .collect();
    writer.write_all(lines.join("\n").as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Render statistics as CSV text
pub fn render_csv(stats: &TextStats) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, stats)?;
    String::from_utf8(buffer).map_err(|_| anyhow!("rendered CSV is not valid UTF-8"))
}

/// Write statistics as a pretty JSON object
#[cfg(feature = "visualize")]
pub fn write_json<W: Write>(writer: &mut W, stats: &TextStats) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, stats)?;
    writer.flush()?;
    Ok(())
}

/// Render statistics as JSON text
#[cfg(feature = "visualize")]
pub fn render_json(stats: &TextStats) -> Result<String> {
    Ok(serde_json::to_string_pretty(stats)?)
}

/// Export format, picked from the file extension by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `key,value` lines
    Csv,
    /// Pretty JSON object
    #[cfg(feature = "visualize")]
    Json,
}

/// Write `stats` to `path` in the given format
pub fn export_to_file(path: &Path, stats: &TextStats, format: Format) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        Format::Csv => write_csv(&mut writer, stats),
        #[cfg(feature = "visualize")]
        Format::Json => write_json(&mut writer, stats),
    }
}
