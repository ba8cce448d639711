//! Export functionality for filtered subgraphs.
//!
//! The renderer lives outside this crate, so the filter response crosses a
//! serialization boundary: JSON for the web view, Graphviz DOT for offline
//! inspection.

pub mod dot;
pub mod json;

use crate::filter::FilterResponse;
use std::io::{self, Write};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// JSON format - what the web renderer consumes
    Json,
    /// Graphviz DOT - debugging and offline rendering
    Dot,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "dot" | "graphviz" => Ok(ExportFormat::Dot),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: json, dot",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Dot => write!(f, "dot"),
        }
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the filter response to the given writer.
    fn export<W: Write>(&self, response: &FilterResponse, writer: &mut W) -> io::Result<()>;
}

/// Export a filter response in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    response: &FilterResponse,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Json => json::JsonExporter.export(response, writer),
        ExportFormat::Dot => dot::DotExporter.export(response, writer),
    }
}

/// Export a filter response to a string.
pub fn export_to_string(format: ExportFormat, response: &FilterResponse) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, response, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
