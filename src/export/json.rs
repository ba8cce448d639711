//! JSON export implementation.
//!
//! Serializes the filter response in the shape the web renderer consumes:
//! node list, link list, metric range, and the echoed search term.

use super::Exporter;
use crate::filter::FilterResponse;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, response: &FilterResponse, writer: &mut W) -> io::Result<()> {
        let json = serde_json::to_string_pretty(response)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}
