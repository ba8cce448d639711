//! Graphviz DOT export implementation.
//!
//! Handy for eyeballing a filtered subgraph without the web renderer:
//! `melgraph filter --search magit --format dot | dot -Tsvg > out.svg`.

use super::Exporter;
use crate::filter::FilterResponse;
use std::io::{self, Write};

/// DOT exporter implementation.
pub struct DotExporter;

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

impl Exporter for DotExporter {
    fn export<W: Write>(&self, response: &FilterResponse, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "digraph packages {{")?;
        writeln!(writer, "  rankdir=LR;")?;
        writeln!(writer, "  node [shape=box];")?;

        for node in &response.nodes {
            let label = match node.downloads {
                Some(count) => format!("{}\\n{} downloads", escape(&node.name), count),
                None => escape(&node.name),
            };
            writeln!(writer, "  \"{}\" [label=\"{}\"];", escape(&node.name), label)?;
        }

        for link in &response.links {
            writeln!(
                writer,
                "  \"{}\" -> \"{}\";",
                escape(&link.source),
                escape(&link.target)
            )?;
        }

        writeln!(writer, "}}")
    }
}
