//! Parser module for melgraph.
//!
//! This module provides typed parsers for the two raw data sources the
//! dependency model is built from:
//!
//! - **archive document** - package metadata keyed by package name
//! - **download counts** - download totals keyed by package name
//!
//! Both documents are validated at this boundary; malformed input never
//! reaches graph logic.
//!
//! # Example
//!
//! ```
//! use melgraph::parser::parse_archive_str;
//!
//! let json = r#"{"magit": {"desc": "A Git porcelain", "deps": {"dash": [2, 19]}}}"#;
//! let archive = parse_archive_str(json).unwrap();
//! assert!(archive.contains_key("magit"));
//! ```

pub mod archive;
pub mod types;

// Re-export commonly used types for convenience
pub use archive::{
    parse_archive_file, parse_archive_str, parse_downloads_file, parse_downloads_str,
    validate_archive, ParseError, ParseResult,
};

pub use types::{Archive, ArchiveRecord, DownloadCounts, PackageProps};
