//! Melgraph - dependency graph model for Emacs package archive visualization
//!
//! This crate builds a directed package-dependency graph from two raw JSON
//! sources (an archive document and a download-count document) and provides
//! reachability, focus-distance, and filtering queries over it. The filtered
//! subgraph is what a force-directed renderer consumes; layout, SVG, and UI
//! wiring live outside this crate.

pub mod export;
pub mod filter;
pub mod graph;
pub mod loader;
pub mod parser;
