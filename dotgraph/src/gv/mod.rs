//! A module that contains everything that has to do with handling the GraphViz
//! file format (parsing into a Graph, and printing a Graph back out).

pub mod parser;
pub mod printer;

use crate::core::graph::Graph;
use crate::error::ParseError;
use std::fs;
use std::io::Read;
use std::path::Path;

pub use parser::error_context;
pub use parser::lexer::Lexer;
pub use parser::lexer::Token;
pub use parser::DotParser;
pub use printer::{escape_dot_string, write_dot};

/// Parses the DOT document in \p text.
///
/// An edge between two subgraphs creates one edge per pair of member nodes,
/// and nested subgraphs are parsed recursively. Neither the number of edges
/// nor the nesting depth is limited.
pub fn parse_string(text: &str) -> Result<Graph, ParseError> {
    #[cfg(feature = "log")]
    log::debug!("Parsing {} bytes of DOT input", text.len());
    DotParser::new(text).parse_graph()
}

/// Reads \p reader to the end and parses the content.
pub fn parse<R: Read>(mut reader: R) -> Result<Graph, ParseError> {
    let mut text = String::new();
    reader.read_to_string(&mut text).map_err(|err| {
        ParseError::unlocated(format!("failed to read input: {}", err))
    })?;
    parse_string(&text)
}

/// Parses the DOT file at \p path.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Graph, ParseError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|err| {
        ParseError::unlocated(format!(
            "failed to open file \"{}\": {}",
            path.display(),
            err
        ))
    })?;
    #[cfg(feature = "log")]
    log::info!("Parsing {}", path.display());
    parse_string(&text)
}
