//! GraphViz file format parser.

pub mod lexer;
pub mod parser;

pub use lexer::Lexer;
pub use lexer::Token;
pub use lexer::TokenKind;
pub use parser::error_context;
pub use parser::DotParser;
