/*!
# Rust Language Module

This Rust module provides lexical analysis of line-numbered BASIC source.

*/

#[macro_use]
mod error;
mod lex;
mod line;

pub mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::lex;
pub use line::Line;

pub type LineNumber = u32;
