use super::lex::*;
use super::token::*;
use super::{Error, LineNumber};

#[derive(Debug, PartialEq, Clone)]
pub struct Line {
    number: LineNumber,
    tokens: Vec<Token>,
}

impl Line {
    pub fn new(number: LineNumber, s: &str) -> Result<Line, Error> {
        Ok(Line {
            number,
            tokens: lex(number, s)?,
        })
    }

    /// A line built from an already tokenized slice, as used for the
    /// body of a conditional.
    pub fn from_tokens(number: LineNumber, tokens: Vec<Token>) -> Line {
        Line { number, tokens }
    }

    pub fn number(&self) -> LineNumber {
        self.number
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s: Vec<String> = self.tokens.iter().map(|s| s.to_string()).collect();
        write!(f, "{} {}", self.number, s.join(" "))
    }
}
