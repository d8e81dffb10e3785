use super::Position;
use crate::lang::token::Token;
use crate::lang::{Error, Line, LineNumber};
use std::collections::BTreeMap;

/// Splits source text into `(line number text, command text)` pairs. The
/// number is the leading run up to the first whitespace after trimming.
pub fn split_source(source: &str) -> Vec<(String, String)> {
    source
        .lines()
        .map(|raw| {
            let mut parts = raw.trim_start().splitn(2, char::is_whitespace);
            let number = parts.next().unwrap_or("");
            let command = parts.next().unwrap_or("");
            (number.to_string(), command.to_string())
        })
        .collect()
}

/// The program as an ordered table of lines, indexed by position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    lines: Vec<Line>,
}

impl Program {
    /// Tokenizes every line whose number text is a non-negative integer
    /// that fits a [`LineNumber`]; other lines, including numbers above
    /// `u32::MAX`, are dropped. A repeated number keeps the last definition.
    pub fn build<I, S, T>(raw_lines: I) -> Result<Program, Error>
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut source: BTreeMap<LineNumber, Line> = BTreeMap::new();
        for (number, command) in raw_lines {
            let number = number.as_ref();
            if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            let number = match number.parse::<LineNumber>() {
                Ok(n) => n,
                Err(_) => continue,
            };
            source.insert(number, Line::new(number, command.as_ref())?);
        }
        Ok(Program {
            lines: source.into_iter().map(|(_, line)| line).collect(),
        })
    }

    pub fn parse(source: &str) -> Result<Program, Error> {
        Program::build(split_source(source))
    }

    /// A one-line program executed by a child engine.
    pub fn synthetic(number: LineNumber, tokens: Vec<Token>) -> Program {
        Program {
            lines: vec![Line::from_tokens(number, tokens)],
        }
    }

    pub fn position_of(&self, number: LineNumber) -> Option<Position> {
        self.lines
            .binary_search_by_key(&number, |line| line.number())
            .ok()
    }

    pub fn line_at(&self, position: Position) -> Option<&Line> {
        self.lines.get(position)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }
}
