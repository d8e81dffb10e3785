use super::{Operation, Val};
use crate::error;
use crate::lang::token::{Operator, Token};
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// Evaluates translated tokens as arithmetic. Returns `None` when the
/// tokens are not purely numbers and `+ - * / ( )`, in which case the
/// caller falls back to string evaluation.
pub fn arithmetic(tokens: &[Token]) -> Option<Result<Val>> {
    if tokens.is_empty() {
        return None;
    }
    let numeric = tokens.iter().all(|t| match t {
        Token::Num(_) => true,
        Token::Operator(op) => op.is_arithmetic(),
        _ => false,
    });
    if !numeric {
        return None;
    }
    let mut parser = Arithmetic { tokens, pos: 0 };
    Some(parser.parse())
}

/// Joins alternating value and `+`/`-` tokens. The separator is not
/// applied; `"A" - "B"` joins to `AB` just as `+` does.
pub fn concatenate(tokens: &[Token]) -> Result<Val> {
    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        if i % 2 == 0 {
            match token {
                Token::Str(s) | Token::Num(s) => out.push_str(s),
                Token::Boolean(b) => out.push_str(if *b { "TRUE" } else { "FALSE" }),
                _ => return Err(string_error(tokens)),
            }
        } else if !token.is_operator(Operator::Plus) && !token.is_operator(Operator::Minus) {
            return Err(string_error(tokens));
        }
    }
    if !tokens.is_empty() && tokens.len() % 2 == 0 {
        return Err(string_error(tokens));
    }
    Ok(Val::Text(out))
}

fn string_error(tokens: &[Token]) -> Error {
    let s: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    error!(StringEvalError; s.join(" "))
}

/// Splits the leading `[..][..]` groups off a token run. Returns the
/// index expressions and how many tokens the groups occupied.
pub fn index_groups(tokens: &[Token]) -> Result<(Vec<&[Token]>, usize)> {
    let mut groups = vec![];
    let mut i = 0;
    while i < tokens.len() && tokens[i].is_operator(Operator::LeftBlock) {
        let start = i + 1;
        let mut depth = 1;
        let mut end = start;
        while end < tokens.len() {
            if tokens[end].is_operator(Operator::LeftBlock) {
                depth += 1;
            } else if tokens[end].is_operator(Operator::RightBlock) {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            end += 1;
        }
        if depth != 0 {
            return Err(error!(ArraySyntax; "MISSING ]"));
        }
        if start == end {
            return Err(error!(ArraySyntax; "EMPTY INDEX"));
        }
        groups.push(&tokens[start..end]);
        i = end + 1;
    }
    if groups.is_empty() {
        return Err(error!(ArraySyntax; "EXPECTED ["));
    }
    Ok((groups, i))
}

struct Arithmetic<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Arithmetic<'a> {
    fn parse(&mut self) -> Result<Val> {
        let val = self.expression()?;
        if self.pos != self.tokens.len() {
            return Err(self.malformed());
        }
        Ok(val)
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'a Token> {
        let t = self.tokens.get(self.pos);
        self.pos += 1;
        t
    }

    fn malformed(&self) -> Error {
        let s: Vec<String> = self.tokens.iter().map(|t| t.to_string()).collect();
        error!(ArithmeticError; format!("MALFORMED EXPRESSION {}", s.join(" ")))
    }

    fn expression(&mut self) -> Result<Val> {
        let mut lhs = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Operator(Operator::Plus)) => {
                    self.next();
                    lhs = Operation::sum(lhs, self.term()?)?;
                }
                Some(Token::Operator(Operator::Minus)) => {
                    self.next();
                    lhs = Operation::subtract(lhs, self.term()?)?;
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn term(&mut self) -> Result<Val> {
        let mut lhs = self.factor()?;
        loop {
            match self.peek() {
                Some(Token::Operator(Operator::Multiply)) => {
                    self.next();
                    lhs = Operation::multiply(lhs, self.factor()?)?;
                }
                Some(Token::Operator(Operator::Slash)) => {
                    self.next();
                    lhs = Operation::divide(lhs, self.factor()?)?;
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn factor(&mut self) -> Result<Val> {
        match self.next() {
            Some(Token::Operator(Operator::Plus)) => self.factor(),
            Some(Token::Operator(Operator::Minus)) => Operation::negate(self.factor()?),
            Some(Token::Num(s)) => match s.parse::<f64>() {
                Ok(n) => Ok(Val::Number(n)),
                Err(_) => Err(self.malformed()),
            },
            Some(Token::Operator(Operator::LeftParen)) => {
                let val = self.expression()?;
                match self.next() {
                    Some(Token::Operator(Operator::RightParen)) => Ok(val),
                    _ => Err(self.malformed()),
                }
            }
            _ => Err(self.malformed()),
        }
    }
}
