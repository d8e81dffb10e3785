use super::token::*;
use super::{Error, LineNumber};

type Result<T> = std::result::Result<T, Error>;

/// Tokenizes the command text of one line. `row` is only used to
/// identify the line in a lexing error.
pub fn lex(row: LineNumber, s: &str) -> Result<Vec<Token>> {
    BasicLexer {
        chars: s.chars().peekable(),
        row,
        remark: false,
    }
    .collect()
}

fn is_basic_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\n' || c == '\r'
}

fn is_basic_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_relational_char(c: char) -> bool {
    c == '=' || c == '<' || c == '>'
}

fn ends_word(c: char) -> bool {
    is_basic_whitespace(c) || is_relational_char(c) || c == '"' || Operator::from_char(c).is_some()
}

trait Tokenizers<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::Chars<'a>>;
    fn row(&self) -> LineNumber;

    fn at_word_end(&mut self) -> bool {
        match self.chars().peek() {
            None => true,
            Some(pk) => is_basic_whitespace(*pk),
        }
    }

    fn number(&mut self) -> Result<Token> {
        let mut s = String::new();
        while let Some(pk) = self.chars().peek() {
            if !is_basic_digit(*pk) {
                break;
            }
            s.push(*pk);
            self.chars().next();
        }
        if let Some(pk) = self.chars().peek().copied() {
            if pk.is_alphabetic() || pk == '.' || pk == '_' || pk == '"' {
                return Err(error!(LexError, self.row(); "COULD NOT PARSE NUMBER"));
            }
        }
        Ok(Token::Num(s))
    }

    fn string(&mut self) -> Result<Token> {
        let mut s = String::new();
        self.chars().next();
        loop {
            match self.chars().next() {
                Some('"') => return Ok(Token::Str(s)),
                Some(ch) => s.push(ch),
                None => return Err(error!(LexError, self.row(); "UNTERMINATED STRING")),
            }
        }
    }

    fn relational(&mut self) -> Token {
        let first = self.chars().next();
        let second = self.chars().peek().copied();
        let token = match (first, second) {
            (Some('='), Some('=')) => Token::Relational(Relational::Equal),
            (Some('<'), Some('=')) => Token::Relational(Relational::LessEqual),
            (Some('<'), Some('>')) => Token::Relational(Relational::NotEqual),
            (Some('>'), Some('=')) => Token::Relational(Relational::GreaterEqual),
            (Some('<'), _) => return Token::Relational(Relational::Less),
            (Some('>'), _) => return Token::Relational(Relational::Greater),
            _ => return Token::Operator(Operator::Eq),
        };
        self.chars().next();
        token
    }

    /// Accumulates a run of identifier characters and classifies it by what
    /// follows: keyword and boolean only before whitespace or end of line,
    /// array when `[` follows, plain variable otherwise.
    fn word(&mut self) -> Token {
        let mut s = String::new();
        while let Some(pk) = self.chars().peek() {
            if ends_word(*pk) {
                break;
            }
            s.push(*pk);
            self.chars().next();
        }
        if self.at_word_end() {
            match s.as_str() {
                "TRUE" => return Token::Boolean(true),
                "FALSE" => return Token::Boolean(false),
                _ => {}
            }
            if let Some(word) = Word::from_string(&s) {
                return Token::Static(word);
            }
        }
        if let Some('[') = self.chars().peek() {
            return Token::VarArray(s);
        }
        Token::Var(s)
    }
}

struct BasicLexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    row: LineNumber,
    remark: bool,
}

impl<'a> Tokenizers<'a> for BasicLexer<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::Chars<'a>> {
        &mut self.chars
    }

    fn row(&self) -> LineNumber {
        self.row
    }
}

impl<'a> Iterator for BasicLexer<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remark {
            return None;
        }
        while is_basic_whitespace(*self.chars.peek()?) {
            self.chars.next();
        }
        let pk = *self.chars.peek()?;
        if pk == '"' {
            return Some(self.string());
        }
        if is_basic_digit(pk) {
            return Some(self.number());
        }
        if is_relational_char(pk) {
            return Some(Ok(self.relational()));
        }
        if let Some(op) = Operator::from_char(pk) {
            self.chars.next();
            return Some(Ok(Token::Operator(op)));
        }
        let word = self.word();
        if let Token::Static(Word::Rem) = word {
            self.remark = true;
        }
        Some(Ok(word))
    }
}
