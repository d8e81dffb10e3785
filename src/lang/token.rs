use std::collections::HashMap;

thread_local!(
    static STRING_TO_WORD: HashMap<&'static str, Word> =
        Word::ALL.iter().map(|w| (w.as_str(), w.clone())).collect();
);

/// A lexed token. The variant is the token kind, the payload its value.
#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Static(Word),
    Var(String),
    VarArray(String),
    Num(String),
    Str(String),
    Operator(Operator),
    Relational(Relational),
    Boolean(bool),
}

impl Token {
    pub fn is_word(&self, word: Word) -> bool {
        matches!(self, Token::Static(w) if *w == word)
    }

    pub fn is_operator(&self, op: Operator) -> bool {
        matches!(self, Token::Operator(o) if *o == op)
    }

    pub fn is_relational(&self) -> bool {
        matches!(self, Token::Relational(_))
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            Static(s) => write!(f, "{}", s),
            Var(s) => write!(f, "{}", s),
            VarArray(s) => write!(f, "{}", s),
            Num(s) => write!(f, "{}", s),
            Str(s) => write!(f, "\"{}\"", s),
            Operator(s) => write!(f, "{}", s),
            Relational(s) => write!(f, "{}", s),
            Boolean(true) => write!(f, "TRUE"),
            Boolean(false) => write!(f, "FALSE"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Word {
    Print,
    Let,
    Goto,
    Array,
    Input,
    End,
    If,
    Then,
    Else,
    For,
    To,
    Step,
    Next,
    Gosub,
    Namespace,
    Load,
    Import,
    As,
    Return,
    Plot,
    Display,
    Draw,
    Text,
    Pause,
    Export,
    Cls,
    Clt,
    Clc,
    Rem,
}

impl Word {
    pub const ALL: [Word; 29] = [
        Word::Print,
        Word::Let,
        Word::Goto,
        Word::Array,
        Word::Input,
        Word::End,
        Word::If,
        Word::Then,
        Word::Else,
        Word::For,
        Word::To,
        Word::Step,
        Word::Next,
        Word::Gosub,
        Word::Namespace,
        Word::Load,
        Word::Import,
        Word::As,
        Word::Return,
        Word::Plot,
        Word::Display,
        Word::Draw,
        Word::Text,
        Word::Pause,
        Word::Export,
        Word::Cls,
        Word::Clt,
        Word::Clc,
        Word::Rem,
    ];

    pub fn from_string(s: &str) -> Option<Word> {
        STRING_TO_WORD.with(|stw| stw.get(s).copied())
    }

    pub fn as_str(&self) -> &'static str {
        use Word::*;
        match self {
            Print => "PRINT",
            Let => "LET",
            Goto => "GOTO",
            Array => "ARRAY",
            Input => "INPUT",
            End => "END",
            If => "IF",
            Then => "THEN",
            Else => "ELSE",
            For => "FOR",
            To => "TO",
            Step => "STEP",
            Next => "NEXT",
            Gosub => "GOSUB",
            Namespace => "NAMESPACE",
            Load => "LOAD",
            Import => "IMPORT",
            As => "AS",
            Return => "RETURN",
            Plot => "PLOT",
            Display => "DISPLAY",
            Draw => "DRAW",
            Text => "TEXT",
            Pause => "PAUSE",
            Export => "EXPORT",
            Cls => "CLS",
            Clt => "CLT",
            Clc => "CLC",
            Rem => "REM",
        }
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Single character operators. `Eq` is assignment; equality is relational.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Operator {
    Eq,
    Plus,
    Minus,
    Multiply,
    Slash,
    Comma,
    Semicolon,
    LeftParen,
    RightParen,
    LeftBlock,
    RightBlock,
}

impl Operator {
    pub fn from_char(ch: char) -> Option<Operator> {
        use Operator::*;
        match ch {
            '+' => Some(Plus),
            '-' => Some(Minus),
            '*' => Some(Multiply),
            '/' => Some(Slash),
            ',' => Some(Comma),
            ';' => Some(Semicolon),
            '(' => Some(LeftParen),
            ')' => Some(RightParen),
            '[' => Some(LeftBlock),
            ']' => Some(RightBlock),
            _ => None,
        }
    }

    pub fn is_arithmetic(&self) -> bool {
        use Operator::*;
        matches!(
            self,
            Plus | Minus | Multiply | Slash | LeftParen | RightParen
        )
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operator::*;
        match self {
            Eq => write!(f, "="),
            Plus => write!(f, "+"),
            Minus => write!(f, "-"),
            Multiply => write!(f, "*"),
            Slash => write!(f, "/"),
            Comma => write!(f, ","),
            Semicolon => write!(f, ";"),
            LeftParen => write!(f, "("),
            RightParen => write!(f, ")"),
            LeftBlock => write!(f, "["),
            RightBlock => write!(f, "]"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Relational {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl std::fmt::Display for Relational {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Relational::*;
        match self {
            Equal => write!(f, "=="),
            NotEqual => write!(f, "<>"),
            Less => write!(f, "<"),
            LessEqual => write!(f, "<="),
            Greater => write!(f, ">"),
            GreaterEqual => write!(f, ">="),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string() {
        assert_eq!(Word::from_string("REM"), Some(Word::Rem));
        assert_eq!(Word::from_string("NAMESPACE"), Some(Word::Namespace));
        assert_eq!(Word::from_string("PICKLES"), None);
        assert_eq!(Word::from_string("print"), None);
    }

    #[test]
    fn test_every_word_round_trips_through_its_name() {
        for word in Word::ALL.iter() {
            assert_eq!(Word::from_string(word.as_str()), Some(*word));
        }
    }
}
