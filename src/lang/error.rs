use super::LineNumber;

#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    line_number: Option<LineNumber>,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, $line:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line_number: None,
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn line_number(&self) -> Option<LineNumber> {
        self.line_number
    }

    pub fn detail(&self) -> &str {
        &self.message
    }

    /// Attaches a line number unless one is already present. Errors raised
    /// inside a conditional body keep the line they were first tagged with.
    pub fn in_line_number(self, line: LineNumber) -> Error {
        Error {
            line_number: self.line_number.or(Some(line)),
            ..self
        }
    }

    pub fn message<S: AsRef<str>>(self, message: S) -> Error {
        debug_assert_eq!(self.message.len(), 0);
        Error {
            message: message.as_ref().to_string(),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    LexError = 1,
    SyntaxError = 2,
    UndefinedToken = 3,
    LetError = 4,
    ArrayArity = 5,
    ArraySyntax = 6,
    ForLoopMismatch = 7,
    RunawayLoop = 8,
    VariableNotDeclared = 9,
    ArrayNotDeclared = 10,
    ArithmeticError = 11,
    StringEvalError = 12,
    TypeError = 13,
    UndefinedLine = 14,
    OutOfMemory = 15,
    InternalError = 51,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        use ErrorCode::*;
        match self {
            LexError => "LEX ERROR",
            SyntaxError => "SYNTAX ERROR",
            UndefinedToken => "UNDEFINED TOKEN",
            LetError => "LET ERROR",
            ArrayArity => "ARRAY ARITY ERROR",
            ArraySyntax => "ARRAY SYNTAX ERROR",
            ForLoopMismatch => "FOR LOOP MISMATCH",
            RunawayLoop => "RUNAWAY LOOP",
            VariableNotDeclared => "VARIABLE NOT DECLARED",
            ArrayNotDeclared => "ARRAY NOT DECLARED",
            ArithmeticError => "ARITHMETIC ERROR",
            StringEvalError => "STRING EVAL ERROR",
            TypeError => "TYPE ERROR",
            UndefinedLine => "UNDEFINED LINE",
            OutOfMemory => "OUT OF MEMORY",
            InternalError => "INTERNAL ERROR",
        }
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut suffix = String::new();
        if let Some(line_number) = self.line_number {
            suffix.push_str(&format!(" {}", line_number));
        }
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        if self.line_number.is_some() {
            write!(f, "{} IN{}", self.code.as_str(), suffix)
        } else {
            write!(f, "{}{}", self.code.as_str(), suffix)
        }
    }
}

impl std::error::Error for Error {}
