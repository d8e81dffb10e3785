use crate::lang::token::Token;

/// A runtime value. The tag is decided where the value is produced and
/// kept from then on.
#[derive(Debug, Clone, PartialEq)]
pub enum Val {
    Number(f64),
    Text(String),
}

impl Val {
    /// Types raw text by its shape: an all-digit string is a number.
    pub fn infer(s: &str) -> Val {
        if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(n) = s.parse::<f64>() {
                return Val::Number(n);
            }
        }
        Val::Text(s.to_string())
    }

    /// Re-types text by its shape. Numbers pass through.
    pub fn typed(self) -> Val {
        match self {
            Val::Text(s) => Val::infer(&s),
            number => number,
        }
    }

    /// Substitution token used by the evaluator.
    pub fn to_token(&self) -> Token {
        match self {
            Val::Number(_) => Token::Num(self.to_string()),
            Val::Text(s) => Token::Str(s.clone()),
        }
    }

    pub fn truthy(&self) -> bool {
        match self {
            Val::Number(n) => *n != 0.0,
            Val::Text(s) => !s.is_empty() && s != "FALSE",
        }
    }
}

impl From<f64> for Val {
    fn from(n: f64) -> Val {
        Val::Number(n)
    }
}

impl From<&str> for Val {
    fn from(s: &str) -> Val {
        Val::Text(s.to_string())
    }
}

impl From<String> for Val {
    fn from(s: String) -> Val {
        Val::Text(s)
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Val::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Val::Text(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_numbers_print_without_point() {
        assert_eq!(Val::Number(5.0).to_string(), "5");
        assert_eq!(Val::Number(-12.0).to_string(), "-12");
        assert_eq!(Val::Number(3.5).to_string(), "3.5");
    }

    #[test]
    fn test_infer() {
        assert_eq!(Val::infer("42"), Val::Number(42.0));
        assert_eq!(Val::infer("4.2"), Val::Text("4.2".into()));
        assert_eq!(Val::infer(""), Val::Text("".into()));
    }

    #[test]
    fn test_typed() {
        assert_eq!(Val::Text("12".into()).typed(), Val::Number(12.0));
        assert_eq!(Val::Text("-12".into()).typed(), Val::Text("-12".into()));
        assert_eq!(Val::Number(1.5).typed(), Val::Number(1.5));
    }
}
