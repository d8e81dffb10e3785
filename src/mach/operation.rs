use super::Val;
use crate::error;
use crate::lang::token::Relational;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

pub struct Operation {}

impl Operation {
    pub fn negate(val: Val) -> Result<Val> {
        match val {
            Val::Number(n) => Ok(Val::Number(-n)),
            Val::Text(_) => Err(error!(TypeError)),
        }
    }

    pub fn sum(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers(lhs, rhs)?;
        Operation::finite(l + r)
    }

    pub fn subtract(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers(lhs, rhs)?;
        Operation::finite(l - r)
    }

    pub fn multiply(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers(lhs, rhs)?;
        Operation::finite(l * r)
    }

    pub fn divide(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers(lhs, rhs)?;
        if r == 0.0 {
            return Err(error!(ArithmeticError; "DIVISION BY ZERO"));
        }
        Operation::finite(l / r)
    }

    /// Both sides are typed by shape first. Numbers compare numerically,
    /// anything else by its printed form.
    pub fn compare(op: Relational, lhs: &Val, rhs: &Val) -> bool {
        use std::cmp::Ordering;
        let (lhs, rhs) = (lhs.clone().typed(), rhs.clone().typed());
        let ordering = match (&lhs, &rhs) {
            (Val::Number(l), Val::Number(r)) => match l.partial_cmp(r) {
                Some(ordering) => ordering,
                None => return op == Relational::NotEqual,
            },
            _ => lhs.to_string().cmp(&rhs.to_string()),
        };
        match op {
            Relational::Equal => ordering == Ordering::Equal,
            Relational::NotEqual => ordering != Ordering::Equal,
            Relational::Less => ordering == Ordering::Less,
            Relational::LessEqual => ordering != Ordering::Greater,
            Relational::Greater => ordering == Ordering::Greater,
            Relational::GreaterEqual => ordering != Ordering::Less,
        }
    }

    fn numbers(lhs: Val, rhs: Val) -> Result<(f64, f64)> {
        match (lhs, rhs) {
            (Val::Number(l), Val::Number(r)) => Ok((l, r)),
            _ => Err(error!(TypeError)),
        }
    }

    fn finite(n: f64) -> Result<Val> {
        if n.is_finite() {
            Ok(Val::Number(n))
        } else {
            Err(error!(ArithmeticError; "OVERFLOW"))
        }
    }
}
