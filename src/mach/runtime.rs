use super::var::Array;
use super::{eval, Operation, Position, Stack, Val, Var};
use crate::error;
use crate::lang::token::Token;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// Iterations the innermost loop may run before it is considered runaway.
pub const MAX_LOOP_COUNT: usize = 100_000;

#[derive(Debug, Clone, PartialEq)]
pub struct LoopFrame {
    pub var_name: String,
    pub goal: f64,
    pub step: f64,
    pub anchor: Position,
    pub count: usize,
}

impl LoopFrame {
    pub fn tick(&mut self) -> Result<()> {
        self.count += 1;
        if self.count > MAX_LOOP_COUNT {
            return Err(error!(RunawayLoop; format!(
                "{} PASSED {} ITERATIONS",
                self.var_name, MAX_LOOP_COUNT
            )));
        }
        Ok(())
    }

    pub fn finished(&self, value: f64) -> bool {
        if self.step < 0.0 {
            value + self.step < self.goal
        } else {
            value + self.step > self.goal
        }
    }
}

/// Runtime environment of one function set: variables, arrays, the active
/// namespace and the GOSUB and FOR stacks.
#[derive(Debug)]
pub struct Runtime {
    name: String,
    var: Var,
    namespace: String,
    calls: Stack<Position>,
    loops: Stack<LoopFrame>,
}

impl Runtime {
    pub fn new(name: &str) -> Runtime {
        Runtime {
            name: name.to_string(),
            var: Var::new(),
            namespace: String::new(),
            calls: Stack::new("CALL STACK OVERFLOW"),
            loops: Stack::new("LOOP STACK OVERFLOW"),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn set_namespace(&mut self, namespace: &str) {
        self.namespace = namespace.to_string();
    }

    pub fn resolve(&self, name: &str) -> String {
        if name.contains('@') || self.namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}@{}", self.namespace, name)
        }
    }

    pub fn get_variable(&self, name: &str) -> Result<Val> {
        self.var.fetch(&self.resolve(name))
    }

    pub fn set_variable(&mut self, name: &str, value: Val) -> Result<()> {
        let name = self.resolve(name);
        self.var.store(&name, value.typed())
    }

    pub fn clear_variable(&mut self, name: &str) -> Option<Val> {
        let name = self.resolve(name);
        self.var.remove(&name)
    }

    pub fn get_array(&self, name: &str) -> Result<&Array> {
        self.var.array(&self.resolve(name))
    }

    pub fn create_array(&mut self, name: &str, dimension: usize) -> Result<()> {
        let name = self.resolve(name);
        self.var.dimension_array(&name, dimension)
    }

    pub fn update_array_cell(&mut self, name: &str, indices: &[Val], value: Val) -> Result<()> {
        let name = self.resolve(name);
        self.var.store_array(&name, indices, value.typed())
    }

    pub fn array_cell(&self, name: &str, indices: &[Val]) -> Result<Val> {
        self.var.fetch_array(&self.resolve(name), indices)
    }

    pub fn var(&self) -> &Var {
        &self.var
    }

    pub fn calls(&self) -> &Stack<Position> {
        &self.calls
    }

    pub fn calls_mut(&mut self) -> &mut Stack<Position> {
        &mut self.calls
    }

    pub fn loops(&self) -> &Stack<LoopFrame> {
        &self.loops
    }

    pub fn loops_mut(&mut self) -> &mut Stack<LoopFrame> {
        &mut self.loops
    }

    /// Evaluates each bracketed index expression.
    pub fn indices(&self, groups: &[&[Token]]) -> Result<Vec<Val>> {
        groups.iter().map(|group| self.evaluate(group)).collect()
    }

    /// Substitutes the current value of every variable and array cell.
    pub fn translate(&self, tokens: &[Token]) -> Result<Vec<Token>> {
        let mut out = Vec::with_capacity(tokens.len());
        let mut i = 0;
        while i < tokens.len() {
            match &tokens[i] {
                Token::Var(name) => {
                    if self.var.contains_array(&self.resolve(name)) {
                        self.array_cell(name, &[])?;
                    }
                    out.push(self.get_variable(name)?.to_token());
                }
                Token::VarArray(name) => {
                    let (groups, used) = eval::index_groups(&tokens[i + 1..])?;
                    let indices = self.indices(&groups)?;
                    out.push(self.array_cell(name, &indices)?.to_token());
                    i += used;
                }
                token => out.push(token.clone()),
            }
            i += 1;
        }
        Ok(out)
    }

    pub fn evaluate(&self, tokens: &[Token]) -> Result<Val> {
        let tokens = self.translate(tokens)?;
        match eval::arithmetic(&tokens) {
            Some(result) => result,
            None => eval::concatenate(&tokens),
        }
    }

    /// Evaluates an IF condition. Failures are logged and read as false.
    pub fn condition(&self, tokens: &[Token]) -> bool {
        match self.try_condition(tokens) {
            Ok(b) => b,
            Err(error) => {
                tracing::warn!(runtime = %self.name, %error, "condition failed; taking it as false");
                false
            }
        }
    }

    fn try_condition(&self, tokens: &[Token]) -> Result<bool> {
        let ops: Vec<usize> = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_relational())
            .map(|(i, _)| i)
            .collect();
        match ops.as_slice() {
            [] => Ok(self.evaluate(tokens)?.truthy()),
            [i] => {
                let op = match &tokens[*i] {
                    Token::Relational(op) => *op,
                    _ => return Err(error!(InternalError)),
                };
                let lhs = self.evaluate(&tokens[..*i])?;
                let rhs = self.evaluate(&tokens[*i + 1..])?;
                Ok(Operation::compare(op, &lhs, &rhs))
            }
            _ => Err(error!(SyntaxError; "MORE THAN ONE RELATIONAL OPERATOR")),
        }
    }
}
