use super::runtime::LoopFrame;
use super::{eval, Host, Position, Program, Registry, Runtime, RuntimeId, Val};
use crate::error;
use crate::lang::token::{Operator, Token, Word};
use crate::lang::{Error, Line, LineNumber};

type Result<T> = std::result::Result<T, Error>;

/// How errors are reported when they halt an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Error line plus the offending line and the runtime's stacks.
    Dev,
    /// A single error line.
    Pro,
}

impl Default for Mode {
    fn default() -> Mode {
        Mode::Pro
    }
}

impl std::str::FromStr for Mode {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Mode, String> {
        match s.to_ascii_lowercase().as_str() {
            "dev" => Ok(Mode::Dev),
            "pro" => Ok(Mode::Pro),
            _ => Err(format!("unknown mode '{}', expected dev or pro", s)),
        }
    }
}

/// What a statement, or a whole engine, asks of whoever drives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Carry on with the next line.
    Continue,
    /// Jump to a BASIC line number.
    JumpTo(LineNumber),
    /// Continue with the line after this top-level position.
    Resume(Position),
    /// Stop the program.
    Halt,
}

/// Executes a [`Program`] against a runtime environment held in a
/// [`Registry`].
///
/// A top-level engine owns the program's position space. A child engine
/// runs the body of a conditional as a one-line program; every jump it
/// meets is handed back to its parent as a [`Flow`] instead of being
/// resolved against its own single line.
pub struct Engine<'a, H: Host + ?Sized> {
    program: &'a Program,
    registry: &'a mut Registry,
    runtime: RuntimeId,
    host: &'a mut H,
    mode: Mode,
    position: Position,
    origin: Option<Position>,
}

impl<'a, H: Host + ?Sized> Engine<'a, H> {
    /// A top-level engine with a fresh runtime registered under `name`.
    pub fn new(
        program: &'a Program,
        registry: &'a mut Registry,
        name: &str,
        mode: Mode,
        host: &'a mut H,
    ) -> Engine<'a, H> {
        let runtime = registry.register(Runtime::new(name));
        Engine {
            program,
            registry,
            runtime,
            host,
            mode,
            position: 0,
            origin: None,
        }
    }

    /// A child engine sharing the runtime registered under `name`.
    /// `origin` is the top-level position of the line that spawned it.
    pub fn attach(
        program: &'a Program,
        registry: &'a mut Registry,
        name: &str,
        mode: Mode,
        host: &'a mut H,
        origin: Position,
    ) -> Result<Engine<'a, H>> {
        let runtime = match registry.lookup(name) {
            Some(id) => id,
            None => return Err(error!(InternalError; format!("NO RUNTIME NAMED {}", name))),
        };
        Ok(Engine {
            program,
            registry,
            runtime,
            host,
            mode,
            position: 0,
            origin: Some(origin),
        })
    }

    pub fn is_child(&self) -> bool {
        self.origin.is_some()
    }

    pub fn runtime(&self) -> Option<&Runtime> {
        self.registry.get(self.runtime)
    }

    pub fn runtime_mut(&mut self) -> Option<&mut Runtime> {
        self.registry.get_mut(self.runtime)
    }

    /// Runs to completion, reporting any error through the host.
    pub fn run(&mut self) -> Flow {
        match self.execute() {
            Ok(flow) => flow,
            Err(error) => {
                self.report(&error);
                Flow::Halt
            }
        }
    }

    /// Runs to completion. Errors are returned untouched apart from being
    /// tagged with the line they happened on.
    pub fn execute(&mut self) -> Result<Flow> {
        let program = self.program;
        while let Some(line) = program.line_at(self.position) {
            let flow = self
                .step(line)
                .map_err(|e| e.in_line_number(line.number()))?;
            match flow {
                Flow::Continue => self.position += 1,
                Flow::Halt => return Ok(Flow::Halt),
                Flow::JumpTo(number) if !self.is_child() => {
                    self.position = match program.position_of(number) {
                        Some(position) => position,
                        None => {
                            return Err(error!(UndefinedLine, line.number(); number.to_string()))
                        }
                    };
                }
                Flow::Resume(position) if !self.is_child() => self.position = position + 1,
                bubbled => return Ok(bubbled),
            }
        }
        Ok(Flow::Continue)
    }

    pub fn report(&mut self, error: &Error) {
        tracing::debug!(mode = ?self.mode, %error, "engine halted");
        let mut text = format!("?{}\n", error);
        if self.mode == Mode::Dev {
            if let Some(line) = self.program.line_at(self.position) {
                text.push_str(&format!("  AT {}\n", line));
            }
            if let Some(rt) = self.registry.get(self.runtime) {
                text.push_str(&format!("  RUNTIME {} NAMESPACE {:?}\n", rt.name(), rt.namespace()));
                text.push_str(&format!("  LOOP STACK {:?}\n", rt.loops()));
                text.push_str(&format!("  CALL STACK {:?}\n", rt.calls()));
            }
        }
        self.host.diagnostic(&text);
    }

    fn rt(&mut self) -> Result<&mut Runtime> {
        let id = self.runtime;
        match self.registry.get_mut(id) {
            Some(rt) => Ok(rt),
            None => Err(error!(InternalError; format!("RUNTIME {} MISSING", id))),
        }
    }

    /// Position recorded by GOSUB and FOR: the top-level line executing.
    fn origin(&self) -> Position {
        self.origin.unwrap_or(self.position)
    }

    fn step(&mut self, line: &Line) -> Result<Flow> {
        let tokens = line.tokens();
        match tokens.first() {
            None => Err(error!(SyntaxError; "EMPTY LINE")),
            Some(Token::Static(word)) => self.command(*word, &tokens[1..], line),
            Some(Token::VarArray(name)) => self.assign_cell(name, &tokens[1..]),
            Some(Token::Var(name)) => match tokens.get(1) {
                Some(eq) if eq.is_operator(Operator::Eq) => self.assign(name, &tokens[2..]),
                _ => Err(error!(TypeError; format!("{} IS NOT FOLLOWED BY =", name))),
            },
            Some(token) => Err(error!(SyntaxError; format!("UNEXPECTED {}", token))),
        }
    }

    fn command(&mut self, word: Word, args: &[Token], line: &Line) -> Result<Flow> {
        match word {
            Word::Rem => Ok(Flow::Continue),
            Word::Print => {
                let val = self.rt()?.evaluate(args)?;
                self.host.write(&format!("{}\n", val));
                Ok(Flow::Continue)
            }
            Word::Let => self.r#let(args),
            Word::Array => self.array(args),
            Word::Input => self.input(args),
            Word::End => {
                tracing::info!(line = line.number(), "program terminated");
                Ok(Flow::Halt)
            }
            Word::Goto => Ok(Flow::JumpTo(self.target(args)?)),
            Word::Gosub => {
                let target = self.target(args)?;
                let origin = self.origin();
                self.rt()?.calls_mut().push(origin)?;
                Ok(Flow::JumpTo(target))
            }
            Word::Return => match self.rt()?.calls_mut().pop() {
                Some(position) => Ok(Flow::Resume(position)),
                None => Ok(Flow::Continue),
            },
            Word::Namespace => {
                let rt = self.rt()?;
                let namespace = rt.evaluate(args)?.to_string();
                rt.set_namespace(&namespace);
                Ok(Flow::Continue)
            }
            Word::Load => self.load(args),
            Word::Import => self.import(args),
            Word::Export => self.export(args),
            Word::Pause => {
                let seconds = number(self.rt()?.evaluate(args)?, "PAUSE")?;
                self.host.delay(seconds.max(0.0));
                Ok(Flow::Continue)
            }
            Word::If => self.branch(args, line),
            Word::For => self.r#for(args),
            Word::Next => self.next(args),
            _ => Err(error!(UndefinedToken; word.as_str())),
        }
    }

    fn assign(&mut self, name: &str, expr: &[Token]) -> Result<Flow> {
        let rt = self.rt()?;
        let val = rt.evaluate(expr)?;
        rt.set_variable(name, val)?;
        Ok(Flow::Continue)
    }

    fn assign_cell(&mut self, name: &str, rest: &[Token]) -> Result<Flow> {
        let (groups, used) = eval::index_groups(rest)?;
        match rest.get(used) {
            Some(eq) if eq.is_operator(Operator::Eq) => {}
            _ => return Err(error!(LetError; format!("{}[] IS NOT FOLLOWED BY =", name))),
        }
        let rt = self.rt()?;
        let indices = rt.indices(&groups)?;
        let val = rt.evaluate(&rest[used + 1..])?;
        rt.update_array_cell(name, &indices, val)?;
        Ok(Flow::Continue)
    }

    fn r#let(&mut self, args: &[Token]) -> Result<Flow> {
        match args {
            [Token::Var(name), eq, expr @ ..] if eq.is_operator(Operator::Eq) => {
                self.assign(name, expr)
            }
            [Token::VarArray(name), rest @ ..] => self.assign_cell(name, rest),
            _ => Err(error!(LetError; listing(args))),
        }
    }

    fn array(&mut self, args: &[Token]) -> Result<Flow> {
        let name = match args.first() {
            Some(Token::Var(name)) => name,
            _ => return Err(error!(ArraySyntax; "ARRAY NEEDS A NAME")),
        };
        let rt = self.rt()?;
        let dimension = match args.get(1) {
            None => 1,
            Some(comma) if comma.is_operator(Operator::Comma) => match rt.evaluate(&args[2..])? {
                Val::Number(n) if n >= 1.0 && n.fract() == 0.0 => n as usize,
                val => return Err(error!(ArraySyntax; format!("INVALID DIMENSION {}", val))),
            },
            Some(_) => return Err(error!(ArraySyntax; listing(args))),
        };
        rt.create_array(name, dimension)?;
        Ok(Flow::Continue)
    }

    fn input(&mut self, args: &[Token]) -> Result<Flow> {
        let (prompt, target) = match args.iter().position(|t| t.is_operator(Operator::Semicolon)) {
            Some(at) => (&args[..at], &args[at + 1..]),
            None => (&args[..0], args),
        };
        let name = match target {
            [Token::Var(name)] => name,
            _ => return Err(error!(SyntaxError; "INPUT NEEDS ; VARIABLE")),
        };
        let prompt = self.rt()?.evaluate(prompt)?.to_string();
        let reply = self.host.request_input(&prompt);
        self.rt()?.set_variable(name, Val::Text(reply))?;
        Ok(Flow::Continue)
    }

    fn target(&mut self, args: &[Token]) -> Result<LineNumber> {
        match self.rt()?.evaluate(args)? {
            Val::Number(n) if n >= 0.0 && n.fract() == 0.0 && n <= LineNumber::max_value() as f64 => {
                Ok(n as LineNumber)
            }
            Val::Text(s) => match s.parse::<LineNumber>() {
                Ok(n) if s.chars().all(|c| c.is_ascii_digit()) => Ok(n),
                _ => Err(error!(UndefinedLine; s)),
            },
            val => Err(error!(UndefinedLine; val.to_string())),
        }
    }

    fn load(&mut self, args: &[Token]) -> Result<Flow> {
        let name = match args {
            [Token::Var(name)] => name,
            _ => return Err(error!(SyntaxError; "LOAD NEEDS NOW, MS OR SEC")),
        };
        let millis = match name.as_str() {
            "NOW" | "MS" | "SEC" => self.host.now_millis(),
            _ => {
                tracing::warn!(%name, "LOAD ignored; expected NOW, MS or SEC");
                return Ok(Flow::Continue);
            }
        };
        let val = if name == "SEC" {
            millis.div_euclid(1000) as f64
        } else {
            millis as f64
        };
        self.rt()?.set_variable(name, Val::Number(val))?;
        Ok(Flow::Continue)
    }

    fn import(&mut self, args: &[Token]) -> Result<Flow> {
        let at = match args.iter().position(|t| t.is_word(Word::As)) {
            Some(at) => at,
            None => return Err(error!(SyntaxError; "IMPORT WITHOUT AS")),
        };
        let name = match &args[at + 1..] {
            [Token::Var(name)] => name,
            _ => return Err(error!(SyntaxError; "IMPORT NEEDS AS VARIABLE")),
        };
        let path = self.rt()?.evaluate(&args[..at])?.to_string();
        match self.host.load_module(&path) {
            Ok(handle) => self.rt()?.set_variable(name, handle)?,
            Err(reason) => tracing::warn!(%path, %reason, "IMPORT failed; continuing"),
        }
        Ok(Flow::Continue)
    }

    fn export(&mut self, args: &[Token]) -> Result<Flow> {
        let name = match args {
            [Token::Var(name)] => name,
            _ => return Err(error!(SyntaxError; "EXPORT NEEDS A VARIABLE")),
        };
        let rt = self.rt()?;
        let qualified = rt.resolve(name);
        let val = rt.get_variable(name)?;
        self.host.export(&qualified, &val);
        Ok(Flow::Continue)
    }

    fn branch(&mut self, args: &[Token], line: &Line) -> Result<Flow> {
        let then_at = match args.iter().position(|t| t.is_word(Word::Then)) {
            Some(at) => at,
            None => return Err(error!(SyntaxError; "IF WITHOUT THEN")),
        };
        let else_at = args[then_at + 1..]
            .iter()
            .position(|t| t.is_word(Word::Else))
            .map(|at| at + then_at + 1);
        let (then_body, else_body) = match else_at {
            Some(at) => (&args[then_at + 1..at], Some(&args[at + 1..])),
            None => (&args[then_at + 1..], None),
        };
        let body = if self.rt()?.condition(&args[..then_at]) {
            then_body
        } else {
            match else_body {
                Some(body) => body,
                None => return Ok(Flow::Continue),
            }
        };
        self.spawn(line.number(), body)
    }

    /// Runs `body` in a child engine that shares this engine's runtime.
    fn spawn(&mut self, number: LineNumber, body: &[Token]) -> Result<Flow> {
        let program = Program::synthetic(number, body.to_vec());
        let name = self.rt()?.name().to_string();
        let origin = self.origin();
        let mut child = Engine::attach(
            &program,
            &mut *self.registry,
            &name,
            self.mode,
            &mut *self.host,
            origin,
        )?;
        child.execute()
    }

    fn r#for(&mut self, args: &[Token]) -> Result<Flow> {
        let (name, rest) = match args {
            [Token::Var(name), eq, rest @ ..] if eq.is_operator(Operator::Eq) => (name, rest),
            _ => return Err(error!(LetError; format!("FOR {}", listing(args)))),
        };
        let to_at = match rest.iter().position(|t| t.is_word(Word::To)) {
            Some(at) => at,
            None => return Err(error!(SyntaxError; "FOR WITHOUT TO")),
        };
        let (goal, step) = match rest.iter().position(|t| t.is_word(Word::Step)) {
            Some(at) if at > to_at => (&rest[to_at + 1..at], Some(&rest[at + 1..])),
            Some(_) => return Err(error!(SyntaxError; "STEP BEFORE TO")),
            None => (&rest[to_at + 1..], None),
        };
        let anchor = self.origin();
        let rt = self.rt()?;
        let start = rt.evaluate(&rest[..to_at])?;
        rt.set_variable(name, start)?;
        let goal = number(rt.evaluate(goal)?, "FOR GOAL")?;
        let step = match step {
            Some(step) => number(rt.evaluate(step)?, "FOR STEP")?,
            None => 1.0,
        };
        rt.loops_mut().push(LoopFrame {
            var_name: name.clone(),
            goal,
            step,
            anchor,
            count: 0,
        })?;
        Ok(Flow::Continue)
    }

    fn next(&mut self, args: &[Token]) -> Result<Flow> {
        let named = match args {
            [] => None,
            [Token::Var(name)] => Some(name),
            _ => return Err(error!(SyntaxError; format!("NEXT {}", listing(args)))),
        };
        let rt = self.rt()?;
        let frame = match rt.loops_mut().last_mut() {
            Some(frame) => frame,
            None => return Err(error!(ForLoopMismatch; "NEXT WITHOUT FOR")),
        };
        if let Some(name) = named {
            if *name != frame.var_name {
                return Err(error!(ForLoopMismatch; format!(
                    "NEXT {} INSIDE FOR {}",
                    name, frame.var_name
                )));
            }
        }
        frame.tick()?;
        let frame = frame.clone();
        let value = number(rt.get_variable(&frame.var_name)?, &frame.var_name)?;
        if frame.finished(value) {
            rt.loops_mut().pop();
            rt.clear_variable(&frame.var_name);
            Ok(Flow::Continue)
        } else {
            rt.set_variable(&frame.var_name, Val::Number(value + frame.step))?;
            Ok(Flow::Resume(frame.anchor))
        }
    }
}

fn number(val: Val, what: &str) -> Result<f64> {
    match val {
        Val::Number(n) => Ok(n),
        Val::Text(s) => Err(error!(TypeError; format!("{} IS NOT A NUMBER: {}", what, s))),
    }
}

fn listing(tokens: &[Token]) -> String {
    let s: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    s.join(" ")
}
