/*!
## Rust Machine Module

Runs tokenized BASIC lines. A [`Program`] is an ordered table of lines, an
[`Engine`] walks it against a [`Runtime`] environment kept in a
[`Registry`], and everything outside the program goes through a [`Host`].

*/

/// Index of a line inside a [`Program`].
pub type Position = usize;

mod engine;
mod entry;
mod eval;
mod host;
mod operation;
mod program;
mod registry;
mod runtime;
mod stack;
mod val;
mod var;

#[cfg(test)]
mod tests;

pub use engine::{Engine, Flow, Mode};
pub use entry::{run, Options};
pub use host::{Buffer, Host};
pub use operation::Operation;
pub use program::{split_source, Program};
pub use registry::{Registry, RuntimeId};
pub use runtime::{LoopFrame, Runtime, MAX_LOOP_COUNT};
pub use stack::Stack;
pub use val::Val;
pub use var::{Array, Var};
