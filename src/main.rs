//! # BASIC
//!
//! Runs a line-numbered BASIC program from a file or stdin.
//!

mod term;

fn main() {
    term::main()
}
