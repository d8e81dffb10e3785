//! # Line BASIC
//!
//! A line-numbered BASIC with GOTO, GOSUB, FOR/NEXT and IF/THEN/ELSE,
//! arrays of any dimension, namespaced variables and a small host
//! interface for input, clocks, delays and module import.
//!
//! ```
//! use basic::mach::{run, Buffer, Options, Val};
//!
//! let mut host = Buffer::new();
//! let source = "10 FOR I = 1 TO 3\n20 PRINT \"I=\" + I\n30 NEXT I";
//! let none: Vec<(String, Val)> = vec![];
//! let output = run(source, &Options::default(), none, &mut host);
//! assert_eq!(output, "I=1\nI=2\nI=3\n");
//! ```

pub mod lang;
pub mod mach;
