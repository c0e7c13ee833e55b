//! # Accumulator Calc
//!
//! An in-memory arithmetic accumulator: push numbers, then fold them left
//! with multiply, add, or subtract. Values can be dropped from the end or
//! cleared entirely.
//!
//! ## Design Principles
//!
//! - **Exact arithmetic**: values are `rust_decimal` decimals, folds are checked
//! - **Unset vs. empty**: never-pushed is `None`, cleared is `Some([])`
//! - **Empty reductions fail**: no identity value is substituted
//! - **Arity at the boundary**: script commands are checked before they run
//!
//! ## Example
//!
//! ```
//! use accumulator_calc::{Accumulator, Number};
//!
//! let mut acc = Accumulator::new();
//! assert_eq!(acc.values(), None);
//!
//! for v in [3, 3, 2] {
//!     acc.push(Number::from(v));
//! }
//! assert_eq!(acc.multiply().unwrap(), Number::from(18));
//! assert_eq!(acc.add().unwrap(), Number::from(8));
//! assert_eq!(acc.subtract().unwrap(), Number::from(-2));
//! assert_eq!(acc.remove_last().len(), 2);
//! assert!(acc.clear().is_empty());
//! ```

pub mod accumulator;
pub mod command;
pub mod engine;
pub mod error;
pub mod number;
pub mod shared;

pub use accumulator::{Accumulator, Reduction};
pub use command::{Command, CommandRecord, Outcome};
pub use engine::{OutputRow, ScriptEngine, StepResult};
pub use error::{CalcError, Result};
pub use number::Number;
pub use shared::SharedAccumulator;
