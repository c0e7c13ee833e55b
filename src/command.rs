//! Command boundary: raw script records, typed commands, and their outcomes.
//!
//! Arity is checked here when an operation name and its argument list are
//! turned into a [`Command`]. The accumulator methods themselves take a
//! fixed number of parameters.

use crate::accumulator::{Accumulator, Reduction};
use crate::error::{CalcError, Result};
use crate::number::Number;
use csv::StringRecord;
use std::fmt;
use std::str::FromStr;

/// Raw command record as read from a script line.
///
/// The first field is the operation name; every following field is an
/// argument. Empty trailing fields are dropped, empty inner fields are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecord {
    /// Operation name: push, multiply, add, subtract, remove_last, clear, show
    pub op: String,

    /// Unparsed arguments
    pub args: Vec<String>,
}

impl CommandRecord {
    /// Builds a record from a CSV row. Returns `None` for blank rows.
    pub fn from_csv(record: &StringRecord) -> Option<Self> {
        let mut fields = record.iter().map(str::trim);
        let op = fields.next().filter(|f| !f.is_empty())?;

        let mut args: Vec<String> = fields.map(str::to_string).collect();
        while args.last().is_some_and(|a| a.is_empty()) {
            args.pop();
        }

        Some(CommandRecord {
            op: op.to_string(),
            args,
        })
    }

    /// Parses arguments as numbers and resolves the typed command.
    pub fn parse(&self, row: usize) -> Result<Command> {
        let args = self
            .args
            .iter()
            .map(|raw| {
                Number::from_str(raw).map_err(|e| CalcError::InvalidRecord {
                    row,
                    message: format!("'{}' is not a number: {}", raw, e),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Command::from_parts(&self.op, &args)
    }
}

/// A typed accumulator operation ready to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Append a value.
    Push(Number),

    /// Left-fold with `*`.
    Multiply,

    /// Left-fold with `+`.
    Add,

    /// Left-fold with `-`.
    Subtract,

    /// Drop the final value and report what remains.
    RemoveLast,

    /// Reset to an explicit empty sequence.
    Clear,

    /// Report the current sequence or the unset state.
    Show,
}

impl Command {
    /// Resolves an operation name and its arguments into a command.
    ///
    /// Names are matched case-insensitively. `push` takes exactly one
    /// argument and every other operation takes none; any other count fails
    /// with [`CalcError::InvalidArgumentCount`].
    pub fn from_parts(op: &str, args: &[Number]) -> Result<Self> {
        let op = op.trim().to_lowercase();

        let (name, expected) = match op.as_str() {
            "push" => ("push", 1),
            "multiply" => ("multiply", 0),
            "add" => ("add", 0),
            "subtract" => ("subtract", 0),
            "remove_last" => ("remove_last", 0),
            "clear" => ("clear", 0),
            "show" => ("show", 0),
            _ => return Err(CalcError::UnknownOperation(op)),
        };

        if args.len() != expected {
            return Err(CalcError::InvalidArgumentCount {
                op: name,
                expected,
                found: args.len(),
            });
        }

        Ok(match name {
            "push" => Command::Push(args[0]),
            "multiply" => Command::Multiply,
            "add" => Command::Add,
            "subtract" => Command::Subtract,
            "remove_last" => Command::RemoveLast,
            "clear" => Command::Clear,
            _ => Command::Show,
        })
    }

    /// Operation name used in script output.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Push(_) => "push",
            Command::Multiply => Reduction::Multiply.name(),
            Command::Add => Reduction::Add.name(),
            Command::Subtract => Reduction::Subtract.name(),
            Command::RemoveLast => "remove_last",
            Command::Clear => "clear",
            Command::Show => "show",
        }
    }

    /// Runs the command against `acc`.
    ///
    /// A failed command leaves the accumulator untouched.
    pub fn apply(&self, acc: &mut Accumulator) -> Result<Outcome> {
        let outcome = match *self {
            Command::Push(value) => {
                acc.push(value);
                Outcome::Pushed
            }
            Command::Multiply => Outcome::Scalar(acc.reduce(Reduction::Multiply)?),
            Command::Add => Outcome::Scalar(acc.reduce(Reduction::Add)?),
            Command::Subtract => Outcome::Scalar(acc.reduce(Reduction::Subtract)?),
            Command::RemoveLast => Outcome::Sequence(acc.remove_last().to_vec()),
            Command::Clear => Outcome::Sequence(acc.clear().to_vec()),
            Command::Show => match acc.values() {
                Some(values) => Outcome::Sequence(values.to_vec()),
                None => Outcome::Unset,
            },
        };

        Ok(outcome)
    }
}

/// Observable result of a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A value was appended.
    Pushed,

    /// A reduction result.
    Scalar(Number),

    /// The sequence after the command.
    Sequence(Vec<Number>),

    /// Nothing has been pushed yet.
    Unset,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Pushed => write!(f, "ok"),
            Outcome::Scalar(n) => write!(f, "{}", n),
            Outcome::Sequence(values) => {
                write!(f, "[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            Outcome::Unset => write!(f, "unset"),
        }
    }
}
