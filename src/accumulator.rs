//! The accumulator: an ordered stack of numbers with left-fold reductions.
//!
//! Distinguishes the *unset* state (nothing pushed yet) from an explicitly
//! empty sequence (after `clear`).

use crate::error::{CalcError, Result};
use crate::number::Number;

/// A binary operator folded left across the accumulated values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    Multiply,
    Add,
    Subtract,
}

impl Reduction {
    /// Operation name used in errors and script output.
    pub fn name(self) -> &'static str {
        match self {
            Reduction::Multiply => "multiply",
            Reduction::Add => "add",
            Reduction::Subtract => "subtract",
        }
    }

    fn apply(self, lhs: Number, rhs: Number) -> Option<Number> {
        match self {
            Reduction::Multiply => lhs.checked_mul(rhs),
            Reduction::Add => lhs.checked_add(rhs),
            Reduction::Subtract => lhs.checked_sub(rhs),
        }
    }
}

/// Stateful container of pushed numbers.
///
/// # States
///
/// - `values == None`: unset, nothing has been pushed since construction
/// - `values == Some(seq)`: active; `seq` may be empty after `clear`
///
/// `clear` always lands in the active state. `remove_last` and the
/// accessors never move between states.
///
/// # Empty Reductions
///
/// `multiply`, `add` and `subtract` fail with
/// [`CalcError::EmptyAccumulator`] when no value is present, whether the
/// accumulator is unset or was cleared. No identity value is substituted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accumulator {
    values: Option<Vec<Number>>,
}

impl Accumulator {
    /// Creates an accumulator in the unset state.
    pub fn new() -> Self {
        Accumulator { values: None }
    }

    /// Returns the current sequence, or `None` before the first push.
    pub fn values(&self) -> Option<&[Number]> {
        self.values.as_deref()
    }

    /// Returns `true` if nothing has been pushed since construction.
    pub fn is_unset(&self) -> bool {
        self.values.is_none()
    }

    /// Number of values held. The unset state counts as zero.
    pub fn len(&self) -> usize {
        self.values.as_ref().map_or(0, Vec::len)
    }

    /// Returns `true` if there is nothing to reduce.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a value, initializing the sequence if unset.
    pub fn push(&mut self, value: Number) {
        self.values.get_or_insert_with(Vec::new).push(value);
    }

    /// `((v0 * v1) * v2) * ...`
    pub fn multiply(&self) -> Result<Number> {
        self.reduce(Reduction::Multiply)
    }

    /// `((v0 + v1) + v2) + ...`
    pub fn add(&self) -> Result<Number> {
        self.reduce(Reduction::Add)
    }

    /// `((v0 - v1) - v2) - ...`
    ///
    /// Order-sensitive: for three or more values this is not the negation
    /// of [`add`](Self::add) past the first element.
    pub fn subtract(&self) -> Result<Number> {
        self.reduce(Reduction::Subtract)
    }

    /// Folds `op` left across the values in insertion order.
    ///
    /// Does not mutate the accumulator.
    pub fn reduce(&self, op: Reduction) -> Result<Number> {
        let values = self.values.as_deref().unwrap_or_default();
        let (first, rest) = values
            .split_first()
            .ok_or(CalcError::EmptyAccumulator { op: op.name() })?;

        rest.iter().try_fold(*first, |acc, &v| {
            op.apply(acc, v).ok_or(CalcError::Overflow { op: op.name() })
        })
    }

    /// Drops the last value if there is one and returns what remains.
    ///
    /// Popping an empty or unset accumulator is a no-op; an unset
    /// accumulator stays unset.
    pub fn remove_last(&mut self) -> &[Number] {
        match self.values.as_mut() {
            Some(values) => {
                values.pop();
                values.as_slice()
            }
            None => &[],
        }
    }

    /// Resets to an explicit empty sequence and returns it.
    pub fn clear(&mut self) -> &[Number] {
        self.values.insert(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(values: &[i64]) -> Accumulator {
        let mut acc = Accumulator::new();
        for &v in values {
            acc.push(Number::from(v));
        }
        acc
    }

    fn nums(values: &[i64]) -> Vec<Number> {
        values.iter().map(|&v| Number::from(v)).collect()
    }

    #[test]
    fn test_new_accumulator_is_unset() {
        let acc = Accumulator::new();
        assert!(acc.is_unset());
        assert_eq!(acc.values(), None);
        assert_eq!(acc.len(), 0);
    }

    #[test]
    fn test_push_initializes_and_appends() {
        let mut acc = Accumulator::new();
        acc.push(Number::from(9));
        assert_eq!(acc.values(), Some(&nums(&[9])[..]));

        acc.push(Number::from(9));
        acc.push(Number::from(1));
        assert_eq!(acc.values(), Some(&nums(&[9, 9, 1])[..]));
    }

    #[test]
    fn test_reductions_over_sample() {
        let acc = filled(&[3, 3, 2]);

        assert_eq!(acc.multiply().unwrap(), Number::from(18));
        assert_eq!(acc.add().unwrap(), Number::from(8));
        assert_eq!(acc.subtract().unwrap(), Number::from(-2));
        assert_eq!(acc.values(), Some(&nums(&[3, 3, 2])[..]));
    }

    #[test]
    fn test_single_value_reduces_to_itself() {
        let acc = filled(&[7]);
        assert_eq!(acc.multiply().unwrap(), Number::from(7));
        assert_eq!(acc.add().unwrap(), Number::from(7));
        assert_eq!(acc.subtract().unwrap(), Number::from(7));
    }

    #[test]
    fn test_reduce_on_unset_fails() {
        let acc = Accumulator::new();
        for op in [Reduction::Multiply, Reduction::Add, Reduction::Subtract] {
            match acc.reduce(op) {
                Err(CalcError::EmptyAccumulator { op: name }) => assert_eq!(name, op.name()),
                other => panic!("Expected EmptyAccumulator, got {:?}", other),
            }
        }
        assert!(acc.is_unset());
    }

    #[test]
    fn test_reduce_after_clear_fails() {
        let mut acc = filled(&[1, 2]);
        acc.clear();
        assert!(matches!(
            acc.multiply(),
            Err(CalcError::EmptyAccumulator { op: "multiply" })
        ));
    }

    #[test]
    fn test_reduce_overflow() {
        let mut acc = Accumulator::new();
        acc.push(Number::new(rust_decimal::Decimal::MAX));
        acc.push(Number::from(10));
        assert!(matches!(
            acc.multiply(),
            Err(CalcError::Overflow { op: "multiply" })
        ));
        assert_eq!(acc.len(), 2);
    }

    #[test]
    fn test_remove_last_returns_remaining() {
        let mut acc = filled(&[3, 3, 2, 1]);
        assert_eq!(acc.remove_last(), &nums(&[3, 3, 2])[..]);
        assert_eq!(acc.values(), Some(&nums(&[3, 3, 2])[..]));
    }

    #[test]
    fn test_remove_last_on_empty_is_noop() {
        let mut acc = Accumulator::new();
        assert!(acc.remove_last().is_empty());
        assert!(acc.is_unset());

        acc.clear();
        assert!(acc.remove_last().is_empty());
        assert_eq!(acc.values(), Some(&[][..]));
    }

    #[test]
    fn test_clear_is_idempotent_and_not_unset() {
        let mut acc = filled(&[4, 5]);
        assert!(acc.clear().is_empty());
        assert!(acc.clear().is_empty());
        assert!(!acc.is_unset());
        assert_eq!(acc.values(), Some(&[][..]));
    }

    #[test]
    fn test_clear_from_unset_becomes_active() {
        let mut acc = Accumulator::new();
        acc.clear();
        assert!(!acc.is_unset());
        assert!(acc.is_empty());
    }
}
