//! Carry-propagating addition
//!
//! Binary strings, decimal strings and linked-list digit sums all reduce to
//! the same column loop over least-significant-first digit vectors:
//! `digit = (a + b + carry) mod base`, `carry = (a + b + carry) / base`,
//! repeated while either operand or the carry still has something left.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{AlgorithmId, GeneratorError, StepGenerator};
use crate::execution::step::{digits_to_text, CarrySnapshot, Notation, Snapshot, StepKind};
use crate::execution::tracer::TraceRecorder;

/// Parses a conventional numeral into least-significant-first digits
fn parse_numeral(text: &str, notation: Notation, operand: &str) -> Result<Vec<u8>, GeneratorError> {
    let base = notation.base();
    text.chars()
        .rev()
        .map(|c| {
            c.to_digit(base).map(|d| d as u8).ok_or_else(|| {
                GeneratorError::invalid(format!("operand {operand} contains '{c}', which is not a base-{base} digit"))
            })
        })
        .collect()
}

/// Validates linked-list nodes, already least significant first
fn parse_nodes(nodes: &[i64], operand: &str) -> Result<Vec<u8>, GeneratorError> {
    nodes
        .iter()
        .map(|&n| {
            u8::try_from(n)
                .ok()
                .filter(|d| *d < 10)
                .ok_or_else(|| GeneratorError::invalid(format!("list {operand} holds {n}, which is not a single digit")))
        })
        .collect()
}

fn add_columns(
    recorder: &mut TraceRecorder,
    notation: Notation,
    a: Vec<u8>,
    b: Vec<u8>,
) -> Result<(), GeneratorError> {
    let base = notation.base();
    let mut result = Vec::with_capacity(a.len().max(b.len()) + 1);
    let mut carry = 0u32;
    let mut column = 0;

    while column < a.len() || column < b.len() || carry > 0 {
        let digit_a = a.get(column).copied();
        let digit_b = b.get(column).copied();
        let total = u32::from(digit_a.unwrap_or(0)) + u32::from(digit_b.unwrap_or(0)) + carry;
        let digit = (total % base) as u8;
        let carry_out = total / base;
        result.push(digit);

        let show = |d: Option<u8>| d.map_or_else(|| "-".to_string(), |d| d.to_string());
        recorder.record(
            StepKind::AddDigit,
            Snapshot::Carry(CarrySnapshot {
                notation,
                a: a.clone(),
                b: b.clone(),
                column,
                digit_a,
                digit_b,
                carry_in: carry,
                carry_out,
                result: result.clone(),
            }),
            format!(
                "Column {column}: {} + {} + carry {carry} = {total}. Write {digit}, carry {carry_out}.",
                show(digit_a),
                show(digit_b),
            ),
        )?;

        carry = carry_out;
        column += 1;
    }

    let text = digits_to_text(&result);
    let narration = match notation {
        Notation::LinkedList => format!(
            "No digits or carry remain. The sum list is {:?} (the number {text}).",
            if result.is_empty() { vec![0] } else { result.clone() }
        ),
        _ => format!("No digits or carry remain. The sum is {text}."),
    };
    recorder.record(
        StepKind::Done,
        Snapshot::Carry(CarrySnapshot {
            notation,
            a,
            b,
            column,
            digit_a: None,
            digit_b: None,
            carry_in: 0,
            carry_out: 0,
            result,
        }),
        narration,
    )?;
    Ok(())
}

/// Add Binary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddBinary {
    pub a: String,
    pub b: String,
}

impl StepGenerator for AddBinary {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::AddBinary
    }

    fn record(&self, recorder: &mut TraceRecorder) -> Result<(), GeneratorError> {
        let a = parse_numeral(&self.a, Notation::Binary, "a")?;
        let b = parse_numeral(&self.b, Notation::Binary, "b")?;
        add_columns(recorder, Notation::Binary, a, b)
    }
}

/// Add Strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddStrings {
    pub a: String,
    pub b: String,
}

impl StepGenerator for AddStrings {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::AddStrings
    }

    fn record(&self, recorder: &mut TraceRecorder) -> Result<(), GeneratorError> {
        let a = parse_numeral(&self.a, Notation::Decimal, "a")?;
        let b = parse_numeral(&self.b, Notation::Decimal, "b")?;
        add_columns(recorder, Notation::Decimal, a, b)
    }
}

/// Add Two Numbers, digits stored least significant first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddLinkedLists {
    pub a: Vec<i64>,
    pub b: Vec<i64>,
}

impl StepGenerator for AddLinkedLists {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::AddLinkedLists
    }

    fn record(&self, recorder: &mut TraceRecorder) -> Result<(), GeneratorError> {
        let a = parse_nodes(&self.a, "a")?;
        let b = parse_nodes(&self.b, "b")?;
        add_columns(recorder, Notation::LinkedList, a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorLimits;
    use crate::execution::step::{StepTrace, TraceOutcome};

    fn carry(trace: &StepTrace, index: usize) -> &CarrySnapshot {
        match &trace.steps()[index].snapshot {
            Snapshot::Carry(c) => c,
            other => panic!("unexpected snapshot {other:?}"),
        }
    }

    #[test]
    fn test_add_binary_carries_into_new_column() {
        let trace = AddBinary {
            a: "11".to_string(),
            b: "1".to_string(),
        }
        .generate(&GeneratorLimits::default());

        // columns 0, 1 and the trailing carry column, then the summary
        assert_eq!(trace.len(), 4);
        assert_eq!(carry(&trace, 0).carry_out, 1);
        let last_column = carry(&trace, 2);
        assert_eq!((last_column.digit_a, last_column.digit_b), (None, None));
        assert_eq!(last_column.carry_in, 1);
        assert_eq!(carry(&trace, 3).result_text(), "100");
    }

    #[test]
    fn test_add_strings() {
        let trace = AddStrings {
            a: "456".to_string(),
            b: "77".to_string(),
        }
        .generate(&GeneratorLimits::default());
        assert_eq!(carry(&trace, trace.last_index()).result_text(), "533");
    }

    #[test]
    fn test_add_linked_lists() {
        let trace = AddLinkedLists {
            a: vec![2, 4, 3],
            b: vec![5, 6, 4],
        }
        .generate(&GeneratorLimits::default());
        let done = carry(&trace, trace.last_index());
        assert_eq!(done.result, vec![7, 0, 8]);
        assert_eq!(done.result_text(), "807");
        assert_eq!(trace.len(), 4);
    }

    #[test]
    fn test_empty_operands_sum_to_zero() {
        let trace = AddStrings {
            a: String::new(),
            b: String::new(),
        }
        .generate(&GeneratorLimits::default());
        assert_eq!(trace.len(), 1);
        assert_eq!(carry(&trace, 0).result_text(), "0");
    }

    #[test]
    fn test_rejects_bad_digits() {
        let trace = AddBinary {
            a: "102".to_string(),
            b: "1".to_string(),
        }
        .generate(&GeneratorLimits::default());
        assert!(matches!(trace.outcome(), TraceOutcome::InvalidInput { .. }));

        let trace = AddLinkedLists {
            a: vec![1, 12],
            b: vec![],
        }
        .generate(&GeneratorLimits::default());
        assert_eq!(trace.terminal().kind, StepKind::Invalid);
    }
}
