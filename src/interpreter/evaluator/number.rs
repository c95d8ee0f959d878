use crate::{error::RuntimeError, interpreter::object::Object};

use super::core::EvalResult;

/// Evaluates an infix operator over two number literals.
///
/// Arithmetic goes through [`calculate`] and yields a fresh `Number`.
/// Equality compares the operands' literal *text* directly, so `1` and
/// `1.0` are unequal even though numerically equal. Comparison operators
/// parse but have no numeric evaluation yet.
pub fn eval_infix_number(op: &str, lhs: &str, rhs: &str, line: usize) -> EvalResult<Object> {
    match op {
        "+" | "-" | "*" | "/" => Ok(Object::Number(calculate(lhs, rhs, op, line)?)),
        "==" => Ok(Object::Boolean(lhs == rhs)),
        "!=" => Ok(Object::Boolean(lhs != rhs)),
        _ => Err(RuntimeError::UnsupportedOperator { op: op.to_string(), line }),
    }
}

/// Performs arithmetic over two number literals kept as text.
///
/// Representation is decided per operation: if either operand's text
/// contains a decimal point both are evaluated as floats, otherwise both
/// as 64-bit integers. The result is re-serialized to its minimal textual
/// form (no superfluous trailing zeros for floats, so `1.0 + 1` yields
/// `"2"`).
pub fn calculate(lhs: &str, rhs: &str, op: &str, line: usize) -> EvalResult<String> {
    if lhs.contains('.') || rhs.contains('.') {
        calculate_float(lhs, rhs, op, line)
    } else {
        calculate_integer(lhs, rhs, op, line)
    }
}

fn calculate_float(lhs: &str, rhs: &str, op: &str, line: usize) -> EvalResult<String> {
    let left = parse_float(lhs, line)?;
    let right = parse_float(rhs, line)?;
    let result = match op {
        "+" => left + right,
        "-" => left - right,
        "*" => left * right,
        "/" => {
            if right == 0.0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            left / right
        },
        _ => return Err(RuntimeError::UnsupportedOperator { op: op.to_string(), line }),
    };
    // f64's Display is already the shortest text that round-trips.
    Ok(format!("{result}"))
}

fn calculate_integer(lhs: &str, rhs: &str, op: &str, line: usize) -> EvalResult<String> {
    let left = parse_integer(lhs, line)?;
    let right = parse_integer(rhs, line)?;
    let result = match op {
        "+" => left.checked_add(right),
        "-" => left.checked_sub(right),
        "*" => left.checked_mul(right),
        "/" => {
            if right == 0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            // i64 division truncates toward zero.
            left.checked_div(right)
        },
        _ => return Err(RuntimeError::UnsupportedOperator { op: op.to_string(), line }),
    };
    let result = result.ok_or(RuntimeError::Overflow { line })?;
    Ok(result.to_string())
}

fn parse_float(text: &str, line: usize) -> EvalResult<f64> {
    text.parse()
        .map_err(|_| RuntimeError::InvalidNumber { literal: text.to_string(), line })
}

fn parse_integer(text: &str, line: usize) -> EvalResult<i64> {
    text.parse()
        .map_err(|_| RuntimeError::InvalidNumber { literal: text.to_string(), line })
}
