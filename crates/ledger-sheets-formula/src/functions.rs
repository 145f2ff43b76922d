//! Built-in function library
//!
//! Covers the operators the DCF generator emits plus the conventional
//! aggregates. Range arguments arrive pre-resolved with unresolved members
//! already skipped (see the evaluator's range policy).

use crate::error::{FormulaError, FormulaResult};

/// A resolved function argument
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    /// A single numeric value
    Scalar(f64),
    /// Numeric members of a range, holes skipped
    Range(Vec<f64>),
}

impl ArgValue {
    fn flatten_into(&self, out: &mut Vec<f64>) {
        match self {
            ArgValue::Scalar(n) => out.push(*n),
            ArgValue::Range(values) => out.extend_from_slice(values),
        }
    }
}

fn flatten(args: &[ArgValue]) -> Vec<f64> {
    let mut values = Vec::new();
    for arg in args {
        arg.flatten_into(&mut values);
    }
    values
}

fn single(name: &str, args: &[ArgValue], index: usize, expected: &str) -> FormulaResult<f64> {
    match args.get(index) {
        Some(ArgValue::Scalar(n)) => Ok(*n),
        Some(ArgValue::Range(_)) => Err(FormulaError::Evaluation(format!(
            "{} expects a single value, not a range",
            name
        ))),
        None => Err(FormulaError::ArgumentCount {
            function: name.to_string(),
            expected: expected.to_string(),
            actual: args.len(),
        }),
    }
}

/// Dispatch a function call by (uppercase) name
pub fn call(name: &str, args: &[ArgValue]) -> FormulaResult<f64> {
    match name {
        "SUM" => Ok(flatten(args).iter().sum()),

        "AVERAGE" => {
            let values = flatten(args);
            if values.is_empty() {
                return Err(FormulaError::Evaluation(
                    "AVERAGE of no numeric values".into(),
                ));
            }
            Ok(values.iter().sum::<f64>() / values.len() as f64)
        }

        "MIN" => {
            let values = flatten(args);
            if values.is_empty() {
                Ok(0.0)
            } else {
                Ok(values.into_iter().fold(f64::INFINITY, f64::min))
            }
        }

        "MAX" => {
            let values = flatten(args);
            if values.is_empty() {
                Ok(0.0)
            } else {
                Ok(values.into_iter().fold(f64::NEG_INFINITY, f64::max))
            }
        }

        "COUNT" => Ok(flatten(args).len() as f64),

        "ABS" => {
            if args.len() != 1 {
                return Err(FormulaError::ArgumentCount {
                    function: "ABS".into(),
                    expected: "1".into(),
                    actual: args.len(),
                });
            }
            Ok(single("ABS", args, 0, "1")?.abs())
        }

        "ROUND" => {
            if args.is_empty() || args.len() > 2 {
                return Err(FormulaError::ArgumentCount {
                    function: "ROUND".into(),
                    expected: "1 or 2".into(),
                    actual: args.len(),
                });
            }
            let value = single("ROUND", args, 0, "1 or 2")?;
            let digits = if args.len() == 2 {
                single("ROUND", args, 1, "1 or 2")?
            } else {
                0.0
            };
            let factor = 10f64.powi(digits as i32);
            Ok((value * factor).round() / factor)
        }

        _ => Err(FormulaError::UnknownFunction(name.to_string())),
    }
}
