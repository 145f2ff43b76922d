//! Cell model: formats, values, evaluation state

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display format of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellFormat {
    /// Numeric value with locale grouping
    Number,
    /// Fractional value rendered as `value * 100` with a trailing `%`
    Percentage,
    /// Plain text
    Text,
}

/// Source value of a cell
///
/// A `Text` value beginning with `=` is a formula source; everything else is
/// a literal. On the wire this is a bare JSON number or string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Numeric literal
    Number(f64),
    /// Text literal or formula source
    Text(String),
}

impl CellValue {
    /// Check whether this value is a formula source
    pub fn is_formula(&self) -> bool {
        matches!(self, CellValue::Text(s) if s.starts_with('='))
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

/// Per-cell evaluation error code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellError {
    /// Cycle, errored/empty reference used as a number, or divide-by-zero
    Unresolved,
    /// Malformed formula syntax or unknown function name
    Name,
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellError::Unresolved => write!(f, "#ERROR!"),
            CellError::Name => write!(f, "#NAME?"),
        }
    }
}

/// Evaluation cache state of a cell
///
/// `NotEvaluated` means the evaluator has not visited the cell since its value
/// last changed; `Evaluated(None)` means it was visited but produced no
/// numeric result (e.g. a text cell, or a formula that errored).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EvalState {
    /// No result cached yet
    #[default]
    NotEvaluated,
    /// Cached result of the last evaluation pass
    Evaluated(Option<f64>),
}

/// One addressable grid position
///
/// Holds the source value (literal or formula), the display format, the cached
/// evaluation result, an optional error code, and an opaque style tag. Only
/// `format`, `value` and `style` travel on the wire; evaluation state is
/// always rebuilt by the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    format: CellFormat,
    value: CellValue,
    #[serde(skip)]
    evaluated: EvalState,
    #[serde(skip)]
    error: Option<CellError>,
    #[serde(
        rename = "className",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    style: Option<String>,
}

impl Cell {
    /// Create a cell with the given format and value
    pub fn new(format: CellFormat, value: CellValue) -> Self {
        Self {
            format,
            value,
            evaluated: EvalState::NotEvaluated,
            error: None,
            style: None,
        }
    }

    /// Create a Number-format cell holding a numeric literal
    pub fn number(n: f64) -> Self {
        Self::new(CellFormat::Number, CellValue::Number(n))
    }

    /// Create a Percentage-format cell holding a fractional literal
    pub fn percentage(n: f64) -> Self {
        Self::new(CellFormat::Percentage, CellValue::Number(n))
    }

    /// Create a Text-format cell
    pub fn text<S: Into<String>>(s: S) -> Self {
        Self::new(CellFormat::Text, CellValue::Text(s.into()))
    }

    /// Create a formula cell with the given display format
    pub fn formula<S: Into<String>>(format: CellFormat, source: S) -> Self {
        Self::new(format, CellValue::Text(source.into()))
    }

    /// Create an empty Text cell
    pub fn empty() -> Self {
        Self::text("")
    }

    /// Attach a style tag (builder style)
    pub fn with_style<S: Into<String>>(mut self, style: S) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Get the display format
    pub fn format(&self) -> CellFormat {
        self.format
    }

    /// Get the source value
    pub fn value(&self) -> &CellValue {
        &self.value
    }

    /// Get the style tag, if any
    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// Set the style tag
    pub fn set_style(&mut self, style: Option<String>) {
        self.style = style;
    }

    /// Check whether the cell holds a formula
    pub fn is_formula(&self) -> bool {
        self.value.is_formula()
    }

    /// Get the formula source (including the leading `=`) if this is a formula cell
    pub fn formula_source(&self) -> Option<&str> {
        match &self.value {
            CellValue::Text(s) if s.starts_with('=') => Some(s),
            _ => None,
        }
    }

    /// Get the literal numeric value, if the cell holds one
    pub fn literal_number(&self) -> Option<f64> {
        match &self.value {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }

    /// Check whether the cell is an empty Text cell
    pub fn is_empty(&self) -> bool {
        matches!(&self.value, CellValue::Text(s) if s.is_empty())
    }

    /// Replace the source value, invalidating the evaluation cache
    pub fn set_value(&mut self, value: CellValue) {
        self.value = value;
        self.evaluated = EvalState::NotEvaluated;
        self.error = None;
    }

    /// Get the evaluation cache state
    pub fn eval_state(&self) -> EvalState {
        self.evaluated
    }

    /// Get the cached numeric result, if one is present
    pub fn cached_result(&self) -> Option<f64> {
        match self.evaluated {
            EvalState::Evaluated(v) => v,
            EvalState::NotEvaluated => None,
        }
    }

    /// Get the evaluation error, if any
    pub fn error(&self) -> Option<CellError> {
        self.error
    }

    /// Record an evaluation result
    pub fn cache_result(&mut self, result: Option<f64>) {
        self.evaluated = EvalState::Evaluated(result);
        self.error = None;
    }

    /// Record an evaluation failure
    pub fn mark_error(&mut self, error: CellError) {
        self.evaluated = EvalState::Evaluated(None);
        self.error = Some(error);
    }

    /// Reset the evaluation cache and error
    pub fn invalidate(&mut self) {
        self.evaluated = EvalState::NotEvaluated;
        self.error = None;
    }

    /// Render the cell for display
    ///
    /// An error code takes precedence over any value. Formula cells render
    /// their cached result (or their source, if not yet evaluated); literals
    /// render per their format.
    pub fn display(&self) -> String {
        if let Some(e) = self.error {
            return e.to_string();
        }

        if self.is_formula() {
            return match self.evaluated {
                EvalState::Evaluated(Some(n)) => self.render_number(n),
                EvalState::Evaluated(None) => String::new(),
                EvalState::NotEvaluated => match &self.value {
                    CellValue::Text(s) => s.clone(),
                    CellValue::Number(n) => self.render_number(*n),
                },
            };
        }

        match &self.value {
            CellValue::Number(n) => self.render_number(*n),
            CellValue::Text(s) => s.clone(),
        }
    }

    fn render_number(&self, n: f64) -> String {
        match self.format {
            CellFormat::Percentage => format!("{:.1}%", n * 100.0),
            CellFormat::Number | CellFormat::Text => group_thousands(n),
        }
    }
}

/// Format a number with thousands grouping
///
/// Integers render without decimals; fractional values keep two decimal places.
fn group_thousands(n: f64) -> String {
    let negative = n < 0.0;
    let abs = n.abs();
    let formatted = if abs.fract() == 0.0 {
        format!("{:.0}", abs)
    } else {
        format!("{:.2}", abs)
    };

    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::new();
    let digits = int_part.len();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}
