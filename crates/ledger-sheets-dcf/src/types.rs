//! Input types for the DCF model generator

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One forward-looking assumption ratio
///
/// When sourced from an LLM tool call the rationale carries the model's
/// stated justification; manual inputs leave it empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumption {
    /// Fractional ratio (0.08 = 8%)
    pub value: f64,
    /// Human-readable justification, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

impl From<f64> for Assumption {
    fn from(value: f64) -> Self {
        Self {
            value,
            rationale: None,
        }
    }
}

/// The six assumption ratios driving the projected columns
///
/// Validation (finiteness, plausible ranges) happens upstream at the
/// tool-call boundary; the generator takes these as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DcfAssumptions {
    /// Year-over-year revenue growth
    pub revenue_growth: Assumption,
    /// COGS as a fraction of revenue
    pub cogs_pct_revenue: Assumption,
    /// SG&A as a fraction of revenue
    pub sgna_pct_revenue: Assumption,
    /// D&A as a fraction of capex
    pub da_pct_capex: Assumption,
    /// Effective tax rate on EBIT
    pub tax_rate: Assumption,
    /// Capex as a fraction of revenue
    pub capex_pct_revenue: Assumption,
}

/// Reported line items for one fiscal year, in millions
///
/// All fields default to 0 so a partially-populated payload still
/// deserializes; missing line items flow into the grid as zeros (the
/// documented silent-default policy).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FiscalYearData {
    pub revenue: f64,
    pub cogs: f64,
    pub sgna: f64,
    pub depreciation_amortization: f64,
    pub capex: f64,
    pub taxes: f64,
    pub change_in_nwc: f64,
}

/// Historical line items keyed by fiscal year
pub type HistoricalData = BTreeMap<i32, FiscalYearData>;

/// The span of year columns in a generated model
///
/// Column years run `current_year + start ..= current_year + end`; a year at
/// or before `current_year` is a historical column, later years are
/// projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSpan {
    /// The model's "current" fiscal year
    pub current_year: i32,
    /// First column offset relative to the current year (inclusive)
    pub start: i32,
    /// Last column offset relative to the current year (inclusive)
    pub end: i32,
}

impl ModelSpan {
    /// The standard 19-year span: 8 trailing years, the current year, and
    /// 10 forward years
    pub fn new(current_year: i32) -> Self {
        Self {
            current_year,
            start: -8,
            end: 10,
        }
    }

    /// A custom span of offsets around the current year
    pub fn with_range(current_year: i32, start: i32, end: i32) -> Self {
        Self {
            current_year,
            start,
            end,
        }
    }

    /// Iterate the column years, earliest first
    pub fn years(&self) -> impl Iterator<Item = i32> {
        (self.current_year + self.start)..=(self.current_year + self.end)
    }

    /// Check whether a year falls in the historical part of the span
    pub fn is_historical(&self, year: i32) -> bool {
        year <= self.current_year
    }
}
