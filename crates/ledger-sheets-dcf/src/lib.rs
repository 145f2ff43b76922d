//! # ledger-sheets-dcf
//!
//! Programmatic synthesis of a multi-year Discounted-Cash-Flow model as a
//! ledger-sheets [`Grid`](ledger_sheets_core::Grid).
//!
//! Given a ticker's historical line items and six forward-looking assumption
//! ratios, [`generate`] produces a grid whose historical columns are reported
//! literals with derived-ratio formulas, and whose projected columns chain
//! assumption-driven formulas year over year down to unlevered free cash
//! flow. The output is pure data: evaluation happens in
//! `ledger-sheets-formula`, rendering in the host application.
//!
//! ## Example
//!
//! ```rust
//! use ledger_sheets_dcf::{generate, Assumption, DcfAssumptions, HistoricalData, ModelSpan};
//!
//! let assumptions = DcfAssumptions {
//!     revenue_growth: Assumption::from(0.08),
//!     cogs_pct_revenue: Assumption::from(0.46),
//!     sgna_pct_revenue: Assumption::from(0.20),
//!     da_pct_capex: Assumption::from(0.85),
//!     tax_rate: Assumption::from(0.21),
//!     capex_pct_revenue: Assumption::from(0.05),
//! };
//! let grid = generate(
//!     "ACME",
//!     &HistoricalData::new(),
//!     &assumptions,
//!     &ModelSpan::new(2024),
//! );
//! assert_eq!(grid.row_count(), 20);
//! ```

pub mod generator;
pub mod layout;
pub mod types;

pub use generator::generate;
pub use types::{Assumption, DcfAssumptions, FiscalYearData, HistoricalData, ModelSpan};
