//! Static row layout of the DCF model grid
//!
//! The row for each line item is fixed, not data-driven: formulas emitted by
//! the generator reference these rows by their A1 display number (row + 1).
//! Column 0 holds labels; year columns start at 1.

/// Header row (ticker + year labels)
pub const ROW_HEADER: u32 = 0;
/// Revenue
pub const ROW_REVENUE: u32 = 1;
/// Revenue growth, year over year
pub const ROW_REVENUE_GROWTH: u32 = 2;
/// Cost of goods sold (stored negative)
pub const ROW_COGS: u32 = 3;
/// COGS as a fraction of revenue
pub const ROW_COGS_MARGIN: u32 = 4;
/// Gross profit
pub const ROW_GROSS_PROFIT: u32 = 5;
/// Selling, general & administrative (stored negative)
pub const ROW_SGNA: u32 = 6;
/// SG&A as a fraction of revenue
pub const ROW_SGNA_MARGIN: u32 = 7;
/// EBITDA
pub const ROW_EBITDA: u32 = 8;
/// EBITDA margin
pub const ROW_EBITDA_MARGIN: u32 = 9;
/// Depreciation & amortization (stored positive)
pub const ROW_DA: u32 = 10;
/// D&A as a fraction of capex
pub const ROW_DA_PCT_CAPEX: u32 = 11;
/// EBIT
pub const ROW_EBIT: u32 = 12;
/// Taxes (stored negative)
pub const ROW_TAXES: u32 = 13;
/// Effective tax rate
pub const ROW_TAX_RATE: u32 = 14;
/// Net operating profit after tax
pub const ROW_NOPAT: u32 = 15;
/// Capital expenditure (stored negative)
pub const ROW_CAPEX: u32 = 16;
/// Capex as a fraction of revenue
pub const ROW_CAPEX_PCT_REVENUE: u32 = 17;
/// Change in net working capital (stored negative)
pub const ROW_CHANGE_IN_NWC: u32 = 18;
/// Unlevered free cash flow
pub const ROW_UFCF: u32 = 19;

/// Total number of rows in a generated model
pub const ROW_COUNT: u32 = 20;

/// Label text for a layout row
pub fn row_label(row: u32) -> &'static str {
    match row {
        ROW_HEADER => "",
        ROW_REVENUE => "Revenue",
        ROW_REVENUE_GROWTH => "Revenue Growth",
        ROW_COGS => "COGS",
        ROW_COGS_MARGIN => "COGS Margin",
        ROW_GROSS_PROFIT => "Gross Profit",
        ROW_SGNA => "SG&A",
        ROW_SGNA_MARGIN => "SG&A Margin",
        ROW_EBITDA => "EBITDA",
        ROW_EBITDA_MARGIN => "EBITDA Margin",
        ROW_DA => "D&A",
        ROW_DA_PCT_CAPEX => "D&A % of Capex",
        ROW_EBIT => "EBIT",
        ROW_TAXES => "Taxes",
        ROW_TAX_RATE => "Effective Tax Rate",
        ROW_NOPAT => "NOPAT",
        ROW_CAPEX => "Capex",
        ROW_CAPEX_PCT_REVENUE => "Capex % of Revenue",
        ROW_CHANGE_IN_NWC => "Change in NWC",
        ROW_UFCF => "Unlevered Free Cash Flow",
        _ => "",
    }
}

/// Style tags emitted as cell `className` metadata
///
/// The interactive surface maps these to locked-cell styling (historical vs
/// projected) and input highlighting; the core attaches no meaning to them.
pub mod style {
    /// Ticker cell and year labels over historical columns
    pub const HEADER_HISTORICAL: &str = "header historical";
    /// Year labels over projected columns
    pub const HEADER_PROJECTED: &str = "header projected";
    /// Line-item label column
    pub const LABEL: &str = "label";
    /// Reported literal in a historical column
    pub const HISTORICAL: &str = "historical";
    /// Ratio/subtotal formula over historical literals
    pub const HISTORICAL_DERIVED: &str = "historical derived";
    /// Assumption-driven formula in a projected column
    pub const PROJECTED: &str = "projected";
    /// Editable assumption literal in a projected column
    pub const ASSUMPTION_INPUT: &str = "assumption input";
}
