//! DCF model grid synthesis
//!
//! Produces a fully-populated [`Grid`] for one ticker: historical columns as
//! reported literals with derived-ratio formulas, projected columns as
//! assumption-driven formulas chained across years. Deterministic: no clocks,
//! no randomness, no I/O.
//!
//! Sign convention: expense line items (COGS, SG&A, Taxes, Capex, ΔNWC) are
//! stored negated so every subtotal is an addition; D&A is stored positive
//! because it is subtracted into EBIT and added back into UFCF. Ratio
//! formulas negate the expense so margins display positive.

use crate::layout::*;
use crate::types::{DcfAssumptions, FiscalYearData, HistoricalData, ModelSpan};
use ledger_sheets_core::{Cell, CellFormat, Coord, Grid};

/// Generate the DCF model grid for a ticker
///
/// Historical line items missing from the dataset default to 0 rather than
/// failing (documented policy; a column with no reported data will surface
/// `#ERROR!` in its ratio rows when evaluated, since its denominators are
/// zero). Assumptions are taken as given; validation is the caller's
/// responsibility.
pub fn generate(
    ticker: &str,
    historical: &HistoricalData,
    assumptions: &DcfAssumptions,
    span: &ModelSpan,
) -> Grid {
    let mut rows: Vec<Vec<Cell>> = (0..ROW_COUNT)
        .map(|row| {
            let cell = if row == ROW_HEADER {
                Cell::text(ticker).with_style(style::HEADER_HISTORICAL)
            } else {
                Cell::text(row_label(row)).with_style(style::LABEL)
            };
            vec![cell]
        })
        .collect();

    for (i, year) in span.years().enumerate() {
        let col = i as u32 + 1;
        let cur = Coord::column_to_letters(col);
        let prev = if i == 0 {
            None
        } else {
            Some(Coord::column_to_letters(col - 1))
        };

        if span.is_historical(year) {
            let data = historical.get(&year).copied().unwrap_or_default();
            push_historical_column(&mut rows, year, &cur, prev.as_deref(), &data);
        } else {
            push_projected_column(&mut rows, year, &cur, prev.as_deref(), assumptions);
        }
    }

    Grid::from_rows(rows)
}

/// A1 display address for a layout row in the given column
fn a1(letter: &str, row: u32) -> String {
    format!("{}{}", letter, row + 1)
}

fn push(rows: &mut [Vec<Cell>], row: u32, cell: Cell) {
    rows[row as usize].push(cell);
}

/// A historical column: reported literals plus ratio formulas over them, so
/// editing a literal recomputes the ratios in place.
fn push_historical_column(
    rows: &mut [Vec<Cell>],
    year: i32,
    cur: &str,
    prev: Option<&str>,
    data: &FiscalYearData,
) {
    let hist = |n: f64| Cell::number(n).with_style(style::HISTORICAL);
    let derived = |format: CellFormat, src: String| {
        Cell::formula(format, src).with_style(style::HISTORICAL_DERIVED)
    };
    let pct = CellFormat::Percentage;
    let num = CellFormat::Number;

    push(
        rows,
        ROW_HEADER,
        Cell::text(year.to_string()).with_style(style::HEADER_HISTORICAL),
    );

    push(rows, ROW_REVENUE, hist(data.revenue));

    // The first column has no prior year: its growth cell stays blank
    let growth = match prev {
        Some(p) => derived(
            pct,
            format!("={}/{}-1", a1(cur, ROW_REVENUE), a1(p, ROW_REVENUE)),
        ),
        None => Cell::empty(),
    };
    push(rows, ROW_REVENUE_GROWTH, growth);

    push(rows, ROW_COGS, hist(-data.cogs));
    push(
        rows,
        ROW_COGS_MARGIN,
        derived(
            pct,
            format!("=-{}/{}", a1(cur, ROW_COGS), a1(cur, ROW_REVENUE)),
        ),
    );
    push(
        rows,
        ROW_GROSS_PROFIT,
        derived(
            num,
            format!("={}+{}", a1(cur, ROW_REVENUE), a1(cur, ROW_COGS)),
        ),
    );

    push(rows, ROW_SGNA, hist(-data.sgna));
    push(
        rows,
        ROW_SGNA_MARGIN,
        derived(
            pct,
            format!("=-{}/{}", a1(cur, ROW_SGNA), a1(cur, ROW_REVENUE)),
        ),
    );

    push(
        rows,
        ROW_EBITDA,
        derived(
            num,
            format!("={}+{}", a1(cur, ROW_GROSS_PROFIT), a1(cur, ROW_SGNA)),
        ),
    );
    push(
        rows,
        ROW_EBITDA_MARGIN,
        derived(
            pct,
            format!("={}/{}", a1(cur, ROW_EBITDA), a1(cur, ROW_REVENUE)),
        ),
    );

    push(rows, ROW_DA, hist(data.depreciation_amortization));
    push(
        rows,
        ROW_DA_PCT_CAPEX,
        derived(
            pct,
            format!("=-{}/{}", a1(cur, ROW_DA), a1(cur, ROW_CAPEX)),
        ),
    );

    push(
        rows,
        ROW_EBIT,
        derived(num, format!("={}-{}", a1(cur, ROW_EBITDA), a1(cur, ROW_DA))),
    );

    push(rows, ROW_TAXES, hist(-data.taxes));
    push(
        rows,
        ROW_TAX_RATE,
        derived(
            pct,
            format!("=-{}/{}", a1(cur, ROW_TAXES), a1(cur, ROW_EBIT)),
        ),
    );
    push(
        rows,
        ROW_NOPAT,
        derived(num, format!("={}+{}", a1(cur, ROW_EBIT), a1(cur, ROW_TAXES))),
    );

    push(rows, ROW_CAPEX, hist(-data.capex));
    push(
        rows,
        ROW_CAPEX_PCT_REVENUE,
        derived(
            pct,
            format!("=-{}/{}", a1(cur, ROW_CAPEX), a1(cur, ROW_REVENUE)),
        ),
    );

    push(rows, ROW_CHANGE_IN_NWC, hist(-data.change_in_nwc));

    push(
        rows,
        ROW_UFCF,
        derived(
            num,
            format!(
                "={}+{}+{}+{}",
                a1(cur, ROW_NOPAT),
                a1(cur, ROW_DA),
                a1(cur, ROW_CAPEX),
                a1(cur, ROW_CHANGE_IN_NWC)
            ),
        ),
    );
}

/// A projected column: the six assumption ratios are editable literals and
/// every dependent line item is a formula over the previous column's revenue
/// and the current column's ratio cells.
fn push_projected_column(
    rows: &mut [Vec<Cell>],
    year: i32,
    cur: &str,
    prev: Option<&str>,
    assumptions: &DcfAssumptions,
) {
    let input = |value: f64| Cell::percentage(value).with_style(style::ASSUMPTION_INPUT);
    let projected =
        |format: CellFormat, src: String| Cell::formula(format, src).with_style(style::PROJECTED);
    let pct = CellFormat::Percentage;
    let num = CellFormat::Number;

    push(
        rows,
        ROW_HEADER,
        Cell::text(year.to_string()).with_style(style::HEADER_PROJECTED),
    );

    // Growth chains off the prior column's revenue. A span whose first
    // column is already projected has nothing to chain from; the revenue
    // base degenerates to zero.
    let revenue = match prev {
        Some(p) => projected(
            num,
            format!(
                "={}*(1+{})",
                a1(p, ROW_REVENUE),
                a1(cur, ROW_REVENUE_GROWTH)
            ),
        ),
        None => Cell::number(0.0).with_style(style::PROJECTED),
    };
    push(rows, ROW_REVENUE, revenue);
    push(rows, ROW_REVENUE_GROWTH, input(assumptions.revenue_growth.value));

    push(
        rows,
        ROW_COGS,
        projected(
            num,
            format!(
                "=-{}*{}",
                a1(cur, ROW_REVENUE),
                a1(cur, ROW_COGS_MARGIN)
            ),
        ),
    );
    push(rows, ROW_COGS_MARGIN, input(assumptions.cogs_pct_revenue.value));
    push(
        rows,
        ROW_GROSS_PROFIT,
        projected(
            num,
            format!("={}+{}", a1(cur, ROW_REVENUE), a1(cur, ROW_COGS)),
        ),
    );

    push(
        rows,
        ROW_SGNA,
        projected(
            num,
            format!(
                "=-{}*{}",
                a1(cur, ROW_REVENUE),
                a1(cur, ROW_SGNA_MARGIN)
            ),
        ),
    );
    push(rows, ROW_SGNA_MARGIN, input(assumptions.sgna_pct_revenue.value));

    push(
        rows,
        ROW_EBITDA,
        projected(
            num,
            format!("={}+{}", a1(cur, ROW_GROSS_PROFIT), a1(cur, ROW_SGNA)),
        ),
    );
    push(
        rows,
        ROW_EBITDA_MARGIN,
        projected(
            pct,
            format!("={}/{}", a1(cur, ROW_EBITDA), a1(cur, ROW_REVENUE)),
        ),
    );

    push(
        rows,
        ROW_DA,
        projected(
            num,
            format!(
                "=-{}*{}",
                a1(cur, ROW_CAPEX),
                a1(cur, ROW_DA_PCT_CAPEX)
            ),
        ),
    );
    push(rows, ROW_DA_PCT_CAPEX, input(assumptions.da_pct_capex.value));

    push(
        rows,
        ROW_EBIT,
        projected(num, format!("={}-{}", a1(cur, ROW_EBITDA), a1(cur, ROW_DA))),
    );

    push(
        rows,
        ROW_TAXES,
        projected(
            num,
            format!("=-{}*{}", a1(cur, ROW_EBIT), a1(cur, ROW_TAX_RATE)),
        ),
    );
    push(rows, ROW_TAX_RATE, input(assumptions.tax_rate.value));
    push(
        rows,
        ROW_NOPAT,
        projected(num, format!("={}+{}", a1(cur, ROW_EBIT), a1(cur, ROW_TAXES))),
    );

    push(
        rows,
        ROW_CAPEX,
        projected(
            num,
            format!(
                "=-{}*{}",
                a1(cur, ROW_REVENUE),
                a1(cur, ROW_CAPEX_PCT_REVENUE)
            ),
        ),
    );
    push(
        rows,
        ROW_CAPEX_PCT_REVENUE,
        input(assumptions.capex_pct_revenue.value),
    );

    // No NWC assumption exists; carry the prior column's value forward
    let nwc = match prev {
        Some(p) => projected(num, format!("={}", a1(p, ROW_CHANGE_IN_NWC))),
        None => Cell::number(0.0).with_style(style::PROJECTED),
    };
    push(rows, ROW_CHANGE_IN_NWC, nwc);

    push(
        rows,
        ROW_UFCF,
        projected(
            num,
            format!(
                "={}+{}+{}+{}",
                a1(cur, ROW_NOPAT),
                a1(cur, ROW_DA),
                a1(cur, ROW_CAPEX),
                a1(cur, ROW_CHANGE_IN_NWC)
            ),
        ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Assumption;
    use ledger_sheets_core::CellValue;
    use pretty_assertions::assert_eq;

    fn assumptions() -> DcfAssumptions {
        DcfAssumptions {
            revenue_growth: Assumption::from(0.08),
            cogs_pct_revenue: Assumption::from(0.46),
            sgna_pct_revenue: Assumption::from(0.20),
            da_pct_capex: Assumption::from(0.85),
            tax_rate: Assumption::from(0.21),
            capex_pct_revenue: Assumption::from(0.05),
        }
    }

    fn historical_2023() -> HistoricalData {
        let mut data = HistoricalData::new();
        data.insert(
            2023,
            FiscalYearData {
                revenue: 25448.0,
                cogs: 11694.0,
                ..Default::default()
            },
        );
        data
    }

    #[test]
    fn test_dimensions() {
        let span = ModelSpan::new(2024);
        let grid = generate("ACME", &HistoricalData::new(), &assumptions(), &span);
        assert_eq!(grid.row_count(), ROW_COUNT);
        assert_eq!(grid.col_count(), 20); // label column + 19 years
    }

    #[test]
    fn test_determinism() {
        let span = ModelSpan::new(2024);
        let historical = historical_2023();
        let a = generate("ACME", &historical, &assumptions(), &span);
        let b = generate("ACME", &historical, &assumptions(), &span);
        assert_eq!(a, b);
        assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
    }

    #[test]
    fn test_historical_literals_and_margin_formula() {
        // Span of two columns: 2023 (historical) and 2024 (historical, empty)
        let span = ModelSpan::with_range(2024, -1, 0);
        let grid = generate("X", &historical_2023(), &assumptions(), &span);

        // 2023 is the first year column (column 1, letter B)
        let revenue = grid.get(ROW_REVENUE, 1).unwrap();
        assert_eq!(revenue.value(), &CellValue::Number(25448.0));
        assert_eq!(revenue.style(), Some(style::HISTORICAL));

        let cogs = grid.get(ROW_COGS, 1).unwrap();
        assert_eq!(cogs.value(), &CellValue::Number(-11694.0));

        let margin = grid.get(ROW_COGS_MARGIN, 1).unwrap();
        assert_eq!(margin.formula_source(), Some("=-B4/B2"));
        assert_eq!(margin.format(), CellFormat::Percentage);
    }

    #[test]
    fn test_first_column_growth_is_blank() {
        let span = ModelSpan::new(2024);
        let grid = generate("ACME", &historical_2023(), &assumptions(), &span);

        let first_growth = grid.get(ROW_REVENUE_GROWTH, 1).unwrap();
        assert!(first_growth.is_empty());
        assert!(!first_growth.is_formula());

        // Later historical columns do get a growth formula
        let second_growth = grid.get(ROW_REVENUE_GROWTH, 2).unwrap();
        assert_eq!(second_growth.formula_source(), Some("=C2/B2-1"));
    }

    #[test]
    fn test_projected_column_shape() {
        // 2024 current; columns 2024 (historical) and 2025 (projected)
        let span = ModelSpan::with_range(2024, 0, 1);
        let grid = generate("ACME", &HistoricalData::new(), &assumptions(), &span);

        // Projected revenue chains off the prior column
        let revenue = grid.get(ROW_REVENUE, 2).unwrap();
        assert_eq!(revenue.formula_source(), Some("=B2*(1+C3)"));
        assert_eq!(revenue.style(), Some(style::PROJECTED));

        // Assumption ratios are editable percentage literals
        let growth = grid.get(ROW_REVENUE_GROWTH, 2).unwrap();
        assert_eq!(growth.value(), &CellValue::Number(0.08));
        assert_eq!(growth.format(), CellFormat::Percentage);
        assert_eq!(growth.style(), Some(style::ASSUMPTION_INPUT));

        // Dependent rows reference the current column's ratio cells
        assert_eq!(
            grid.get(ROW_COGS, 2).unwrap().formula_source(),
            Some("=-C2*C5")
        );
        assert_eq!(
            grid.get(ROW_UFCF, 2).unwrap().formula_source(),
            Some("=C16+C11+C17+C19")
        );

        // ΔNWC carries the prior column's value forward
        assert_eq!(
            grid.get(ROW_CHANGE_IN_NWC, 2).unwrap().formula_source(),
            Some("=B19")
        );
    }

    #[test]
    fn test_labels_and_headers() {
        let span = ModelSpan::with_range(2024, 0, 0);
        let grid = generate("ACME", &HistoricalData::new(), &assumptions(), &span);

        assert_eq!(
            grid.get(ROW_HEADER, 0).unwrap().value(),
            &CellValue::Text("ACME".into())
        );
        assert_eq!(
            grid.get(ROW_UFCF, 0).unwrap().value(),
            &CellValue::Text("Unlevered Free Cash Flow".into())
        );
        assert_eq!(
            grid.get(ROW_HEADER, 1).unwrap().value(),
            &CellValue::Text("2024".into())
        );
    }

    #[test]
    fn test_missing_year_defaults_to_zero_literals() {
        let span = ModelSpan::with_range(2024, 0, 0);
        let grid = generate("ACME", &HistoricalData::new(), &assumptions(), &span);
        assert_eq!(grid.get(ROW_REVENUE, 1).unwrap().value(), &CellValue::Number(0.0));
        assert_eq!(grid.get(ROW_COGS, 1).unwrap().value(), &CellValue::Number(-0.0));
    }
}
