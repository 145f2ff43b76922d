//! End-to-end tests for DCF model generation and evaluation

use ledger_sheets::prelude::*;
use ledger_sheets_dcf::layout::*;

fn assumptions() -> DcfAssumptions {
    DcfAssumptions {
        revenue_growth: Assumption::from(0.10),
        cogs_pct_revenue: Assumption::from(0.40),
        sgna_pct_revenue: Assumption::from(0.20),
        da_pct_capex: Assumption::from(0.50),
        tax_rate: Assumption::from(0.20),
        capex_pct_revenue: Assumption::from(0.08),
    }
}

fn historical_2024() -> HistoricalData {
    let mut data = HistoricalData::new();
    data.insert(
        2024,
        FiscalYearData {
            revenue: 1000.0,
            cogs: 400.0,
            sgna: 200.0,
            depreciation_amortization: 50.0,
            capex: 80.0,
            taxes: 60.0,
            change_in_nwc: 10.0,
        },
    );
    data
}

fn close(actual: Option<f64>, expected: f64) -> bool {
    matches!(actual, Some(n) if (n - expected).abs() < 1e-9)
}

/// The scenario from the product's reference data: one historical year with
/// Revenue and COGS only
#[test]
fn test_historical_scenario() {
    let mut data = HistoricalData::new();
    data.insert(
        2023,
        FiscalYearData {
            revenue: 25448.0,
            cogs: 11694.0,
            ..Default::default()
        },
    );

    let span = ModelSpan::with_range(2024, -1, 0);
    let mut grid = generate("X", &data, &assumptions(), &span);

    // 2023 is column 1: literal revenue, negated literal COGS
    assert_eq!(
        grid.get(ROW_REVENUE, 1).unwrap().literal_number(),
        Some(25448.0)
    );
    assert_eq!(
        grid.get(ROW_COGS, 1).unwrap().literal_number(),
        Some(-11694.0)
    );

    let margin = Evaluator::new(&mut grid).evaluate(ROW_COGS_MARGIN, 1);
    assert!(close(margin, 11694.0 / 25448.0));
}

/// Projected Revenue in year N equals prior-year Revenue times (1 + growth)
#[test]
fn test_revenue_chaining() {
    let span = ModelSpan::with_range(2024, 0, 2);
    let mut grid = generate("ACME", &historical_2024(), &assumptions(), &span);
    let mut evaluator = Evaluator::new(&mut grid);

    // Columns: B = 2024 (historical), C = 2025, D = 2026
    assert!(close(evaluator.evaluate(ROW_REVENUE, 2), 1000.0 * 1.10));
    assert!(close(evaluator.evaluate(ROW_REVENUE, 3), 1000.0 * 1.10 * 1.10));
}

/// The full cascade from revenue down to UFCF, historical and projected
#[test]
fn test_ufcf_cascade() {
    let span = ModelSpan::with_range(2024, 0, 1);
    let mut grid = generate("ACME", &historical_2024(), &assumptions(), &span);
    let mut evaluator = Evaluator::new(&mut grid);
    evaluator.evaluate_all();

    // Historical 2024 column (B)
    assert!(close(evaluator.evaluate(ROW_GROSS_PROFIT, 1), 600.0));
    assert!(close(evaluator.evaluate(ROW_EBITDA, 1), 400.0));
    assert!(close(evaluator.evaluate(ROW_EBIT, 1), 350.0));
    assert!(close(evaluator.evaluate(ROW_NOPAT, 1), 290.0));
    assert!(close(evaluator.evaluate(ROW_UFCF, 1), 250.0));
    assert!(close(evaluator.evaluate(ROW_COGS_MARGIN, 1), 0.40));
    assert!(close(evaluator.evaluate(ROW_TAX_RATE, 1), 60.0 / 350.0));

    // Projected 2025 column (C)
    assert!(close(evaluator.evaluate(ROW_REVENUE, 2), 1100.0));
    assert!(close(evaluator.evaluate(ROW_COGS, 2), -440.0));
    assert!(close(evaluator.evaluate(ROW_EBITDA, 2), 440.0));
    assert!(close(evaluator.evaluate(ROW_CAPEX, 2), -88.0));
    assert!(close(evaluator.evaluate(ROW_DA, 2), 44.0));
    assert!(close(evaluator.evaluate(ROW_EBIT, 2), 396.0));
    assert!(close(evaluator.evaluate(ROW_TAXES, 2), -79.2));
    assert!(close(evaluator.evaluate(ROW_NOPAT, 2), 316.8));
    assert!(close(evaluator.evaluate(ROW_CHANGE_IN_NWC, 2), -10.0));
    assert!(close(evaluator.evaluate(ROW_UFCF, 2), 262.8));
}

/// Identical inputs produce identical grids, bit for bit
#[test]
fn test_generation_determinism() {
    let span = ModelSpan::new(2024);
    let a = generate("ACME", &historical_2024(), &assumptions(), &span);
    let b = generate("ACME", &historical_2024(), &assumptions(), &span);
    assert_eq!(a, b);
    assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
}

/// Editing a historical literal recomputes its derived ratios
#[test]
fn test_editing_historical_literal_recomputes_ratios() {
    let span = ModelSpan::with_range(2024, 0, 0);
    let grid = generate("ACME", &historical_2024(), &assumptions(), &span);

    let mut surface = SheetSurface::new(grid);
    assert!(close(
        surface.grid().get(ROW_COGS_MARGIN, 1).unwrap().cached_result(),
        0.40
    ));

    // Halve revenue; the margin doubles
    surface.commit_input(ROW_REVENUE, 1, "500").unwrap();
    assert!(close(
        surface.grid().get(ROW_COGS_MARGIN, 1).unwrap().cached_result(),
        0.80
    ));
}

/// Editing an assumption input reflows the projected cascade
#[test]
fn test_editing_assumption_reflows_projection() {
    let span = ModelSpan::with_range(2024, 0, 1);
    let grid = generate("ACME", &historical_2024(), &assumptions(), &span);
    let mut surface = SheetSurface::new(grid);

    assert!(close(
        surface.grid().get(ROW_REVENUE, 2).unwrap().cached_result(),
        1100.0
    ));

    // Raise the growth assumption from 10% to 20%
    surface
        .commit_input(ROW_REVENUE_GROWTH, 2, "0.20")
        .unwrap();
    assert!(close(
        surface.grid().get(ROW_REVENUE, 2).unwrap().cached_result(),
        1200.0
    ));
}

/// A generated model survives the JSON exchange format
#[test]
fn test_generated_grid_round_trips() {
    let span = ModelSpan::new(2024);
    let grid = generate("ACME", &historical_2024(), &assumptions(), &span);
    let restored = Grid::from_json(&grid.to_json().unwrap()).unwrap();
    assert_eq!(restored, grid);

    let mut restored = restored;
    let mut evaluator = Evaluator::new(&mut restored);
    assert!(close(evaluator.evaluate(ROW_GROSS_PROFIT, 9), 600.0));
}

/// A model saved to disk reloads and evaluates identically
#[test]
fn test_model_survives_save_and_reload() {
    let span = ModelSpan::with_range(2024, 0, 1);
    let grid = generate("ACME", &historical_2024(), &assumptions(), &span);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("acme.json");
    std::fs::write(&path, grid.to_json().unwrap()).unwrap();

    let mut reloaded = Grid::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let mut evaluator = Evaluator::new(&mut reloaded);
    assert!(close(evaluator.evaluate(ROW_UFCF, 2), 262.8));
}

/// The full 19-year span classifies columns around the current year
#[test]
fn test_span_classification() {
    let span = ModelSpan::new(2024);
    let grid = generate("ACME", &historical_2024(), &assumptions(), &span);

    // Column 9 is 2024 (historical), column 10 is 2025 (projected)
    assert_eq!(
        grid.get(ROW_HEADER, 9).unwrap().style(),
        Some(style::HEADER_HISTORICAL)
    );
    assert_eq!(
        grid.get(ROW_HEADER, 10).unwrap().style(),
        Some(style::HEADER_PROJECTED)
    );
    assert_eq!(
        grid.get(ROW_REVENUE_GROWTH, 10).unwrap().style(),
        Some(style::ASSUMPTION_INPUT)
    );
}
