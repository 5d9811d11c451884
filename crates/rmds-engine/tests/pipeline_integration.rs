//! End-to-end valuation runs through the run context.

use approx::assert_relative_eq;
use proptest::prelude::*;
use rust_decimal::prelude::ToPrimitive;

use rmds_core::{Date, ErrorKind};
use rmds_curves::scenario::ScenarioBuilder;
use rmds_curves::{Curve, CurveKind, CurveSet};
use rmds_engine::prelude::*;
use rmds_securities::{EquityConfig, Security, SecurityKind, SecurityRecord, Valuation};

fn val_date() -> Date {
    Date::from_ymd(2020, 12, 30).unwrap()
}

fn context() -> RunContext {
    let mut ctx = RunContext::new(val_date());
    ctx.curves_mut().add_curve(
        Curve::new(
            "OIS.USD",
            val_date(),
            CurveKind::DiscountFactor,
            vec![0, 90, 180, 360, 720, 1800],
            vec![1.0, 0.999, 0.997, 0.993, 0.985, 0.95],
        )
        .unwrap(),
    );
    ctx.curves_mut().add_curve(
        Curve::new("ACME.PX", val_date(), CurveKind::Generic, vec![0, 30], vec![42.5, 43.0])
            .unwrap(),
    );

    let records = [
        SecurityRecord::new()
            .with("SecType", "Bond")
            .with("SecId", "UST_2022")
            .with("DiscountCurve", "OIS.USD")
            .with("Maturity", "2022-12-30")
            .with("CpnRate", "0.05")
            .with("Frequency", "2"),
        SecurityRecord::new()
            .with("SecType", "Equity")
            .with("SecId", "ACME")
            .with("PriceCurve", "ACME.PX")
            .with("Quantity", "100"),
        SecurityRecord::new()
            .with("SecType", "Bond")
            .with("SecId", "BUND_2023")
            .with("DiscountCurve", "OIS.EUR")
            .with("Maturity", "2023-06-30")
            .with("CpnRate", "0.01"),
    ];
    for record in &records {
        let security = record.to_security().unwrap();
        ctx.securities_mut().add_security(security).unwrap();
    }
    ctx
}

fn to_f64(d: rust_decimal::Decimal) -> f64 {
    d.to_f64().unwrap()
}

#[test]
fn missing_curve_is_isolated() {
    let mut ctx = context();
    ctx.build_scenarios(&ScenarioDefinition::default()).unwrap();
    let report = ctx.execute(UseCase::NpvCalculation);

    assert_eq!(report.pair_count(), 3);
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.failures.len(), 1);

    let failure = &report.failures[0];
    assert_eq!(failure.security_id, "BUND_2023");
    assert_eq!(failure.scenario_name, BASE_SCENARIO);
    assert_eq!(failure.kind, ErrorKind::Lookup);
    assert!(failure.message.contains("OIS.EUR"));
}

#[test]
fn bond_npv_matches_discounted_schedule() {
    let mut ctx = context();
    ctx.build_scenarios(&ScenarioDefinition::default()).unwrap();
    let report = ctx.execute(UseCase::NpvCalculation);

    let row = report.record("UST_2022", BASE_SCENARIO).unwrap();
    let security = ctx.securities().get("UST_2022").unwrap();
    let curve = ctx.curves().get_curve("OIS.USD", val_date()).unwrap();
    let expected: f64 = security
        .cashflows()
        .iter()
        .map(|cf| cf.amount * curve.value_at(cf.offset))
        .sum();
    assert_relative_eq!(to_f64(row.npv_base), expected, epsilon = 1e-4);

    // every curve value scales by the shock, so the NPV does too
    assert_relative_eq!(to_f64(row.npv_up), expected * 1.1, epsilon = 1e-3);
    assert_relative_eq!(to_f64(row.npv_down), expected * 0.9, epsilon = 1e-3);
    assert!(row.npv_down < row.npv_base && row.npv_base < row.npv_up);
}

#[test]
fn equity_npv_is_quantity_times_spot() {
    let mut ctx = context();
    ctx.build_scenarios(&ScenarioDefinition::default()).unwrap();
    let report = ctx.execute(UseCase::NpvCalculation);

    let row = report.record("ACME", BASE_SCENARIO).unwrap();
    assert_relative_eq!(to_f64(row.npv_base), 4250.0, epsilon = 1e-9);
    assert_relative_eq!(to_f64(row.npv_up), 4675.0, epsilon = 1e-9);
    assert_relative_eq!(to_f64(row.npv_down), 3825.0, epsilon = 1e-9);
}

#[test]
fn risk_factor_filter_leaves_other_curves_flat() {
    let mut ctx = context();
    let definition = ScenarioDefinition {
        risk_factors: vec!["OIS.USD".to_string()],
        ..ScenarioDefinition::default()
    };
    ctx.build_scenarios(&definition).unwrap();
    let report = ctx.execute(UseCase::NpvCalculation);

    let row = report.record("ACME", BASE_SCENARIO).unwrap();
    assert_eq!(row.npv_up, row.npv_base);
    assert_eq!(row.npv_down, row.npv_base);
}

#[test]
fn scenario_date_drives_scheduling() {
    let mut ctx = context();
    let later = Date::from_ymd(2021, 12, 30).unwrap();
    // curves only exist as of the run date, so everything misses
    let definition = ScenarioDefinition {
        valuation_date: Some(later),
        ..ScenarioDefinition::default()
    };
    ctx.build_scenarios(&definition).unwrap();
    let report = ctx.execute(UseCase::NpvCalculation);

    assert!(report.records.is_empty());
    assert_eq!(report.failures_of(ErrorKind::Lookup).count(), 3);
    assert!(report.failures.iter().all(|f| f.scenario_date == later));

    // the registry keeps its own schedule
    let bond = ctx.securities().get("UST_2022").unwrap();
    assert_eq!(bond.valuation_date(), Some(val_date()));
    assert_eq!(bond.cashflows().len(), 4);
}

#[test]
fn report_serializes_with_output_columns() {
    let mut ctx = context();
    ctx.build_scenarios(&ScenarioDefinition::default()).unwrap();
    let report = ctx.execute(UseCase::NpvCalculation);

    let row = report.record("ACME", BASE_SCENARIO).unwrap();
    let json = serde_json::to_value(row).unwrap();
    for column in [
        "Security ID",
        "Scenario Name",
        "Scenario Date",
        "NPV_BASE",
        "NPV_UP",
        "NPV_DOWN",
    ] {
        assert!(json.get(column).is_some(), "missing column {column}");
    }
    assert_eq!(json["Scenario Date"], "2020-12-30");
}

#[test]
fn required_curves_are_reported() {
    let ctx = context();
    let bond = ctx.securities().get("BUND_2023").unwrap();
    assert_eq!(bond.required_curves(), vec!["OIS.EUR"]);
}

proptest! {
    #[test]
    fn shocked_npvs_are_ordered_and_rounded(
        quantity in 1.0f64..10_000.0,
        price in 0.01f64..1_000.0,
        factor in 0.0f64..0.9,
    ) {
        let base: CurveSet = std::iter::once(
            Curve::new("PX", val_date(), CurveKind::Generic, vec![0, 30], vec![price, price])
                .unwrap(),
        )
        .collect();
        let builder = ScenarioBuilder::proportional(factor).unwrap();
        let scenario = Scenario::new(BASE_SCENARIO, val_date(), base, &builder).unwrap();
        let security =
            Security::new("EQ", SecurityKind::Equity(EquityConfig::new("PX", quantity))).unwrap();

        let record = value_pair(&security, &scenario).unwrap();
        prop_assert!(record.npv_up >= record.npv_base);
        prop_assert!(record.npv_base >= record.npv_down);
        for npv in [record.npv_base, record.npv_up, record.npv_down] {
            prop_assert!(npv.scale() <= 4);
        }
        prop_assert!(security.valuation_date().is_none());
    }
}
