//! A full run driven from definition files.

use std::fs;
use std::path::Path;

use approx::assert_relative_eq;
use rust_decimal::prelude::ToPrimitive;

use rmds_core::ErrorKind;
use rmds_curves::bootstrap::{bootstrap_all, BootstrapConfig};
use rmds_curves::instruments::StandardPricer;
use rmds_engine::{RunContext, BASE_SCENARIO};
use rmds_ext_file::{
    load_curves, load_instruments, load_scenario_definition, load_securities, write_results,
    RunConfig,
};

const CURVES: &str = "\
OIS.USD,2020-12-30,DF
0,1.0
90,0.999
180,0.997
360,0.993

ACME.PX,,GENERIC
0,42.5
30,43.0
";

const INSTRUMENTS: &str = "\
curve_name,as_of_date,instrument_type,maturity,quote,param
SOFR,2020-12-30,DEPOSIT,90,0.0009,
SOFR,2020-12-30,SWAP,365,0.0015,
SOFR,2020-12-30,SWAP,730,0.0020,
";

const SECURITIES: &str = "SecType\tSecId\tDiscountCurve\tMaturity\tCpnRate\tFrequency\tPriceCurve\tQuantity
Bond\tUST_2021\tOIS.USD\t2021-12-30\t0.05\t2\t\t
Bond\tSOFR_2022\tSOFR\t2022-12-30\t0.01\t1\t\t
Equity\tACME\t\t\t\t\tACME.PX\t100
Bond\tBUND\tOIS.EUR\t2022-12-30\t0.01\t1\t\t
Equity\t\t\t\t\t\tACME.PX\t1
";

const CONFIG: &str = r#"{
    "valuation_date": "2020-12-30",
    "curve_definition_file": "curves.csv",
    "instrument_definition_file": "instruments.csv",
    "scenario_definition_file": "scenarios.json",
    "security_definition_file": "securities.tsv",
    "output_file": "out/results.csv",
    "use_case": "NPV_CALCULATION"
}"#;

fn write_inputs(dir: &Path) {
    fs::write(dir.join("curves.csv"), CURVES).unwrap();
    fs::write(dir.join("instruments.csv"), INSTRUMENTS).unwrap();
    fs::write(dir.join("securities.tsv"), SECURITIES).unwrap();
    fs::write(dir.join("scenarios.json"), r#"{"shock_factor": 0.1}"#).unwrap();
    fs::write(dir.join("config.json"), CONFIG).unwrap();
}

#[test]
fn run_from_files() {
    let dir = tempfile::tempdir().unwrap();
    write_inputs(dir.path());

    let config = RunConfig::from_file(dir.path().join("config.json")).unwrap();
    let mut ctx = RunContext::new(config.valuation_date);

    let curves = load_curves(&config.curve_definition_file, ctx.curves_mut()).unwrap();
    assert_eq!(curves.loaded, 2);
    assert!(curves.is_clean());

    let instruments = load_instruments(
        config.instrument_definition_file.as_ref().unwrap(),
        Some(config.valuation_date),
    )
    .unwrap();
    assert_eq!(instruments.sets.len(), 1);
    for (key, result) in bootstrap_all(&instruments.sets, &StandardPricer, &BootstrapConfig::default()) {
        let built = result.unwrap_or_else(|e| panic!("{key}: {e}"));
        assert!(built.is_valid());
        ctx.curves_mut().add_curve(built.into_curve());
    }
    assert_eq!(ctx.curves().len(), 3);

    let securities = load_securities(&config.security_definition_file, ctx.securities_mut()).unwrap();
    assert_eq!(securities.loaded, 4);
    assert_eq!(securities.skipped.len(), 1);
    assert_eq!(securities.skipped[0].kind, ErrorKind::Construction);

    let definition = load_scenario_definition(&config.scenario_definition_file).unwrap();
    ctx.build_scenarios(&definition).unwrap();

    let report = ctx.execute(config.use_case);
    assert_eq!(report.records.len(), 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].security_id, "BUND");
    assert_eq!(report.failures[0].kind, ErrorKind::Lookup);

    // 1% annual coupon over a ~0.2% two-year swap rate: a little above par
    let sofr = report.record("SOFR_2022", BASE_SCENARIO).unwrap();
    let npv = sofr.npv_base.to_f64().unwrap();
    assert!(npv > 100.0 && npv < 103.0, "npv {npv}");

    let equity = report.record("ACME", BASE_SCENARIO).unwrap();
    assert_relative_eq!(equity.npv_base.to_f64().unwrap(), 4250.0);

    write_results(&config.output_file, &report.records).unwrap();
    let written = fs::read_to_string(dir.path().join("out/results.csv")).unwrap();
    let mut lines = written.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Security ID,Scenario Name,Scenario Date,NPV_BASE,NPV_UP,NPV_DOWN"
    );
    assert_eq!(lines.count(), 3);
}

#[test]
fn missing_definition_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = RunContext::new(rmds_core::Date::from_ymd(2020, 12, 30).unwrap());
    let err = load_curves(dir.path().join("absent.csv"), ctx.curves_mut()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Construction);
    assert!(err.to_string().contains("absent.csv"));
}
