//! Integration test: bootstrap a discount curve from deposits and par swaps.
//!
//! Quotes are generated from a known curve, so the bootstrap must recover
//! its pillars and every instrument must reprice.

use approx::assert_relative_eq;
use proptest::prelude::*;
use rmds_core::Date;
use rmds_curves::prelude::*;

fn as_of() -> Date {
    Date::from_ymd(2020, 12, 30).unwrap()
}

const PILLARS: [i64; 7] = [90, 180, 365, 730, 1095, 1825, 3650];

fn instruments_from(truth: &Curve) -> Vec<Instrument> {
    PILLARS
        .iter()
        .map(|&t| {
            let quote_of = |inst: Instrument| StandardPricer.price(&inst, truth).unwrap();
            if t < 365 {
                let probe = Instrument::deposit(t, 0.0).unwrap();
                Instrument::deposit(t, quote_of(probe)).unwrap()
            } else {
                let probe = Instrument::par_swap(t, 0.0, 365).unwrap();
                Instrument::par_swap(t, quote_of(probe), 365).unwrap()
            }
        })
        .collect()
}

fn truth_curve(rates: &[f64]) -> Curve {
    let mut offsets = vec![0];
    let mut values = vec![1.0];
    for (&t, &r) in PILLARS.iter().zip(rates) {
        offsets.push(t);
        values.push((-r * t as f64 / 365.0).exp());
    }
    Curve::new("TRUTH", as_of(), CurveKind::DiscountFactor, offsets, values).unwrap()
}

#[test]
fn recovers_known_curve() {
    let truth = truth_curve(&[0.010, 0.011, 0.012, 0.014, 0.016, 0.019, 0.023]);
    let mut instruments = instruments_from(&truth);
    instruments.reverse();

    let result = SequentialBootstrapper::new("OIS.USD", as_of(), StandardPricer)
        .add_instruments(instruments)
        .bootstrap()
        .unwrap();

    assert_eq!(result.curve.offsets(), truth.offsets());
    for (got, want) in result.curve.values().iter().zip(truth.values()) {
        assert_relative_eq!(*got, *want, epsilon = 1e-10);
    }
    assert!(result.is_valid(), "{}", result.report);
    assert_eq!(result.report.checks().len(), PILLARS.len());
}

#[test]
fn bootstrap_all_builds_every_set() {
    let truth = truth_curve(&[0.02; 7]);
    let mut usd = InstrumentSet::new("OIS.USD", as_of());
    usd.instruments = instruments_from(&truth);
    let mut eur = InstrumentSet::new("OIS.EUR", as_of());
    eur.instruments = instruments_from(&truth_curve(&[0.005; 7]));

    let results = bootstrap_all(&[usd, eur], &StandardPricer, &BootstrapConfig::default());

    assert_eq!(results.len(), 2);
    for (key, result) in results {
        let result = result.unwrap();
        assert_eq!(result.curve.key(), key);
        assert!(result.is_valid());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn discount_factors_non_increasing(
        base in 0.0f64..0.08,
        steps in prop::collection::vec(0.0f64..0.004, 7),
    ) {
        // upward sloping zero rates: no arbitrage, positive forwards
        let mut rates = Vec::with_capacity(7);
        let mut r = base;
        for s in steps {
            r += s;
            rates.push(r);
        }
        let truth = truth_curve(&rates);

        let result = SequentialBootstrapper::new("SYN", as_of(), StandardPricer)
            .add_instruments(instruments_from(&truth))
            .bootstrap()
            .unwrap();

        let values = result.curve.values();
        for w in values.windows(2) {
            prop_assert!(w[1] <= w[0] + 1e-12, "{:?}", values);
        }
        prop_assert!(result.is_valid());
    }
}
