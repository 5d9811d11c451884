//! Property tests for curve lookups and scenario shocks.

use proptest::prelude::*;
use rmds_core::Date;
use rmds_curves::prelude::*;

fn as_of() -> Date {
    Date::from_ymd(2020, 12, 30).unwrap()
}

/// Strictly increasing offsets starting anywhere in [-30, 30], with
/// positive values.
fn arb_points() -> impl Strategy<Value = Vec<(i64, f64)>> {
    (
        -30i64..30,
        prop::collection::vec((1i64..200, 0.01f64..1.5), 2..8),
    )
        .prop_map(|(start, steps)| {
            let mut t = start;
            steps
                .into_iter()
                .enumerate()
                .map(|(i, (step, value))| {
                    if i > 0 {
                        t += step;
                    }
                    (t, value)
                })
                .collect()
        })
}

fn arb_kind() -> impl Strategy<Value = CurveKind> {
    prop_oneof![Just(CurveKind::DiscountFactor), Just(CurveKind::Generic)]
}

fn blend(kind: CurveKind, v0: f64, v1: f64, e: f64) -> f64 {
    match kind {
        CurveKind::DiscountFactor => v0 * (v1 / v0).powf(e),
        CurveKind::Generic => v0 + (v1 - v0) * e,
    }
}

proptest! {
    #[test]
    fn flat_before_first_point(points in arb_points(), kind in arb_kind(), before in 1i64..1000) {
        let curve = Curve::from_points("P", as_of(), kind, &points).unwrap();
        let (first_offset, first_value) = points[0];
        prop_assert_eq!(curve.value_at(first_offset - before), first_value);
    }

    #[test]
    fn stored_points_round_trip(points in arb_points(), kind in arb_kind()) {
        let curve = Curve::from_points("P", as_of(), kind, &points).unwrap();
        for &(offset, value) in &points {
            prop_assert_eq!(curve.value_at(offset), value);
        }
    }

    #[test]
    fn extrapolates_last_segment(points in arb_points(), kind in arb_kind(), beyond in 1i64..2000) {
        let curve = Curve::from_points("P", as_of(), kind, &points).unwrap();
        let n = points.len();
        let (t0, v0) = points[n - 2];
        let (t1, v1) = points[n - 1];
        let x = t1 + beyond;
        let e = (x - t0) as f64 / (t1 - t0) as f64;
        let expected = blend(kind, v0, v1, e);
        prop_assume!(expected.is_finite());
        let got = curve.value_at(x);
        prop_assert!((got - expected).abs() <= 1e-12 * expected.abs().max(1.0));
    }

    #[test]
    fn interior_matches_blend(points in arb_points(), kind in arb_kind(), pick in any::<prop::sample::Index>(), frac in 0.0f64..1.0) {
        let curve = Curve::from_points("P", as_of(), kind, &points).unwrap();
        let seg = pick.index(points.len() - 1);
        let (t0, v0) = points[seg];
        let (t1, v1) = points[seg + 1];
        // strictly inside the segment
        let x = t0 + 1 + ((t1 - t0 - 1) as f64 * frac) as i64;
        prop_assume!(x > t0 && x < t1);
        let e = (x - t0) as f64 / (t1 - t0) as f64;
        let expected = blend(kind, v0, v1, e);
        prop_assert!((curve.value_at(x) - expected).abs() <= 1e-12 * expected.abs().max(1.0));
    }

    #[test]
    fn shocked_sets_keep_keys_and_offsets(
        curves in prop::collection::vec((arb_points(), arb_kind()), 0..5),
        factor in 0.0f64..0.5,
    ) {
        let base: CurveSet = curves
            .iter()
            .enumerate()
            .map(|(i, (points, kind))| Curve::from_points(format!("C{i}"), as_of(), *kind, points).unwrap())
            .collect();

        let (up, down) = ScenarioBuilder::proportional(factor).unwrap().build(&base).unwrap();

        let base_keys: Vec<_> = base.keys().cloned().collect();
        prop_assert_eq!(up.keys().cloned().collect::<Vec<_>>(), base_keys.clone());
        prop_assert_eq!(down.keys().cloned().collect::<Vec<_>>(), base_keys);

        for (key, curve) in &base {
            let u = up.get_key(key).unwrap();
            let d = down.get_key(key).unwrap();
            prop_assert_eq!(u.offsets(), curve.offsets());
            prop_assert_eq!(d.offsets(), curve.offsets());
            for (i, v) in curve.values().iter().enumerate() {
                prop_assert_eq!(u.values()[i], v * (1.0 + factor));
                prop_assert_eq!(d.values()[i], v * (1.0 - factor));
            }
        }
    }
}

#[test]
fn ois_usd_interior_lookup() {
    let curve = Curve::new(
        "OIS.USD",
        as_of(),
        CurveKind::DiscountFactor,
        vec![0, 90, 180, 360],
        vec![1.0, 0.999, 0.997, 0.993],
    )
    .unwrap();

    let value = curve.value_at(150);
    assert!((value - 0.99767).abs() < 5e-6, "got {value}");
}

#[test]
fn type_mismatch_query() {
    let err = "ninety".parse::<CurveQuery>().unwrap_err();
    assert_eq!(err.kind(), rmds_core::ErrorKind::TypeMismatch);
}
