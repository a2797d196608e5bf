use proptest::prelude::*;
use radmeter_logic::classify::{classify, percentage_of_scale, safe_exposure_hours, HOURS_PER_YEAR};
use radmeter_logic::health::{analyze, survival_odds};
use radmeter_logic::units::{
    convert_to_canonical, from_canonical, is_valid, RadiationUnit, MAX_CANONICAL_INTENSITY,
};

fn unit() -> impl Strategy<Value = RadiationUnit> {
    prop::sample::select(RadiationUnit::ALL.to_vec())
}

fn intensity() -> impl Strategy<Value = f64> {
    prop_oneof![0.0..10.0f64, 0.0..2_000.0f64, 0.0..MAX_CANONICAL_INTENSITY]
}

proptest! {
    #[test]
    fn classify_is_monotonic(a in intensity(), b in intensity()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(classify(lo) <= classify(hi));
    }

    #[test]
    fn percentage_is_bounded_and_monotonic(a in intensity(), b in intensity()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let (p_lo, p_hi) = (percentage_of_scale(lo), percentage_of_scale(hi));
        prop_assert!(p_hi <= 100);
        prop_assert!(p_lo <= p_hi, "{} -> {}, {} -> {}", lo, p_lo, hi, p_hi);
    }

    #[test]
    fn safe_hours_non_increasing(a in intensity(), b in intensity()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(safe_exposure_hours(lo) <= HOURS_PER_YEAR);
        prop_assert!(safe_exposure_hours(hi) <= safe_exposure_hours(lo));
    }

    #[test]
    fn conversion_round_trips(x in 0.0..1_000.0f64, u in unit()) {
        let canonical = convert_to_canonical(x, u);
        let back = convert_to_canonical(from_canonical(canonical, u), u);
        prop_assert!((back - canonical).abs() <= canonical.abs() * 1e-12);
    }

    #[test]
    fn negative_readings_invalid(x in -1e12..-f64::MIN_POSITIVE, u in unit()) {
        prop_assert!(!is_valid(x, u));
    }

    #[test]
    fn treated_survival_never_below_untreated(dose in 0.0..1e7f64) {
        let odds = survival_odds(dose);
        prop_assert!(odds.treated >= odds.untreated);
    }

    #[test]
    fn analyze_survival_ordered(i in intensity(), hours in 0.0..1_000.0f64) {
        let bundle = analyze(i, hours).unwrap();
        prop_assert!(bundle.survival_treated >= bundle.survival_untreated);
        prop_assert!(!bundle.immediate_effects.is_empty());
        prop_assert!(!bundle.long_term_effects.is_empty());
    }
}
