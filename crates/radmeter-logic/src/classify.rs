//! Danger tiers, gauge position and safe exposure time.
//!
//! Every function here takes a canonical intensity in μSv/h. Callers are
//! expected to have run it through [`crate::units::validate`] first.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::brackets::BracketTable;

/// Ordered risk classification, lowest risk first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DangerTier {
    /// Below 0.5 μSv/h: normal background.
    Safe,
    /// 0.5..2 μSv/h: slightly elevated.
    Caution,
    /// 2..100 μSv/h: limit exposure.
    Dangerous,
    /// 100..1000 μSv/h: significant health risk.
    Extreme,
    /// 1000 μSv/h and above.
    Lethal,
}

/// Tier thresholds in μSv/h. A value equal to a bound is in the higher tier.
pub mod thresholds {
    pub const CAUTION: f64 = 0.5;
    pub const DANGEROUS: f64 = 2.0;
    pub const EXTREME: f64 = 100.0;
    pub const LETHAL: f64 = 1000.0;
}

static TIERS: BracketTable<DangerTier> = BracketTable::new(
    &[
        (thresholds::CAUTION, DangerTier::Safe),
        (thresholds::DANGEROUS, DangerTier::Caution),
        (thresholds::EXTREME, DangerTier::Dangerous),
        (thresholds::LETHAL, DangerTier::Extreme),
    ],
    DangerTier::Lethal,
);

impl DangerTier {
    pub const ALL: [DangerTier; 5] = [
        Self::Safe,
        Self::Caution,
        Self::Dangerous,
        Self::Extreme,
        Self::Lethal,
    ];

    pub fn from_intensity(intensity: f64) -> Self {
        *TIERS.lookup(intensity)
    }

    /// Smallest canonical intensity classified into this tier.
    pub fn lower_threshold(self) -> f64 {
        match self {
            Self::Safe => 0.0,
            Self::Caution => thresholds::CAUTION,
            Self::Dangerous => thresholds::DANGEROUS,
            Self::Extreme => thresholds::EXTREME,
            Self::Lethal => thresholds::LETHAL,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Safe => "SAFE",
            Self::Caution => "CAUTION",
            Self::Dangerous => "DANGEROUS",
            Self::Extreme => "EXTREME",
            Self::Lethal => "LETHAL",
        }
    }

    /// Headline shown next to the gauge.
    pub fn description(self) -> &'static str {
        match self {
            Self::Safe => "SAFE - Normal background level",
            Self::Caution => "CAUTION - Slightly elevated",
            Self::Dangerous => "DANGEROUS - Limited exposure recommended",
            Self::Extreme => "⚠️ EXTREME - Significant health risk",
            Self::Lethal => "☠️ LETHAL - IMMEDIATE EVACUATION",
        }
    }
}

impl fmt::Display for DangerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a canonical intensity.
pub fn classify(intensity: f64) -> DangerTier {
    DangerTier::from_intensity(intensity)
}

/// Linear gauge segment from `base` to `base + span` over `start..end`.
#[derive(Debug, Clone, Copy)]
struct GaugeSegment {
    start: f64,
    end: f64,
    base: f64,
    span: f64,
}

impl GaugeSegment {
    const fn new(start: f64, end: f64, base: f64, span: f64) -> Self {
        Self {
            start,
            end,
            base,
            span,
        }
    }

    fn position(&self, intensity: f64) -> f64 {
        self.base + (intensity - self.start) / (self.end - self.start) * self.span
    }
}

// Overflow segment is unused: past the lethal threshold the gauge is logarithmic.
static GAUGE: BracketTable<Option<GaugeSegment>> = BracketTable::new(
    &[
        (
            thresholds::CAUTION,
            Some(GaugeSegment::new(0.0, thresholds::CAUTION, 0.0, 20.0)),
        ),
        (
            thresholds::DANGEROUS,
            Some(GaugeSegment::new(
                thresholds::CAUTION,
                thresholds::DANGEROUS,
                20.0,
                20.0,
            )),
        ),
        (
            thresholds::EXTREME,
            Some(GaugeSegment::new(
                thresholds::DANGEROUS,
                thresholds::EXTREME,
                40.0,
                30.0,
            )),
        ),
        (
            thresholds::LETHAL,
            Some(GaugeSegment::new(
                thresholds::EXTREME,
                thresholds::LETHAL,
                70.0,
                20.0,
            )),
        ),
    ],
    None,
);

/// Gauge floor reached at the lethal threshold.
const LETHAL_GAUGE_FLOOR: u8 = 90;

/// Gauge points per decade above the lethal threshold.
const LETHAL_GAUGE_PER_DECADE: f64 = 5.0;

/// Dial position in `0..=100`.
///
/// Linear within each tier's sub-range (0–20, 20–40, 40–70, 70–90), then
/// `90 + 5 * log10(intensity / 1000)` truncated and capped at 100, which is
/// reached at exactly 100,000 μSv/h.
pub fn percentage_of_scale(intensity: f64) -> u8 {
    if intensity <= 0.0 {
        return 0;
    }
    match GAUGE.lookup(intensity) {
        Some(segment) => segment.position(intensity) as u8,
        None => {
            let decades = (intensity / thresholds::LETHAL).log10();
            let extra = (decades * LETHAL_GAUGE_PER_DECADE) as u8;
            LETHAL_GAUGE_FLOOR.saturating_add(extra).min(100)
        }
    }
}

/// Annual dose limit used for safe exposure time, in μSv.
pub const ANNUAL_DOSE_LIMIT: f64 = 1_000_000.0;

pub const HOURS_PER_YEAR: f64 = 8760.0;

/// Hours per year at `intensity` that keep the cumulative dose within
/// [`ANNUAL_DOSE_LIMIT`], capped at a full year.
pub fn safe_exposure_hours(intensity: f64) -> f64 {
    if intensity <= 0.0 {
        return HOURS_PER_YEAR;
    }
    (ANNUAL_DOSE_LIMIT / intensity).min(HOURS_PER_YEAR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(classify(0.0), DangerTier::Safe);
        assert_eq!(classify(0.499), DangerTier::Safe);
        assert_eq!(classify(0.5), DangerTier::Caution);
        assert_eq!(classify(1.99), DangerTier::Caution);
        assert_eq!(classify(2.0), DangerTier::Dangerous);
        assert_eq!(classify(99.9), DangerTier::Dangerous);
        assert_eq!(classify(100.0), DangerTier::Extreme);
        assert_eq!(classify(999.9), DangerTier::Extreme);
        assert_eq!(classify(1000.0), DangerTier::Lethal);
        assert_eq!(classify(1e9), DangerTier::Lethal);
    }

    #[test]
    fn test_tiers_ordered_by_risk() {
        assert!(DangerTier::ALL.windows(2).all(|w| w[0] < w[1]));
        for tier in DangerTier::ALL {
            assert_eq!(classify(tier.lower_threshold()), tier);
        }
    }

    #[test]
    fn test_tier_table_ordered() {
        assert!(TIERS.is_ordered());
        assert!(GAUGE.is_ordered());
    }

    #[test]
    fn test_descriptions_lead_with_label() {
        for tier in DangerTier::ALL {
            assert!(tier.description().contains(tier.label()));
        }
        assert_eq!(DangerTier::Extreme.to_string(), "EXTREME");
    }

    #[test]
    fn test_percentage_segments() {
        assert_eq!(percentage_of_scale(0.0), 0);
        assert_eq!(percentage_of_scale(0.25), 10);
        assert_eq!(percentage_of_scale(0.5), 20);
        assert_eq!(percentage_of_scale(1.25), 30);
        assert_eq!(percentage_of_scale(2.0), 40);
        assert_eq!(percentage_of_scale(51.0), 55);
        assert_eq!(percentage_of_scale(100.0), 70);
        assert_eq!(percentage_of_scale(550.0), 80);
        assert_eq!(percentage_of_scale(1000.0), 90);
    }

    #[test]
    fn test_percentage_log_region() {
        assert_eq!(percentage_of_scale(10_000.0), 95);
        assert_eq!(percentage_of_scale(99_999.0), 99);
        assert_eq!(percentage_of_scale(100_000.0), 100);
        assert_eq!(percentage_of_scale(1e9), 100);
    }

    #[test]
    fn test_percentage_continuous_at_lethal() {
        assert_eq!(percentage_of_scale(999.999), 89);
        assert_eq!(percentage_of_scale(1000.0), 90);
        assert_eq!(percentage_of_scale(1000.001), 90);
    }

    #[test]
    fn test_safe_exposure_hours() {
        assert_eq!(safe_exposure_hours(0.0), HOURS_PER_YEAR);
        assert_eq!(safe_exposure_hours(0.1), HOURS_PER_YEAR);
        assert_eq!(safe_exposure_hours(1000.0), 1000.0);
        assert_eq!(safe_exposure_hours(1_000_000.0), 1.0);
        // Crossover where the annual limit first binds
        let crossover = ANNUAL_DOSE_LIMIT / HOURS_PER_YEAR;
        assert_eq!(safe_exposure_hours(crossover * 0.99), HOURS_PER_YEAR);
        assert!(safe_exposure_hours(crossover * 1.01) < HOURS_PER_YEAR);
    }
}
