//! Health-effect derivation from a classified intensity.
//!
//! Each field of [`HealthEffectBundle`] comes from its own bracket table.
//! The tables are independent: immediate effects and medical labels split at
//! 2 / 100 / 1,000 / 10,000 μSv/h, long-term effects add a split at 0.5, and
//! recommendations and protocols are keyed by [`DangerTier`]. Only survival
//! depends on the exposure duration, via the accumulated dose.
//!
//! ```
//! use radmeter_logic::classify::DangerTier;
//! use radmeter_logic::health::analyze;
//!
//! let bundle = analyze(0.3, 1.0).unwrap();
//! assert_eq!(bundle.tier, DangerTier::Safe);
//! assert_eq!(bundle.immediate_effects.len(), 1);
//! assert!(bundle.survival_treated >= bundle.survival_untreated);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::brackets::BracketTable;
use crate::classify::DangerTier;
use crate::error::{RadiationError, Result};
use crate::units::validate_canonical;

/// Exposure duration assumed when the caller gives none.
pub const DEFAULT_EXPOSURE_HOURS: f64 = 1.0;

/// Severity of an acute symptom, mildest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    None,
    Mild,
    Moderate,
    Severe,
    Critical,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Mild => "MILD",
            Self::Moderate => "MODERATE",
            Self::Severe => "SEVERE",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One step of the acute symptom timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedEffect {
    /// Time window after exposure, e.g. "0-2 hours".
    pub window: String,
    pub symptom: String,
    pub severity: Severity,
}

/// Complete health assessment for one reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthEffectBundle {
    pub tier: DangerTier,
    /// Acute symptoms in chronological order.
    pub immediate_effects: Vec<TimedEffect>,
    /// Long-term risk statements, cancer risk first.
    pub long_term_effects: Vec<String>,
    /// Actions in escalating order.
    pub recommendations: Vec<String>,
    pub medical_classification: String,
    pub emergency_protocol: String,
    /// Survival percentage without medical treatment.
    pub survival_untreated: f64,
    /// Survival percentage with medical treatment.
    pub survival_treated: f64,
}

type EffectRow = (&'static str, &'static str, Severity);

const ASYMPTOMATIC: &[EffectRow] = &[("0-24 hours", "No observable symptoms", Severity::None)];

const MILD_EFFECTS: &[EffectRow] = &[
    ("0-6 hours", "Possible mild fatigue", Severity::Mild),
    ("6-24 hours", "Slight decrease in appetite", Severity::Mild),
];

const MODERATE_EFFECTS: &[EffectRow] = &[
    ("0-2 hours", "Occasional nausea and vomiting", Severity::Moderate),
    ("2-6 hours", "Fatigue and dizziness", Severity::Moderate),
    ("6-24 hours", "Loss of appetite", Severity::Moderate),
];

const SEVERE_EFFECTS: &[EffectRow] = &[
    ("0-2 hours", "Severe nausea and vomiting", Severity::Severe),
    ("2-6 hours", "Extreme fatigue, dizziness", Severity::Severe),
    ("6-24 hours", "Diarrhea, fever", Severity::Severe),
    ("1-7 days", "Acute radiation syndrome", Severity::Severe),
];

const CRITICAL_EFFECTS: &[EffectRow] = &[
    ("0-1 hour", "Immediate nausea and vomiting", Severity::Critical),
    ("1-4 hours", "Cardiovascular collapse", Severity::Critical),
    ("4-48 hours", "Acute neurological syndrome", Severity::Critical),
    ("2-14 days", "Probable death", Severity::Critical),
];

static IMMEDIATE_EFFECTS: BracketTable<&[EffectRow]> = BracketTable::new(
    &[
        (2.0, ASYMPTOMATIC),
        (100.0, MILD_EFFECTS),
        (1_000.0, MODERATE_EFFECTS),
        (10_000.0, SEVERE_EFFECTS),
    ],
    CRITICAL_EFFECTS,
);

const BACKGROUND_RISK: &[&str] = &[
    "Cancer risk: Not increased",
    "No detectable long-term effects",
];

const MINIMAL_RISK: &[&str] = &[
    "Cancer risk: Slightly increased (<0.1%)",
    "Genetic effects: Minimal or none",
];

const LOW_RISK: &[&str] = &[
    "Cancer risk: LOW (0.1-5% probability)",
    "Possible temporary effects on fertility",
    "Minor detectable chromosomal damage",
];

const MODERATE_RISK: &[&str] = &[
    "Cancer risk: MODERATE (5-20% probability)",
    "Fertility: Significant temporary reduction",
    "Chromosomal damage: MODERATE",
    "Cataracts: Possible development",
];

const HIGH_RISK: &[&str] = &[
    "Cancer risk: HIGH (20-50% probability)",
    "Fertility: SEVERELY COMPROMISED",
    "Chromosomal damage: SEVERE",
    "Cataracts: Probable development",
    "Premature aging",
];

const EXTREME_RISK: &[&str] = &[
    "Cancer risk: VERY HIGH (>70% probability)",
    "Fertility: PERMANENTLY DAMAGED",
    "Chromosomal damage: EXTREME",
    "Multiple types of cancer",
    "Multiple organ failure (if survived)",
];

static LONG_TERM_EFFECTS: BracketTable<&[&str]> = BracketTable::new(
    &[
        (0.5, BACKGROUND_RISK),
        (2.0, MINIMAL_RISK),
        (100.0, LOW_RISK),
        (1_000.0, MODERATE_RISK),
        (10_000.0, HIGH_RISK),
    ],
    EXTREME_RISK,
);

static MEDICAL_CLASSIFICATION: BracketTable<&str> = BracketTable::new(
    &[
        (2.0, "No radiation syndrome"),
        (100.0, "Mild radiation syndrome"),
        (1_000.0, "Moderate radiation syndrome"),
        (
            10_000.0,
            "⚠️ ACUTE RADIATION SYNDROME - ACUTE NEUROLOGICAL SYNDROME RISK",
        ),
    ],
    "☠️ ACUTE NEUROLOGICAL SYNDROME",
);

/// Survival percentages for one dose bracket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurvivalOdds {
    pub untreated: f64,
    pub treated: f64,
}

impl SurvivalOdds {
    const fn new(untreated: f64, treated: f64) -> Self {
        Self { untreated, treated }
    }
}

// Keyed by accumulated dose; a dose on a bound stays in the milder bracket.
static SURVIVAL: BracketTable<SurvivalOdds> = BracketTable::upper_inclusive(
    &[
        (1_000.0, SurvivalOdds::new(98.0, 99.0)),
        (2_000.0, SurvivalOdds::new(80.0, 90.0)),
        (4_000.0, SurvivalOdds::new(50.0, 70.0)),
        (6_000.0, SurvivalOdds::new(20.0, 50.0)),
        (10_000.0, SurvivalOdds::new(5.0, 20.0)),
    ],
    SurvivalOdds::new(1.0, 5.0),
);

/// Acute symptom timeline for a canonical intensity.
pub fn immediate_effects(intensity: f64) -> Vec<TimedEffect> {
    IMMEDIATE_EFFECTS
        .lookup(intensity)
        .iter()
        .map(|&(window, symptom, severity)| TimedEffect {
            window: window.to_string(),
            symptom: symptom.to_string(),
            severity,
        })
        .collect()
}

pub fn long_term_effects(intensity: f64) -> Vec<String> {
    LONG_TERM_EFFECTS
        .lookup(intensity)
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// The cancer-risk statement of the long-term bracket.
pub fn cancer_risk_info(intensity: f64) -> &'static str {
    LONG_TERM_EFFECTS
        .lookup(intensity)
        .first()
        .copied()
        .unwrap_or_default()
}

fn recommendation_rows(tier: DangerTier) -> &'static [&'static str] {
    match tier {
        DangerTier::Safe => &[
            "✅ Continue normal activities",
            "📊 Routine monitoring if occupational",
        ],
        DangerTier::Caution => &[
            "⚠️ Limit exposure time",
            "📋 Document the exposure",
            "👥 Consult the safety supervisor",
        ],
        DangerTier::Dangerous => &[
            "🚨 REDUCE EXPOSURE TIME",
            "🦺 Use personal protective equipment",
            "🏥 Medical monitoring recommended",
            "📞 Report to the competent authorities",
        ],
        DangerTier::Extreme => &[
            "☢️ EVACUATION RECOMMENDED",
            "🏥 PREVENTIVE MEDICAL ATTENTION",
            "💊 Consider potassium iodide",
            "📞 CONTACT EMERGENCY SERVICES",
        ],
        DangerTier::Lethal => &[
            "🚨 MANDATORY IMMEDIATE EVACUATION",
            "🏥 URGENT MEDICAL ATTENTION",
            "💊 POTASSIUM IODIDE TREATMENT",
            "📞 ALERT NUCLEAR EMERGENCY SERVICES",
            "🛡️ SHELTER IN A PROTECTED LOCATION",
        ],
    }
}

pub fn recommendations(tier: DangerTier) -> Vec<String> {
    recommendation_rows(tier)
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub fn medical_classification(intensity: f64) -> &'static str {
    MEDICAL_CLASSIFICATION.lookup(intensity)
}

pub fn emergency_protocol(tier: DangerTier) -> &'static str {
    match tier {
        DangerTier::Safe | DangerTier::Caution => "Standard monitoring protocol",
        DangerTier::Dangerous => "Elevated occupational exposure protocol",
        DangerTier::Extreme => "RADIOLOGICAL EMERGENCY PROTOCOL",
        DangerTier::Lethal => "🚨 NUCLEAR CATASTROPHE PROTOCOL",
    }
}

/// General time / distance / shielding guidance, independent of the reading.
pub fn protection_measures() -> &'static [&'static str] {
    &[
        "Time: minimize the time spent near the source",
        "Distance: dose rate falls with the square of the distance",
        "Shielding: put dense material (lead, concrete, water) between you and the source",
        "Contamination: remove outer clothing and wash exposed skin",
        "Information: follow instructions from emergency authorities",
    ]
}

/// Accumulated dose in μSv for `hours` at `intensity` μSv/h.
pub fn accumulated_dose(intensity: f64, hours: f64) -> f64 {
    intensity * hours
}

/// Survival percentages for an accumulated dose.
pub fn survival_odds(dose: f64) -> SurvivalOdds {
    *SURVIVAL.lookup(dose)
}

pub fn survival_probability(dose: f64, with_treatment: bool) -> f64 {
    let odds = survival_odds(dose);
    if with_treatment {
        odds.treated
    } else {
        odds.untreated
    }
}

fn validate_duration(hours: f64) -> Result<f64> {
    if !hours.is_finite() {
        Err(RadiationError::InvalidInput {
            value: hours,
            reason: "exposure duration is not a finite number",
        })
    } else if hours < 0.0 {
        Err(RadiationError::InvalidInput {
            value: hours,
            reason: "exposure duration is negative",
        })
    } else {
        Ok(hours)
    }
}

/// Derive the full health assessment for `intensity` μSv/h sustained over
/// `hours`.
///
/// Fails with `InvalidInput` before any lookup if the intensity is negative,
/// non-finite or above the practical ceiling, or the duration is negative or
/// non-finite.
pub fn analyze(intensity: f64, hours: f64) -> Result<HealthEffectBundle> {
    let (intensity, hours) = match (validate_canonical(intensity), validate_duration(hours)) {
        (Ok(i), Ok(h)) => (i, h),
        (Err(e), _) | (_, Err(e)) => {
            log::debug!("Rejected analysis input: {}", e);
            return Err(e);
        }
    };

    let tier = DangerTier::from_intensity(intensity);
    let dose = accumulated_dose(intensity, hours);
    let odds = survival_odds(dose);

    log::debug!(
        "Analyzed {:.3} μSv/h over {:.2}h: tier={} dose={:.1} μSv survival={}/{}%",
        intensity,
        hours,
        tier,
        dose,
        odds.untreated,
        odds.treated
    );

    Ok(HealthEffectBundle {
        tier,
        immediate_effects: immediate_effects(intensity),
        long_term_effects: long_term_effects(intensity),
        recommendations: recommendations(tier),
        medical_classification: medical_classification(intensity).to_string(),
        emergency_protocol: emergency_protocol(tier).to_string(),
        survival_untreated: odds.untreated,
        survival_treated: odds.treated,
    })
}

/// [`analyze`] over [`DEFAULT_EXPOSURE_HOURS`].
pub fn analyze_default(intensity: f64) -> Result<HealthEffectBundle> {
    analyze(intensity, DEFAULT_EXPOSURE_HOURS)
}
