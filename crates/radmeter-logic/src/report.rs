//! Text rendering of a health assessment, plus the gauge summary a display
//! shows next to it.
//!
//! The report lists every bundle entry in the order the bundle holds it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classify::{percentage_of_scale, safe_exposure_hours, DangerTier};
use crate::error::Result;
use crate::health::HealthEffectBundle;
use crate::units::{auto_format, validate_canonical};

const RULE: &str = "══════════════════════════════════════";

impl fmt::Display for HealthEffectBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MEDICAL ANALYSIS")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f)?;

        writeln!(f, "CLASSIFICATION: {}", self.medical_classification)?;
        writeln!(f, "PROTOCOL: {}", self.emergency_protocol)?;
        writeln!(f)?;

        writeln!(f, "IMMEDIATE EFFECTS:")?;
        for effect in &self.immediate_effects {
            writeln!(f, "• [{}]: {}", effect.window, effect.symptom)?;
        }
        writeln!(f)?;

        writeln!(f, "LONG-TERM EFFECTS:")?;
        for effect in &self.long_term_effects {
            writeln!(f, "• {}", effect)?;
        }
        writeln!(f)?;

        writeln!(f, "RECOMMENDATIONS:")?;
        for rec in &self.recommendations {
            writeln!(f, "{}", rec)?;
        }
        writeln!(f)?;

        writeln!(f, "SURVIVAL:")?;
        writeln!(
            f,
            "Without treatment: {:.0}%",
            self.survival_untreated.round()
        )?;
        writeln!(f, "With treatment: {:.0}%", self.survival_treated.round())
    }
}

/// Render the fixed-section medical report.
pub fn format_report(bundle: &HealthEffectBundle) -> String {
    bundle.to_string()
}

/// Gauge-facing figures for one canonical intensity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingSummary {
    /// Intensity in its display unit, e.g. "1.000 mSv/h".
    pub display: String,
    pub tier: DangerTier,
    pub description: String,
    /// Dial position in `0..=100`.
    pub percentage: u8,
    /// Hours per year within the annual dose limit.
    pub safe_hours_per_year: f64,
}

/// Validate `intensity` and collect its gauge figures.
pub fn summarize(intensity: f64) -> Result<ReadingSummary> {
    let intensity = validate_canonical(intensity)?;
    let tier = DangerTier::from_intensity(intensity);
    Ok(ReadingSummary {
        display: auto_format(intensity),
        tier,
        description: tier.description().to_string(),
        percentage: percentage_of_scale(intensity),
        safe_hours_per_year: safe_exposure_hours(intensity),
    })
}

impl fmt::Display for ReadingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {}% | safe {:.1} h/year",
            self.display, self.description, self.percentage, self.safe_hours_per_year
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::{analyze, Severity, TimedEffect};

    fn sample_bundle() -> HealthEffectBundle {
        HealthEffectBundle {
            tier: DangerTier::Caution,
            immediate_effects: vec![
                TimedEffect {
                    window: "later".into(),
                    symptom: "second".into(),
                    severity: Severity::Mild,
                },
                TimedEffect {
                    window: "earlier".into(),
                    symptom: "first".into(),
                    severity: Severity::Mild,
                },
            ],
            long_term_effects: vec!["b".into(), "a".into(), "b".into()],
            recommendations: vec!["Do this".into()],
            medical_classification: "Test class".into(),
            emergency_protocol: "Test protocol".into(),
            survival_untreated: 49.5,
            survival_treated: 70.4,
        }
    }

    #[test]
    fn test_report_sections_in_order() {
        let report = format_report(&analyze(5000.0, 2.0).unwrap());
        let headings = [
            "MEDICAL ANALYSIS",
            "CLASSIFICATION:",
            "PROTOCOL:",
            "IMMEDIATE EFFECTS:",
            "LONG-TERM EFFECTS:",
            "RECOMMENDATIONS:",
            "SURVIVAL:",
            "Without treatment:",
            "With treatment:",
        ];
        let positions: Vec<usize> = headings
            .iter()
            .map(|h| report.find(h).unwrap_or_else(|| panic!("missing {}", h)))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_report_preserves_order_and_duplicates() {
        let report = format_report(&sample_bundle());
        let second = report.find("• [later]: second").unwrap();
        let first = report.find("• [earlier]: first").unwrap();
        assert!(second < first);
        assert_eq!(report.matches("• b\n").count(), 2);
        assert!(report.find("• b\n").unwrap() < report.find("• a\n").unwrap());
    }

    #[test]
    fn test_survival_rounded() {
        let report = format_report(&sample_bundle());
        assert!(report.contains("Without treatment: 50%\n"));
        assert!(report.contains("With treatment: 70%\n"));
    }

    #[test]
    fn test_safe_report_text() {
        let report = format_report(&analyze(0.3, 1.0).unwrap());
        assert!(report.contains("CLASSIFICATION: No radiation syndrome\n"));
        assert!(report.contains("• [0-24 hours]: No observable symptoms\n"));
        assert!(report.contains("Without treatment: 98%\n"));
        assert!(report.contains("With treatment: 99%\n"));
        assert!(report.ends_with("With treatment: 99%\n"));
    }

    #[test]
    fn test_summary() {
        let summary = summarize(1000.0).unwrap();
        assert_eq!(summary.display, "1.000 mSv/h");
        assert_eq!(summary.tier, DangerTier::Lethal);
        assert_eq!(summary.percentage, 90);
        assert_eq!(summary.safe_hours_per_year, 1000.0);
        assert!(summary.to_string().starts_with("1.000 mSv/h | ☠️ LETHAL"));
        assert!(summarize(-3.0).is_err());
    }
}
