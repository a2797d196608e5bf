//! Pure radiation exposure logic for RadMeter.
//!
//! This crate turns a single dose-rate reading into a danger tier and a
//! health-effect assessment. It has no I/O and no mutable global state:
//! every function takes plain values and returns plain values, and all
//! threshold tables are read-only statics, so any number of threads can
//! call into it at once.
//!
//! # Pipeline
//!
//! raw reading → canonical μSv/h → [`DangerTier`] → [`HealthEffectBundle`]
//! → text report
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`brackets`] | Ordered `(upper_bound, payload)` tables and the shared lookup |
//! | [`classify`] | Danger tiers, gauge percentage, safe exposure hours |
//! | [`error`] | `InvalidUnit` / `InvalidInput` error kinds |
//! | [`health`] | Immediate and long-term effects, recommendations, survival |
//! | [`report`] | Medical report text and gauge summary |
//! | [`units`] | Unit conversion, validation, display formatting |
//!
//! ```
//! use radmeter_logic::{analyze, format_report, Reading, RadiationUnit};
//!
//! let reading = Reading::parse(1.0, "mSv/h").unwrap();
//! let intensity = reading.validate().unwrap();
//! let bundle = analyze(intensity, 1.0).unwrap();
//! let report = format_report(&bundle);
//! assert!(report.starts_with("MEDICAL ANALYSIS"));
//! assert_eq!(reading.unit, RadiationUnit::MillisievertsPerHour);
//! ```

pub mod brackets;
pub mod classify;
pub mod error;
pub mod health;
pub mod report;
pub mod units;

pub use classify::{classify, percentage_of_scale, safe_exposure_hours, DangerTier};
pub use error::{RadiationError, Result};
pub use health::{analyze, HealthEffectBundle, Severity, TimedEffect};
pub use report::{format_report, summarize, ReadingSummary};
pub use units::{
    auto_format, convert_tagged, convert_to_canonical, is_valid, RadiationUnit, Reading,
};
