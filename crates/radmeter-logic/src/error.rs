//! Error kinds raised by conversion, validation and analysis.

/// Failure raised by the radiation engine.
///
/// Both kinds are local and recoverable. Every operation is deterministic,
/// so retrying with the same input reproduces the same error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RadiationError {
    /// Unit tag not recognized.
    #[error("unknown radiation unit: {0:?}")]
    InvalidUnit(String),

    /// Negative, non-finite, or above the practical ceiling.
    #[error("invalid input {value}: {reason}")]
    InvalidInput { value: f64, reason: &'static str },
}

impl RadiationError {
    pub(crate) fn negative(value: f64) -> Self {
        Self::InvalidInput {
            value,
            reason: "value is negative",
        }
    }

    pub(crate) fn not_finite(value: f64) -> Self {
        Self::InvalidInput {
            value,
            reason: "value is not a finite number",
        }
    }

    pub(crate) fn above_ceiling(value: f64) -> Self {
        Self::InvalidInput {
            value,
            reason: "value exceeds the practical ceiling of 1e9 μSv/h",
        }
    }
}

pub type Result<T> = std::result::Result<T, RadiationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_identify_kind() {
        let unit = RadiationError::InvalidUnit("rem".into());
        assert_eq!(unit.to_string(), "unknown radiation unit: \"rem\"");

        let input = RadiationError::negative(-1.0);
        assert!(input.to_string().contains("negative"));
        assert!(matches!(input, RadiationError::InvalidInput { value, .. } if value == -1.0));
    }
}
