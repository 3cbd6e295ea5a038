/// Malformed or out-of-range caller input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("required field missing: {field}")]
    MissingField { field: String },

    #[error("field {field} is not finite")]
    NonFinite { field: String },

    #[error("field {field} out of range ({value}): {reason}")]
    OutOfRange {
        field: String,
        value: f64,
        reason: String,
    },

    #[error("years must be between 1 and {max}, got {years}")]
    YearsOutOfRange { years: i64, max: u32 },

    #[error("invalid input: {reason}")]
    Invalid { reason: String },
}

impl ValidationError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub fn non_finite(field: impl Into<String>) -> Self {
        Self::NonFinite {
            field: field.into(),
        }
    }

    pub fn out_of_range(field: impl Into<String>, value: f64, reason: impl Into<String>) -> Self {
        Self::OutOfRange {
            field: field.into(),
            value,
            reason: reason.into(),
        }
    }
}
