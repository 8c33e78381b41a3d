//! Select configuration errors

use thiserror::Error;

/// Errors raised while validating a select configuration
///
/// Interaction itself never fails; only building a widget from an invalid
/// description does.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A layout dimension that must be positive was zero, negative or NaN
    #[error("Layout dimension `{name}` must be positive, got {value}")]
    NonPositiveDimension {
        /// Field name as it appears in configuration
        name: &'static str,
        /// The rejected value
        value: f32,
    },

    /// A layout position was NaN or infinite
    #[error("Layout coordinate `{name}` must be finite, got {value}")]
    NonFiniteCoordinate {
        /// Field name as it appears in configuration
        name: &'static str,
        /// The rejected value
        value: f32,
    },

    /// A layout dimension was negative or not finite
    #[error("Layout dimension `{name}` must be a finite, non-negative number, got {value}")]
    InvalidDimension {
        /// Field name as it appears in configuration
        name: &'static str,
        /// The rejected value
        value: f32,
    },

    /// Scroll engine step or interval was zero
    #[error("Scroll engine {0} must be greater than zero")]
    InvalidScrollEngine(&'static str),

    /// The listbox id is required for `aria-controls`
    #[error("Listbox id must not be empty")]
    EmptyListboxId,

    /// A hit target name that doesn't name any part of the widget
    #[error(
        "Unknown target `{0}` \
         (expected combobox, option:<index>, scroll-up, scroll-down, gap or outside)"
    )]
    UnknownTarget(String),
}

/// Result type for select configuration
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Require `value` to be finite and strictly positive
pub(crate) fn positive(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveDimension { name, value })
    }
}

/// Require `value` to be finite and non-negative
pub(crate) fn non_negative(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDimension { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive() {
        assert!(positive("h", 1.0).is_ok());
        assert_eq!(
            positive("h", 0.0),
            Err(ConfigError::NonPositiveDimension {
                name: "h",
                value: 0.0
            })
        );
        assert!(positive("h", f32::NAN).is_err());
    }

    #[test]
    fn test_non_negative() {
        assert!(non_negative("gap", 0.0).is_ok());
        assert!(non_negative("gap", -1.0).is_err());
        assert!(non_negative("gap", f32::INFINITY).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::InvalidScrollEngine("step");
        assert_eq!(err.to_string(), "Scroll engine step must be greater than zero");

        let err = ConfigError::NonFiniteCoordinate {
            name: "x",
            value: f32::NAN,
        };
        assert_eq!(err.to_string(), "Layout coordinate `x` must be finite, got NaN");
    }
}
