use std::fmt;
use std::num::{ParseFloatError, ParseIntError};

use crate::types::NamedEnum;
use crate::target::TargetType;

/// Boxed error used by converters outside this crate.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The underlying reason a raw parameter could not be converted.
///
/// The original parse error is kept as the `source` of every variant that
/// wraps one, so diagnostics can walk the full chain.
#[derive(Debug, thiserror::Error)]
pub enum ConversionCause {
    /// Text is not a base-10 integer, or is out of range for the width.
    #[error("invalid integer: {0}")]
    Integer(#[from] ParseIntError),

    /// Text is not a floating point literal.
    #[error("invalid number: {0}")]
    Float(#[from] ParseFloatError),

    /// Token is not one of the recognized boolean spellings.
    #[error("unrecognized boolean token `{token}`")]
    Boolean { token: String },

    /// No enumeration member carries this symbolic name.
    #[error("`{value}` is not a variant of {enum_name} (expected one of: {expected})")]
    UnknownVariant {
        value: String,
        enum_name: &'static str,
        expected: String,
    },

    /// Text does not match the date/time pattern in effect.
    #[error("invalid date/time for pattern `{pattern}`: {source}")]
    Temporal {
        pattern: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Text is not a UUID.
    #[error("invalid uuid: {0}")]
    Uuid(#[from] uuid::Error),

    /// Text is not an absolute URL.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// A converted value could not be represented as JSON.
    #[error("cannot encode value: {0}")]
    Encode(#[from] serde_json::Error),

    /// Failure reported by a user-supplied converter.
    #[error("{0}")]
    Other(#[source] BoxError),
}

impl ConversionCause {
    /// Builds an [`UnknownVariant`](Self::UnknownVariant) cause listing the
    /// valid names of `E`.
    pub fn unknown_variant<E: NamedEnum>(value: &str) -> Self {
        let expected = E::variants()
            .iter()
            .map(|variant| variant.name())
            .collect::<Vec<_>>()
            .join(", ");

        Self::UnknownVariant {
            value: value.to_owned(),
            enum_name: TargetType::of::<E>().short_name(),
            expected,
        }
    }

    /// Wraps a date/time parse error together with the pattern that was used.
    pub fn temporal(pattern: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::Temporal {
            pattern: pattern.into(),
            source,
        }
    }

    /// Wraps an arbitrary error from a custom converter.
    pub fn other(error: impl Into<BoxError>) -> Self {
        Self::Other(error.into())
    }

    /// Machine-readable code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Integer(_) => "CONVERT_INTEGER",
            Self::Float(_) => "CONVERT_FLOAT",
            Self::Boolean { .. } => "CONVERT_BOOLEAN",
            Self::UnknownVariant { .. } => "CONVERT_UNKNOWN_VARIANT",
            Self::Temporal { .. } => "CONVERT_TEMPORAL",
            Self::Uuid(_) => "CONVERT_UUID",
            Self::Url(_) => "CONVERT_URL",
            Self::Encode(_) => "CONVERT_ENCODE",
            Self::Other(_) => "CONVERT_OTHER",
        }
    }
}

/// A failed conversion, optionally carrying a fallback of the target type.
///
/// Errors without a default are *hard*: the input is structurally invalid
/// and no value may stand in for it. Errors with a default are
/// *recoverable*: the pipeline may bind the default and carry on. The
/// converter only supplies the default; whether it is used is the
/// pipeline's decision.
pub struct ConversionError<T> {
    cause: ConversionCause,
    default: Option<T>,
    input: String,
    target: &'static str,
}

impl<T> ConversionError<T> {
    /// A failure with no usable fallback.
    pub fn hard(target: &TargetType, input: &str, cause: impl Into<ConversionCause>) -> Self {
        Self {
            cause: cause.into(),
            default: None,
            input: input.to_owned(),
            target: target.short_name(),
        }
    }

    /// A failure the pipeline may recover from by binding `default`.
    pub fn recoverable(
        target: &TargetType,
        input: &str,
        cause: impl Into<ConversionCause>,
        default: T,
    ) -> Self {
        Self {
            cause: cause.into(),
            default: Some(default),
            input: input.to_owned(),
            target: target.short_name(),
        }
    }

    /// The underlying parse failure.
    pub fn cause(&self) -> &ConversionCause {
        &self.cause
    }

    /// The fallback value, if this error is recoverable.
    pub fn default_value(&self) -> Option<&T> {
        self.default.as_ref()
    }

    /// Consumes the error, returning its fallback value.
    pub fn into_default(self) -> Option<T> {
        self.default
    }

    /// Consumes the error, returning the cause and the fallback.
    pub fn into_parts(self) -> (ConversionCause, Option<T>) {
        (self.cause, self.default)
    }

    /// Whether a fallback value is available.
    pub fn is_recoverable(&self) -> bool {
        self.default.is_some()
    }

    /// The raw input that failed to convert.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Type name of the conversion target, without its module path.
    pub fn target(&self) -> &'static str {
        self.target
    }

    /// Machine-readable code of the cause.
    pub fn code(&self) -> &'static str {
        self.cause.code()
    }

    /// Transforms the fallback value, keeping cause and diagnostics.
    pub fn map_default<U>(self, f: impl FnOnce(T) -> U) -> ConversionError<U> {
        ConversionError {
            cause: self.cause,
            default: self.default.map(f),
            input: self.input,
            target: self.target,
        }
    }

    /// Like [`map_default`](Self::map_default), but a fallback that cannot be
    /// transformed turns the error into a hard one.
    pub(crate) fn filter_map_default<U>(self, f: impl FnOnce(T) -> Option<U>) -> ConversionError<U> {
        ConversionError {
            cause: self.cause,
            default: self.default.and_then(f),
            input: self.input,
            target: self.target,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ConversionError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionError")
            .field("target", &self.target)
            .field("input", &self.input)
            .field("cause", &self.cause)
            .field("default", &self.default)
            .finish()
    }
}

impl<T> fmt::Display for ConversionError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot convert `{}` to {}: {}",
            self.input, self.target, self.cause
        )
    }
}

impl<T: fmt::Debug> std::error::Error for ConversionError<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

/// Errors raised while looking up converters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// No converter is registered under this name or alias.
    #[error("no converter registered for type `{name}`")]
    UnknownType { name: String },

    /// No converter is registered for this Rust type.
    #[error("no converter registered for {type_name}")]
    NotRegistered { type_name: &'static str },

    /// The name is already bound to a converter for another type.
    #[error("type name `{name}` is already bound to {existing}")]
    DuplicateName {
        name: String,
        existing: &'static str,
    },
}

impl RegistryError {
    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownType { .. } => "REGISTRY_UNKNOWN_TYPE",
            Self::NotRegistered { .. } => "REGISTRY_NOT_REGISTERED",
            Self::DuplicateName { .. } => "REGISTRY_DUPLICATE_NAME",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    fn int_target() -> TargetType {
        TargetType::of::<i32>()
    }

    #[test]
    fn hard_error_has_no_default() {
        let cause = "x".parse::<i32>().unwrap_err();
        let err: ConversionError<i32> = ConversionError::hard(&int_target(), "x", cause);

        assert!(!err.is_recoverable());
        assert_eq!(err.default_value(), None);
        assert_eq!(err.into_default(), None);
    }

    #[test]
    fn recoverable_error_carries_default() {
        let cause = "x".parse::<i32>().unwrap_err();
        let err = ConversionError::recoverable(&int_target(), "x", cause, 0);

        assert!(err.is_recoverable());
        assert_eq!(err.default_value(), Some(&0));
        assert_eq!(err.input(), "x");
        assert_eq!(err.target(), "i32");
        assert_eq!(err.code(), "CONVERT_INTEGER");
    }

    #[test]
    fn display_mentions_input_and_target() {
        let cause = "abc".parse::<i32>().unwrap_err();
        let err = ConversionError::recoverable(&int_target(), "abc", cause, 0);

        assert_eq!(
            err.to_string(),
            "cannot convert `abc` to i32: invalid integer: invalid digit found in string"
        );
    }

    #[test]
    fn source_chain_preserves_parse_error() {
        let cause = "abc".parse::<i32>().unwrap_err();
        let err = ConversionError::recoverable(&int_target(), "abc", cause.clone(), 0);

        let first = err.source().expect("cause is the first source");
        let original = first.source().expect("parse error is preserved");
        assert_eq!(original.to_string(), cause.to_string());
        assert!(matches!(err.cause(), ConversionCause::Integer(e) if *e == cause));
    }

    #[test]
    fn map_default_keeps_diagnostics() {
        let cause = "abc".parse::<i32>().unwrap_err();
        let err = ConversionError::recoverable(&int_target(), "abc", cause, 0);
        let mapped = err.map_default(|v| v.to_string());

        assert_eq!(mapped.default_value().map(String::as_str), Some("0"));
        assert_eq!(mapped.input(), "abc");
        assert_eq!(mapped.target(), "i32");
    }

    #[test]
    fn filter_map_default_can_drop_fallback() {
        let cause = "abc".parse::<i32>().unwrap_err();
        let err = ConversionError::recoverable(&int_target(), "abc", cause, 0);
        let mapped: ConversionError<u8> = err.filter_map_default(|_| None);

        assert!(!mapped.is_recoverable());
    }

    #[test]
    fn other_cause_wraps_custom_errors() {
        let cause = ConversionCause::other("custom failure");
        assert_eq!(cause.code(), "CONVERT_OTHER");
        assert_eq!(cause.to_string(), "custom failure");
    }

    #[test]
    fn registry_error_codes() {
        let err = RegistryError::UnknownType {
            name: "money".into(),
        };
        assert_eq!(err.code(), "REGISTRY_UNKNOWN_TYPE");
        assert_eq!(err.to_string(), "no converter registered for type `money`");
    }
}
