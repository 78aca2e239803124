use std::borrow::Cow;

use chrono::{DateTime, FixedOffset, NaiveDateTime};

use super::non_blank;
use crate::context::RequestContext;
use crate::converter::{Conversion, Converter};
use crate::error::{ConversionCause, ConversionError};
use crate::target::TargetType;

/// Pattern used for local date-times when a field carries no format hint.
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const RFC3339: &str = "RFC 3339";

/// Parses local (offset-free) date-times with a `strftime`-style pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeConverter {
    default_format: Cow<'static, str>,
}

impl DateTimeConverter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            default_format: Cow::Borrowed(DEFAULT_DATETIME_FORMAT),
        }
    }

    #[must_use]
    pub fn with_default_format(format: impl Into<Cow<'static, str>>) -> Self {
        Self {
            default_format: format.into(),
        }
    }

    #[must_use]
    pub fn default_format(&self) -> &str {
        &self.default_format
    }
}

impl Default for DateTimeConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter<NaiveDateTime> for DateTimeConverter {
    fn convert(
        &self,
        _ctx: &dyn RequestContext,
        raw: Option<&str>,
        format: Option<&str>,
        target: &TargetType,
    ) -> Conversion<NaiveDateTime> {
        let Some(raw) = non_blank(raw) else {
            return Ok(None);
        };

        let pattern = format.unwrap_or(&self.default_format);
        NaiveDateTime::parse_from_str(raw, pattern)
            .map(Some)
            .map_err(|e| ConversionError::hard(target, raw, ConversionCause::temporal(pattern, e)))
    }
}

/// Parses instants that carry a UTC offset.
///
/// Without a format hint or configured pattern the input must be RFC 3339
/// (`2024-05-01T12:00:00+02:00`). A pattern, when given, must include an
/// offset specifier such as `%z`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimestampConverter {
    default_format: Option<Cow<'static, str>>,
}

impl TimestampConverter {
    /// A converter expecting RFC 3339 unless the field says otherwise.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            default_format: None,
        }
    }

    #[must_use]
    pub fn with_default_format(format: impl Into<Cow<'static, str>>) -> Self {
        Self {
            default_format: Some(format.into()),
        }
    }

    #[must_use]
    pub fn default_format(&self) -> Option<&str> {
        self.default_format.as_deref()
    }
}

impl Converter<DateTime<FixedOffset>> for TimestampConverter {
    fn convert(
        &self,
        _ctx: &dyn RequestContext,
        raw: Option<&str>,
        format: Option<&str>,
        target: &TargetType,
    ) -> Conversion<DateTime<FixedOffset>> {
        let Some(raw) = non_blank(raw) else {
            return Ok(None);
        };

        let parsed = match format.or(self.default_format.as_deref()) {
            Some(pattern) => DateTime::parse_from_str(raw, pattern)
                .map_err(|e| ConversionCause::temporal(pattern, e)),
            None => DateTime::parse_from_rfc3339(raw).map_err(|e| ConversionCause::temporal(RFC3339, e)),
        };

        parsed
            .map(Some)
            .map_err(|cause| ConversionError::hard(target, raw, cause))
    }
}
