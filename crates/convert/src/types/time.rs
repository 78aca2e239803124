use std::borrow::Cow;

use chrono::NaiveTime;

use super::non_blank;
use crate::context::RequestContext;
use crate::converter::{Conversion, Converter};
use crate::error::{ConversionCause, ConversionError};
use crate::target::TargetType;

/// Pattern used when a field carries no format hint.
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";

/// Parses wall-clock times with a `strftime`-style pattern.
///
/// Same rules as [`DateConverter`](super::DateConverter): hint over
/// default, blank means absent, mismatches are hard errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeConverter {
    default_format: Cow<'static, str>,
}

impl TimeConverter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            default_format: Cow::Borrowed(DEFAULT_TIME_FORMAT),
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

impl Default for TimeConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter<NaiveTime> for TimeConverter {
    fn convert(
        &self,
        _ctx: &dyn RequestContext,
        raw: Option<&str>,
        format: Option<&str>,
        target: &TargetType,
    ) -> Conversion<NaiveTime> {
        let Some(raw) = non_blank(raw) else {
            return Ok(None);
        };

        let pattern = format.unwrap_or(&self.default_format);
        NaiveTime::parse_from_str(raw, pattern)
            .map(Some)
            .map_err(|e| ConversionError::hard(target, raw, ConversionCause::temporal(pattern, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::EmptyContext;

    fn convert(raw: Option<&str>, format: Option<&str>) -> Conversion<NaiveTime> {
        TimeConverter::new().convert(&EmptyContext, raw, format, &TargetType::of::<NaiveTime>())
    }

    #[test]
    fn parses_default_pattern() {
        assert_eq!(
            convert(Some("14:30:05"), None).unwrap(),
            NaiveTime::from_hms_opt(14, 30, 5)
        );
    }

    #[test]
    fn parses_with_hint() {
        assert_eq!(
            convert(Some("2:30 PM"), Some("%I:%M %p")).unwrap(),
            NaiveTime::from_hms_opt(14, 30, 0)
        );
    }

    #[test]
    fn blank_is_none() {
        assert_eq!(convert(Some(" "), None).unwrap(), None);
        assert_eq!(convert(None, None).unwrap(), None);
    }

    #[test]
    fn out_of_range_is_hard_error() {
        let err = convert(Some("25:00:00"), None).unwrap_err();
        assert!(!err.is_recoverable());
    }
}
