use std::borrow::Cow;

use chrono::NaiveDate;

use super::non_blank;
use crate::context::RequestContext;
use crate::converter::{Conversion, Converter};
use crate::error::{ConversionCause, ConversionError};
use crate::target::TargetType;

/// Pattern used when a field carries no format hint.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses calendar dates with a `strftime`-style pattern.
///
/// The field's format hint takes precedence over the converter's default
/// pattern. A missing or blank parameter converts to `None`. Text that
/// does not match the pattern is a hard error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateConverter {
    default_format: Cow<'static, str>,
}

impl DateConverter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            default_format: Cow::Borrowed(DEFAULT_DATE_FORMAT),
        }
    }

    /// Uses `format` for fields without a format hint.
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

impl Default for DateConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter<NaiveDate> for DateConverter {
    fn convert(
        &self,
        _ctx: &dyn RequestContext,
        raw: Option<&str>,
        format: Option<&str>,
        target: &TargetType,
    ) -> Conversion<NaiveDate> {
        let Some(raw) = non_blank(raw) else {
            return Ok(None);
        };

        let pattern = format.unwrap_or(&self.default_format);
        NaiveDate::parse_from_str(raw, pattern)
            .map(Some)
            .map_err(|e| ConversionError::hard(target, raw, ConversionCause::temporal(pattern, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::EmptyContext;

    fn convert(converter: &DateConverter, raw: Option<&str>, format: Option<&str>) -> Conversion<NaiveDate> {
        converter.convert(&EmptyContext, raw, format, &TargetType::of::<NaiveDate>())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn iso_date_by_default() {
        let converter = DateConverter::new();
        assert_eq!(
            convert(&converter, Some("2024-02-29"), None).unwrap(),
            Some(date(2024, 2, 29))
        );
    }

    #[test]
    fn format_hint_overrides_default() {
        let converter = DateConverter::new();
        assert_eq!(
            convert(&converter, Some("31/12/2023"), Some("%d/%m/%Y")).unwrap(),
            Some(date(2023, 12, 31))
        );
    }

    #[test]
    fn configured_default_format() {
        let converter = DateConverter::with_default_format("%m/%d/%Y");
        assert_eq!(converter.default_format(), "%m/%d/%Y");
        assert_eq!(
            convert(&converter, Some("12/31/2023"), None).unwrap(),
            Some(date(2023, 12, 31))
        );
    }

    #[test]
    fn absent_or_blank_is_none() {
        let converter = DateConverter::new();
        assert_eq!(convert(&converter, None, None).unwrap(), None);
        assert_eq!(convert(&converter, Some(""), None).unwrap(), None);
        assert_eq!(convert(&converter, Some("   "), None).unwrap(), None);
    }

    #[test]
    fn invalid_date_is_hard_error() {
        let converter = DateConverter::new();
        for raw in ["2023-02-30", "yesterday", "2023/01/01"] {
            let err = convert(&converter, Some(raw), None).unwrap_err();
            assert!(!err.is_recoverable());
            assert_eq!(err.code(), "CONVERT_TEMPORAL");
        }
    }

    #[test]
    fn error_names_the_pattern() {
        let converter = DateConverter::new();
        let err = convert(&converter, Some("nope"), Some("%d.%m.%Y")).unwrap_err();
        assert!(err.cause().to_string().contains("`%d.%m.%Y`"));
    }
}
