use url::Url;

use super::non_blank;
use crate::context::RequestContext;
use crate::converter::{Conversion, Converter};
use crate::error::ConversionError;
use crate::target::TargetType;

/// Parses absolute URLs.
///
/// Blank input is absent; relative references and malformed URLs are hard
/// errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UrlConverter;

impl UrlConverter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Converter<Url> for UrlConverter {
    fn convert(
        &self,
        _ctx: &dyn RequestContext,
        raw: Option<&str>,
        _format: Option<&str>,
        target: &TargetType,
    ) -> Conversion<Url> {
        let Some(raw) = non_blank(raw) else {
            return Ok(None);
        };

        Url::parse(raw)
            .map(Some)
            .map_err(|e| ConversionError::hard(target, raw, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::EmptyContext;

    fn convert(raw: Option<&str>) -> Conversion<Url> {
        UrlConverter.convert(&EmptyContext, raw, None, &TargetType::of::<Url>())
    }

    #[test]
    fn parses_absolute_url() {
        let url = convert(Some("https://example.com/a?b=c")).unwrap().unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(url.query(), Some("b=c"));
    }

    #[test]
    fn relative_reference_is_hard_error() {
        let err = convert(Some("/just/a/path")).unwrap_err();
        assert!(!err.is_recoverable());
        assert_eq!(err.code(), "CONVERT_URL");
    }

    #[test]
    fn blank_is_none() {
        assert_eq!(convert(Some("  ")).unwrap(), None);
    }
}
