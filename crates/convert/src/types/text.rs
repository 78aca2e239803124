use crate::context::RequestContext;
use crate::converter::{Conversion, Converter};
use crate::target::TargetType;

/// Passes the raw value through as an owned `String`.
///
/// A missing parameter converts to `None`; an empty string stays empty.
/// Never fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringConverter;

impl StringConverter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Converter<String> for StringConverter {
    fn convert(
        &self,
        _ctx: &dyn RequestContext,
        raw: Option<&str>,
        _format: Option<&str>,
        _target: &TargetType,
    ) -> Conversion<String> {
        Ok(raw.map(str::to_owned))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::EmptyContext;

    fn convert(raw: Option<&str>) -> Conversion<String> {
        StringConverter.convert(&EmptyContext, raw, None, &TargetType::of::<String>())
    }

    #[test]
    fn passes_value_through() {
        assert_eq!(convert(Some(" hello ")).unwrap().as_deref(), Some(" hello "));
        assert_eq!(convert(Some("")).unwrap().as_deref(), Some(""));
    }

    #[test]
    fn absent_is_none() {
        assert_eq!(convert(None).unwrap(), None);
    }
}
