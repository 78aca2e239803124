use uuid::Uuid;

use super::non_blank;
use crate::context::RequestContext;
use crate::converter::{Conversion, Converter};
use crate::error::ConversionError;
use crate::target::TargetType;

/// Parses UUIDs in hyphenated, simple, braced or URN form.
///
/// Blank input is absent; anything else that is not a UUID is a hard error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UuidConverter;

impl UuidConverter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Converter<Uuid> for UuidConverter {
    fn convert(
        &self,
        _ctx: &dyn RequestContext,
        raw: Option<&str>,
        _format: Option<&str>,
        target: &TargetType,
    ) -> Conversion<Uuid> {
        let Some(raw) = non_blank(raw) else {
            return Ok(None);
        };

        Uuid::parse_str(raw)
            .map(Some)
            .map_err(|e| ConversionError::hard(target, raw, e))
    }
}
