use serde::{Deserialize, Serialize};

use crate::context::RequestContext;
use crate::converter::{Conversion, Converter};
use crate::error::{ConversionCause, ConversionError};
use crate::target::TargetType;

/// Spellings accepted as `true`, compared case-insensitively.
pub const TRUE_TOKENS: [&str; 3] = ["true", "on", "yes"];

/// Spellings accepted as `false` under [`BooleanPolicy::Strict`].
pub const FALSE_TOKENS: [&str; 3] = ["false", "off", "no"];

/// How unrecognized boolean tokens are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BooleanPolicy {
    /// Anything that is not a `true` token is `false`. Never fails.
    #[default]
    Lenient,

    /// Only the `true` and `false` tokens are accepted; anything else is a
    /// recoverable error defaulting to `false`.
    Strict,
}

/// Converts checkbox-style parameters to `bool`.
///
/// Under the default [`BooleanPolicy::Lenient`] policy this converter has
/// no invalid input. A missing parameter, or any text other than one of
/// [`TRUE_TOKENS`], means `false`; the empty string included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BooleanConverter {
    policy: BooleanPolicy,
}

impl BooleanConverter {
    /// A converter with the lenient policy.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_policy(BooleanPolicy::Lenient)
    }

    /// A converter that rejects unrecognized tokens.
    #[must_use]
    pub const fn strict() -> Self {
        Self::with_policy(BooleanPolicy::Strict)
    }

    #[must_use]
    pub const fn with_policy(policy: BooleanPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub const fn policy(&self) -> BooleanPolicy {
        self.policy
    }
}

fn matches_any(raw: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|token| raw.eq_ignore_ascii_case(token))
}

impl Converter<bool> for BooleanConverter {
    fn convert(
        &self,
        _ctx: &dyn RequestContext,
        raw: Option<&str>,
        _format: Option<&str>,
        target: &TargetType,
    ) -> Conversion<bool> {
        let Some(raw) = raw else {
            return Ok(Some(false));
        };

        if matches_any(raw, &TRUE_TOKENS) {
            return Ok(Some(true));
        }

        match self.policy {
            BooleanPolicy::Lenient => Ok(Some(false)),
            BooleanPolicy::Strict if matches_any(raw, &FALSE_TOKENS) => Ok(Some(false)),
            BooleanPolicy::Strict => Err(ConversionError::recoverable(
                target,
                raw,
                ConversionCause::Boolean {
                    token: raw.to_owned(),
                },
                false,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::context::EmptyContext;

    fn convert(converter: BooleanConverter, raw: Option<&str>) -> Conversion<bool> {
        converter.convert(&EmptyContext, raw, None, &TargetType::of::<bool>())
    }

    #[rstest]
    #[case("true")]
    #[case("TRUE")]
    #[case("True")]
    #[case("on")]
    #[case("ON")]
    #[case("yes")]
    #[case("YeS")]
    fn true_tokens(#[case] raw: &str) {
        assert_eq!(convert(BooleanConverter::new(), Some(raw)).unwrap(), Some(true));
        assert_eq!(convert(BooleanConverter::strict(), Some(raw)).unwrap(), Some(true));
    }

    #[rstest]
    #[case("")]
    #[case("1")]
    #[case("false")]
    #[case("off")]
    #[case("checked")]
    #[case(" true")]
    #[case("yes please")]
    fn lenient_maps_everything_else_to_false(#[case] raw: &str) {
        assert_eq!(convert(BooleanConverter::new(), Some(raw)).unwrap(), Some(false));
    }

    #[test]
    fn absent_is_false() {
        assert_eq!(convert(BooleanConverter::new(), None).unwrap(), Some(false));
        assert_eq!(convert(BooleanConverter::strict(), None).unwrap(), Some(false));
    }

    #[rstest]
    #[case("false")]
    #[case("OFF")]
    #[case("No")]
    fn strict_accepts_false_tokens(#[case] raw: &str) {
        assert_eq!(convert(BooleanConverter::strict(), Some(raw)).unwrap(), Some(false));
    }

    #[rstest]
    #[case("")]
    #[case("1")]
    #[case("maybe")]
    fn strict_rejects_unknown_tokens_with_false_default(#[case] raw: &str) {
        let err = convert(BooleanConverter::strict(), Some(raw)).unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(err.default_value(), Some(&false));
        assert_eq!(err.code(), "CONVERT_BOOLEAN");
    }

    #[test]
    fn format_hint_is_ignored() {
        let converter = BooleanConverter::new();
        let target = TargetType::of::<bool>();
        let value = converter
            .convert(&EmptyContext, Some("on"), Some("%Y"), &target)
            .unwrap();
        assert_eq!(value, Some(true));
    }

    #[test]
    fn policy_serde() {
        let json = serde_json::to_string(&BooleanPolicy::Strict).unwrap();
        assert_eq!(json, r#""strict""#);
        let back: BooleanPolicy = serde_json::from_str(r#""lenient""#).unwrap();
        assert_eq!(back, BooleanPolicy::Lenient);
    }
}
