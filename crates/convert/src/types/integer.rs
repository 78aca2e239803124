use std::fmt;
use std::marker::PhantomData;
use std::num::ParseIntError;
use std::str::FromStr;

use crate::context::RequestContext;
use crate::converter::{Conversion, Converter};
use crate::error::ConversionError;
use crate::target::TargetType;

mod sealed {
    pub trait Sealed {}
}

/// Primitive integer types the [`IntegerConverter`] can produce.
pub trait Integer:
    sealed::Sealed
    + FromStr<Err = ParseIntError>
    + Copy
    + Default
    + fmt::Debug
    + Send
    + Sync
    + 'static
{
}

macro_rules! impl_integer {
    ($($t:ty),+ $(,)?) => {
        $(
            impl sealed::Sealed for $t {}
            impl Integer for $t {}
        )+
    };
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Parses base-10 integers.
///
/// The grammar is that of [`str::parse`]: an optional `+` or `-` followed
/// by ASCII digits, with no whitespace or digit separators. Out-of-range
/// values fail like any other malformed input.
///
/// A missing parameter converts to `None`. Malformed input is a
/// recoverable error whose default is zero.
pub struct IntegerConverter<T = i32> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: Integer> IntegerConverter<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T: Integer> Default for IntegerConverter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for IntegerConverter<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for IntegerConverter<T> {}

impl<T> fmt::Debug for IntegerConverter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntegerConverter")
            .field("target", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: Integer> Converter<T> for IntegerConverter<T> {
    fn convert(
        &self,
        _ctx: &dyn RequestContext,
        raw: Option<&str>,
        _format: Option<&str>,
        target: &TargetType,
    ) -> Conversion<T> {
        let Some(raw) = raw else {
            return Ok(None);
        };

        raw.parse::<T>()
            .map(Some)
            .map_err(|e| ConversionError::recoverable(target, raw, e, T::default()))
    }
}

#[cfg(test)]
mod tests {
    use std::num::IntErrorKind;

    use rstest::rstest;

    use super::*;
    use crate::context::EmptyContext;
    use crate::error::ConversionCause;

    fn convert<T: Integer>(raw: Option<&str>) -> Conversion<T> {
        IntegerConverter::<T>::new().convert(&EmptyContext, raw, None, &TargetType::of::<T>())
    }

    #[rstest]
    #[case("42", 42)]
    #[case("-7", -7)]
    #[case("+15", 15)]
    #[case("0", 0)]
    #[case("007", 7)]
    #[case("2147483647", i32::MAX)]
    #[case("-2147483648", i32::MIN)]
    fn parses_valid_literals(#[case] raw: &str, #[case] expected: i32) {
        assert_eq!(convert::<i32>(Some(raw)).unwrap(), Some(expected));
    }

    #[test]
    fn absent_is_none() {
        assert_eq!(convert::<i32>(None).unwrap(), None);
        assert_eq!(convert::<u64>(None).unwrap(), None);
    }

    #[rstest]
    #[case("abc")]
    #[case("12.5")]
    #[case("")]
    #[case(" 42")]
    #[case("42 ")]
    #[case("1_000")]
    #[case("1,000")]
    #[case("0x10")]
    #[case("-")]
    fn malformed_input_defaults_to_zero(#[case] raw: &str) {
        let err = convert::<i32>(Some(raw)).unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(err.default_value(), Some(&0));
        assert_eq!(err.input(), raw);
        assert!(matches!(err.cause(), ConversionCause::Integer(_)));
    }

    #[test]
    fn overflow_is_recoverable() {
        let err = convert::<i8>(Some("128")).unwrap_err();
        assert_eq!(err.default_value(), Some(&0));
        match err.cause() {
            ConversionCause::Integer(e) => assert_eq!(e.kind(), &IntErrorKind::PosOverflow),
            other => panic!("unexpected cause: {other:?}"),
        }
    }

    #[test]
    fn unsigned_rejects_negative() {
        let err = convert::<u32>(Some("-1")).unwrap_err();
        assert_eq!(err.default_value(), Some(&0));
        assert_eq!(err.target(), "u32");
    }

    #[test]
    fn wide_types() {
        assert_eq!(
            convert::<i128>(Some("-170141183460469231731687303715884105728")).unwrap(),
            Some(i128::MIN)
        );
        assert_eq!(convert::<usize>(Some("12")).unwrap(), Some(12));
    }

    #[test]
    fn repeated_calls_agree() {
        let converter = IntegerConverter::<i64>::new();
        let target = TargetType::of::<i64>();
        let first = converter.convert(&EmptyContext, Some("99"), None, &target).unwrap();
        let second = converter.convert(&EmptyContext, Some("99"), None, &target).unwrap();
        assert_eq!(first, second);
    }
}
