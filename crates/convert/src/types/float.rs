use std::fmt;
use std::marker::PhantomData;
use std::num::ParseFloatError;
use std::str::FromStr;

use crate::context::RequestContext;
use crate::converter::{Conversion, Converter};
use crate::error::ConversionError;
use crate::target::TargetType;

mod sealed {
    pub trait Sealed {}
}

/// Primitive floating point types the [`FloatConverter`] can produce.
pub trait Float:
    sealed::Sealed
    + FromStr<Err = ParseFloatError>
    + Copy
    + Default
    + fmt::Debug
    + Send
    + Sync
    + 'static
{
}

impl sealed::Sealed for f32 {}
impl Float for f32 {}
impl sealed::Sealed for f64 {}
impl Float for f64 {}

/// Parses decimal and scientific floating point literals.
///
/// Accepts what [`str::parse`] accepts, including `inf` and `NaN`.
/// A missing parameter converts to `None`; malformed input is a
/// recoverable error whose default is `0.0`.
pub struct FloatConverter<T = f64> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: Float> FloatConverter<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T: Float> Default for FloatConverter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for FloatConverter<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FloatConverter<T> {}

impl<T> fmt::Debug for FloatConverter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FloatConverter")
            .field("target", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: Float> Converter<T> for FloatConverter<T> {
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
