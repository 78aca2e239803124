//! The converter contract.
//!
//! A [`Converter`] turns one raw request parameter into a typed field
//! value. Implementations must be pure: the same inputs always yield the
//! same result, the request context is never mutated, and a single instance
//! may be shared across threads serving different requests.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::context::RequestContext;
use crate::error::ConversionError;
use crate::target::TargetType;

/// Outcome of a single conversion.
///
/// `Ok(None)` is the absent value; a converter decides for itself whether
/// a missing parameter maps to `None` or to a concrete value.
pub type Conversion<T> = Result<Option<T>, ConversionError<T>>;

/// Converts a raw request parameter into a value of type `T`.
///
/// # Arguments
///
/// * `ctx` - The current request, read-only
/// * `raw` - The raw parameter value; `None` when the request lacks it
/// * `format` - Optional per-field hint such as a date pattern; converters
///   that have no use for it ignore it
/// * `target` - Descriptor of the field type
///
/// # Examples
///
/// ```
/// use bindery_convert::prelude::*;
///
/// let target = TargetType::of::<i32>();
/// let converter = IntegerConverter::<i32>::new();
///
/// let value = converter.convert(&EmptyContext, Some("42"), None, &target);
/// assert_eq!(value.unwrap(), Some(42));
///
/// let err = converter.convert(&EmptyContext, Some("abc"), None, &target).unwrap_err();
/// assert_eq!(err.default_value(), Some(&0));
/// ```
pub trait Converter<T>: Send + Sync {
    fn convert(
        &self,
        ctx: &dyn RequestContext,
        raw: Option<&str>,
        format: Option<&str>,
        target: &TargetType,
    ) -> Conversion<T>;
}

impl<T, C> Converter<T> for Arc<C>
where
    C: Converter<T> + ?Sized,
{
    fn convert(
        &self,
        ctx: &dyn RequestContext,
        raw: Option<&str>,
        format: Option<&str>,
        target: &TargetType,
    ) -> Conversion<T> {
        (**self).convert(ctx, raw, format, target)
    }
}

impl<T, C> Converter<T> for Box<C>
where
    C: Converter<T> + ?Sized,
{
    fn convert(
        &self,
        ctx: &dyn RequestContext,
        raw: Option<&str>,
        format: Option<&str>,
        target: &TargetType,
    ) -> Conversion<T> {
        (**self).convert(ctx, raw, format, target)
    }
}

/// A converter backed by a plain function or closure.
///
/// Created with [`converter_fn`].
pub struct FnConverter<F, T> {
    f: F,
    _marker: PhantomData<fn() -> T>,
}

/// Wraps `f` as a [`Converter`].
///
/// # Examples
///
/// ```
/// use bindery_convert::prelude::*;
///
/// // Percentages arrive as "42%".
/// let percent = converter_fn(|_ctx, raw: Option<&str>, _format, target: &TargetType| {
///     let Some(raw) = raw else { return Ok(None) };
///     raw.trim_end_matches('%')
///         .parse::<u8>()
///         .map(Some)
///         .map_err(|e| ConversionError::recoverable(target, raw, e, 0))
/// });
///
/// let target = TargetType::of::<u8>();
/// assert_eq!(percent.convert(&EmptyContext, Some("42%"), None, &target).unwrap(), Some(42));
/// ```
pub fn converter_fn<F, T>(f: F) -> FnConverter<F, T>
where
    F: Fn(&dyn RequestContext, Option<&str>, Option<&str>, &TargetType) -> Conversion<T>
        + Send
        + Sync,
{
    FnConverter {
        f,
        _marker: PhantomData,
    }
}

impl<F, T> Converter<T> for FnConverter<F, T>
where
    F: Fn(&dyn RequestContext, Option<&str>, Option<&str>, &TargetType) -> Conversion<T>
        + Send
        + Sync,
{
    fn convert(
        &self,
        ctx: &dyn RequestContext,
        raw: Option<&str>,
        format: Option<&str>,
        target: &TargetType,
    ) -> Conversion<T> {
        (self.f)(ctx, raw, format, target)
    }
}

impl<F, T> fmt::Debug for FnConverter<F, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnConverter").finish_non_exhaustive()
    }
}
