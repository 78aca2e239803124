use std::fmt;
use std::marker::PhantomData;

use crate::context::RequestContext;
use crate::converter::{Conversion, Converter};
use crate::error::{ConversionCause, ConversionError};
use crate::target::TargetType;

/// An enumeration whose members are identified by symbolic names.
///
/// Usually implemented through [`named_enum!`](crate::named_enum).
pub trait NamedEnum: Sized + Copy + Send + Sync + 'static {
    /// Every member, in declaration order.
    fn variants() -> &'static [Self];

    /// Symbolic name of this member.
    fn name(self) -> &'static str;

    /// The member whose name equals `name` exactly (case-sensitive).
    fn from_name(name: &str) -> Option<Self> {
        Self::variants()
            .iter()
            .copied()
            .find(|variant| variant.name() == name)
    }
}

/// Resolves enumeration members by symbolic name.
///
/// A missing parameter converts to `None`. A name that matches no member
/// is a hard error and carries no default.
pub struct EnumConverter<E> {
    _marker: PhantomData<fn() -> E>,
}

impl<E: NamedEnum> EnumConverter<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<E: NamedEnum> Default for EnumConverter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for EnumConverter<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for EnumConverter<E> {}

impl<E> fmt::Debug for EnumConverter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumConverter")
            .field("target", &std::any::type_name::<E>())
            .finish()
    }
}

impl<E: NamedEnum> Converter<E> for EnumConverter<E> {
    fn convert(
        &self,
        _ctx: &dyn RequestContext,
        raw: Option<&str>,
        _format: Option<&str>,
        target: &TargetType,
    ) -> Conversion<E> {
        let Some(raw) = raw else {
            return Ok(None);
        };

        E::from_name(raw).map(Some).ok_or_else(|| {
            ConversionError::hard(target, raw, ConversionCause::unknown_variant::<E>(raw))
        })
    }
}

/// Declares an enumeration and implements [`NamedEnum`] for it.
///
/// Each member's symbolic name is its identifier unless a `=> "NAME"`
/// override is given. The generated type derives `Debug`, `Clone`, `Copy`,
/// `PartialEq`, `Eq` and `Hash`, and implements `Display`, `FromStr` and
/// `serde::Serialize` in terms of the symbolic name.
///
/// # Examples
///
/// ```
/// use bindery_convert::{NamedEnum, named_enum};
///
/// named_enum! {
///     pub enum Color {
///         Red => "RED",
///         Green => "GREEN",
///     }
/// }
///
/// assert_eq!(Color::from_name("RED"), Some(Color::Red));
/// assert_eq!(Color::Green.to_string(), "GREEN");
/// assert!("red".parse::<Color>().is_err());
/// ```
#[macro_export]
macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident $(=> $label:literal)?
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $crate::NamedEnum for $name {
            fn variants() -> &'static [Self] {
                &[$(Self::$variant),+]
            }

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $crate::__variant_label!($variant $(, $label)?),)+
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str($crate::NamedEnum::name(*self))
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::ConversionCause;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                <Self as $crate::NamedEnum>::from_name(s)
                    .ok_or_else(|| $crate::ConversionCause::unknown_variant::<Self>(s))
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                serializer.serialize_str($crate::NamedEnum::name(*self))
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __variant_label {
    ($variant:ident) => {
        ::core::stringify!($variant)
    };
    ($variant:ident, $label:literal) => {
        $label
    };
}
