//! Built-in converters, one module per target type.

mod boolean;
mod date;
mod datetime;
mod enumeration;
mod float;
mod integer;
mod text;
mod time;
mod url;
mod uuid;

pub use boolean::{BooleanConverter, BooleanPolicy, FALSE_TOKENS, TRUE_TOKENS};
pub use date::{DEFAULT_DATE_FORMAT, DateConverter};
pub use datetime::{DEFAULT_DATETIME_FORMAT, DateTimeConverter, TimestampConverter};
pub use enumeration::{EnumConverter, NamedEnum};
pub use float::{Float, FloatConverter};
pub use integer::{Integer, IntegerConverter};
pub use text::StringConverter;
pub use time::{DEFAULT_TIME_FORMAT, TimeConverter};
pub use self::url::UrlConverter;
pub use self::uuid::UuidConverter;

/// Treats blank input as absent, for types whose textual form can never be
/// empty.
pub(crate) fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.filter(|raw| !raw.trim().is_empty())
}
