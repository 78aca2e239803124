//! Typed conversion of raw request parameters.
//!
//! A [`Converter<T>`](Converter) turns the raw string of one request
//! parameter into a `T`. Absence is not a failure: a missing parameter
//! converts to `Ok(None)`, or to a type-level default where the type has a
//! natural one (`bool` → `false`). A failed conversion is a
//! [`ConversionError<T>`](ConversionError) that may carry a fallback value
//! the binding pipeline can use instead.
//!
//! ```
//! use bindery_convert::prelude::*;
//!
//! let target = TargetType::of::<i32>();
//! let ints = IntegerConverter::<i32>::new();
//!
//! assert_eq!(ints.convert(&EmptyContext, Some("-7"), None, &target).unwrap(), Some(-7));
//!
//! let err = ints.convert(&EmptyContext, Some("12.5"), None, &target).unwrap_err();
//! assert!(err.is_recoverable());
//! assert_eq!(err.default_value(), Some(&0));
//! ```

pub mod binder;
pub mod config;
pub mod context;
pub mod converter;
pub mod error;
pub mod registry;
pub mod target;
pub mod types;

pub use binder::{Binder, BindingErrors, BindingReport, FieldFailure, FieldSpec};
pub use config::{BindingConfig, ConfigError, FallbackPolicy, FormatConfig};
pub use context::{EmptyContext, ParameterMap, RequestContext};
pub use converter::{Conversion, Converter, FnConverter, converter_fn};
pub use error::{ConversionCause, ConversionError, RegistryError};
pub use registry::ConverterRegistry;
pub use target::TargetType;
pub use types::{BooleanPolicy, NamedEnum};

pub mod prelude {
    pub use crate::binder::{Binder, BindingErrors, BindingReport, FieldFailure, FieldSpec};
    pub use crate::config::{BindingConfig, ConfigError, FallbackPolicy};
    pub use crate::context::{EmptyContext, ParameterMap, RequestContext};
    pub use crate::converter::{Conversion, Converter, converter_fn};
    pub use crate::error::{ConversionCause, ConversionError, RegistryError};
    pub use crate::named_enum;
    pub use crate::registry::ConverterRegistry;
    pub use crate::target::TargetType;

    pub use crate::types::*;
}

#[doc(hidden)]
pub mod __private {
    pub use serde;
}
