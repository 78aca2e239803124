//! Reference binding pipeline.
//!
//! A [`Binder`] pulls raw values out of a [`RequestContext`], runs them
//! through a [`ConverterRegistry`] and decides, per [`FallbackPolicy`],
//! whether a recoverable failure binds its default or fails the field.
//! Failures are collected rather than returned one at a time so a request
//! reports every bad field at once.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::config::FallbackPolicy;
use crate::context::RequestContext;
use crate::error::{ConversionError, RegistryError};
use crate::registry::ConverterRegistry;
use crate::target::TargetType;

/// Metadata of the field being populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Request parameter the field is bound from.
    pub name: String,

    /// Optional format hint passed to the converter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl FieldSpec {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            format: None,
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

/// One field that failed to convert, or fell back to a default.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldFailure {
    pub field: String,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    pub code: &'static str,
    pub message: String,
    /// Default bound in place of the input, for applied fallbacks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl FieldFailure {
    fn conversion<T>(field: &FieldSpec, err: &ConversionError<T>) -> Self {
        Self {
            field: field.name.clone(),
            target: err.target().to_owned(),
            input: Some(err.input().to_owned()),
            code: err.code(),
            message: err.to_string(),
            default: None,
        }
    }

    fn lookup(field: &FieldSpec, target: &str, err: &RegistryError) -> Self {
        Self {
            field: field.name.clone(),
            target: target.to_owned(),
            input: None,
            code: err.code(),
            message: err.to_string(),
            default: None,
        }
    }
}

impl fmt::Display for FieldFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outcome of a successful binding run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BindingReport {
    /// Fields that were bound to a converter-supplied default.
    pub fallbacks: Vec<FieldFailure>,
}

/// One or more fields could not be bound.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{} field(s) failed to bind: {}", .failures.len(), field_list(.failures))]
pub struct BindingErrors {
    pub failures: Vec<FieldFailure>,
    /// Fallbacks applied to other fields before the run was rejected.
    pub fallbacks: Vec<FieldFailure>,
}

impl BindingErrors {
    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &'static str {
        "BIND_FAILED"
    }
}

fn field_list(failures: &[FieldFailure]) -> String {
    failures
        .iter()
        .map(|failure| failure.field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Per-request binder.
///
/// # Examples
///
/// ```
/// use bindery_convert::prelude::*;
///
/// let registry = ConverterRegistry::default();
/// let params = ParameterMap::new().with("page", "3").with("size", "lots");
///
/// let mut binder = Binder::new(&registry, &params, FallbackPolicy::UseDefault);
/// let page: Option<u32> = binder.bind(&FieldSpec::new("page"));
/// let size: Option<u32> = binder.bind(&FieldSpec::new("size"));
///
/// assert_eq!(page, Some(3));
/// assert_eq!(size, Some(0));
///
/// let report = binder.finish().unwrap();
/// assert_eq!(report.fallbacks[0].field, "size");
/// ```
pub struct Binder<'a> {
    registry: &'a ConverterRegistry,
    ctx: &'a dyn RequestContext,
    policy: FallbackPolicy,
    fallbacks: Vec<FieldFailure>,
    failures: Vec<FieldFailure>,
}

impl<'a> Binder<'a> {
    #[must_use]
    pub fn new(
        registry: &'a ConverterRegistry,
        ctx: &'a dyn RequestContext,
        policy: FallbackPolicy,
    ) -> Self {
        Self {
            registry,
            ctx,
            policy,
            fallbacks: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// The fallback policy in effect.
    #[must_use]
    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    /// Binds `field` as `T`.
    ///
    /// Returns `None` when the parameter is absent or the field failed; the
    /// two are told apart by [`finish`](Self::finish).
    pub fn bind<T>(&mut self, field: &FieldSpec) -> Option<T>
    where
        T: Serialize + 'static,
    {
        let raw = self.ctx.parameter(&field.name);
        match self
            .registry
            .convert::<T>(self.ctx, raw, field.format.as_deref())
        {
            Ok(Ok(value)) => value,
            Ok(Err(err)) => self.recover(field, err, |default| serde_json::to_value(default).ok()),
            Err(err) => {
                self.lookup_failed(field, TargetType::of::<T>().short_name(), &err);
                None
            }
        }
    }

    /// Binds `field` through the converter registered as `type_name`.
    pub fn bind_named(&mut self, field: &FieldSpec, type_name: &str) -> Option<Value> {
        let raw = self.ctx.parameter(&field.name);
        match self
            .registry
            .convert_named(type_name, self.ctx, raw, field.format.as_deref())
        {
            Ok(Ok(value)) => value,
            Ok(Err(err)) => self.recover(field, err, |default| Some(default.clone())),
            Err(err) => {
                self.lookup_failed(field, type_name, &err);
                None
            }
        }
    }

    fn recover<T>(
        &mut self,
        field: &FieldSpec,
        err: ConversionError<T>,
        to_json: impl FnOnce(&T) -> Option<Value>,
    ) -> Option<T> {
        let mut failure = FieldFailure::conversion(field, &err);

        match (self.policy, err.into_default()) {
            (FallbackPolicy::UseDefault, Some(default)) => {
                tracing::warn!(
                    field = %failure.field,
                    target_type = %failure.target,
                    code = failure.code,
                    "conversion failed, binding default"
                );
                failure.default = to_json(&default);
                self.fallbacks.push(failure);
                Some(default)
            }
            _ => {
                tracing::debug!(
                    field = %failure.field,
                    target_type = %failure.target,
                    code = failure.code,
                    "field failed to bind"
                );
                self.failures.push(failure);
                None
            }
        }
    }

    fn lookup_failed(&mut self, field: &FieldSpec, target: &str, err: &RegistryError) {
        tracing::debug!(field = %field.name, target_type = target, code = err.code(), "no converter for field");
        self.failures.push(FieldFailure::lookup(field, target, err));
    }

    /// Whether any field has failed so far.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Ends the run.
    ///
    /// # Errors
    ///
    /// Returns [`BindingErrors`] if at least one field failed.
    pub fn finish(self) -> Result<BindingReport, BindingErrors> {
        if self.failures.is_empty() {
            Ok(BindingReport {
                fallbacks: self.fallbacks,
            })
        } else {
            Err(BindingErrors {
                failures: self.failures,
                fallbacks: self.fallbacks,
            })
        }
    }
}

impl fmt::Debug for Binder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binder")
            .field("policy", &self.policy)
            .field("fallbacks", &self.fallbacks)
            .field("failures", &self.failures)
            .finish_non_exhaustive()
    }
}
