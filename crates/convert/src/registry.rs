//! Converter registry: target type to converter, populated at startup.
//!
//! Converters are stored type-erased behind [`ErasedConverter`] and keyed
//! by [`TypeId`]. Typed lookups downcast back to the concrete entry; named
//! lookups go through the erased JSON path so that callers driven by
//! metadata (a type name in a form schema, a CLI flag) can bind without
//! knowing the Rust type.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use serde_json::Value;
use url::Url;
use uuid::Uuid;

use crate::config::BindingConfig;
use crate::context::RequestContext;
use crate::converter::{Conversion, Converter};
use crate::error::{ConversionError, RegistryError};
use crate::target::TargetType;
use crate::types::{
    BooleanConverter, DateConverter, DateTimeConverter, EnumConverter, FloatConverter,
    IntegerConverter, NamedEnum, StringConverter, TimeConverter, TimestampConverter,
    UrlConverter, UuidConverter,
};

// ---------------------------------------------------------------------------
// Type erasure
// ---------------------------------------------------------------------------

/// Object-safe view of a registered converter.
trait ErasedConverter: Send + Sync {
    fn target(&self) -> &TargetType;

    fn convert_json(
        &self,
        ctx: &dyn RequestContext,
        raw: Option<&str>,
        format: Option<&str>,
    ) -> Conversion<Value>;

    fn as_any(&self) -> &dyn Any;
}

/// Concrete adapter from `Converter<T>` to `ErasedConverter`.
struct TypedEntry<T> {
    converter: Arc<dyn Converter<T>>,
    target: TargetType,
}

impl<T> ErasedConverter for TypedEntry<T>
where
    T: Serialize + 'static,
{
    fn target(&self) -> &TargetType {
        &self.target
    }

    fn convert_json(
        &self,
        ctx: &dyn RequestContext,
        raw: Option<&str>,
        format: Option<&str>,
    ) -> Conversion<Value> {
        match self.converter.convert(ctx, raw, format, &self.target) {
            Ok(None) => Ok(None),
            Ok(Some(value)) => serde_json::to_value(value).map(Some).map_err(|e| {
                ConversionError::hard(&self.target, raw.unwrap_or_default(), e)
            }),
            Err(err) => Err(err.filter_map_default(|default| serde_json::to_value(default).ok())),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ---------------------------------------------------------------------------
// ConverterRegistry
// ---------------------------------------------------------------------------

/// Registry of converters keyed by target type, with names and aliases.
///
/// Build it once at startup and share it (by reference or `Arc`) across
/// requests; lookups and conversions take `&self`.
///
/// # Examples
///
/// ```
/// use bindery_convert::prelude::*;
///
/// let registry = ConverterRegistry::default();
///
/// let port = registry.convert::<u16>(&EmptyContext, Some("8080"), None).unwrap();
/// assert_eq!(port.unwrap(), Some(8080));
///
/// let flag = registry.convert_named("boolean", &EmptyContext, Some("on"), None).unwrap();
/// assert_eq!(flag.unwrap(), Some(serde_json::json!(true)));
/// ```
pub struct ConverterRegistry {
    entries: HashMap<TypeId, Arc<dyn ErasedConverter>>,
    /// canonical name -> type
    names: HashMap<String, TypeId>,
    /// alias -> canonical name
    aliases: HashMap<String, String>,
}

impl ConverterRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            names: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// A registry holding every built-in scalar converter, configured by
    /// `config`.
    #[must_use]
    pub fn with_defaults(config: &BindingConfig) -> Self {
        let mut registry = Self::new();

        registry.insert::<bool, _>("bool", BooleanConverter::with_policy(config.boolean));

        registry.insert::<i8, _>("i8", IntegerConverter::<i8>::new());
        registry.insert::<i16, _>("i16", IntegerConverter::<i16>::new());
        registry.insert::<i32, _>("i32", IntegerConverter::<i32>::new());
        registry.insert::<i64, _>("i64", IntegerConverter::<i64>::new());
        registry.insert::<i128, _>("i128", IntegerConverter::<i128>::new());
        registry.insert::<isize, _>("isize", IntegerConverter::<isize>::new());
        registry.insert::<u8, _>("u8", IntegerConverter::<u8>::new());
        registry.insert::<u16, _>("u16", IntegerConverter::<u16>::new());
        registry.insert::<u32, _>("u32", IntegerConverter::<u32>::new());
        registry.insert::<u64, _>("u64", IntegerConverter::<u64>::new());
        registry.insert::<u128, _>("u128", IntegerConverter::<u128>::new());
        registry.insert::<usize, _>("usize", IntegerConverter::<usize>::new());

        registry.insert::<f32, _>("f32", FloatConverter::<f32>::new());
        registry.insert::<f64, _>("f64", FloatConverter::<f64>::new());

        registry.insert::<String, _>("string", StringConverter);

        let formats = &config.formats;
        registry.insert::<NaiveDate, _>(
            "date",
            formats
                .date
                .clone()
                .map_or_else(DateConverter::new, DateConverter::with_default_format),
        );
        registry.insert::<NaiveTime, _>(
            "time",
            formats
                .time
                .clone()
                .map_or_else(TimeConverter::new, TimeConverter::with_default_format),
        );
        registry.insert::<NaiveDateTime, _>(
            "datetime",
            formats
                .datetime
                .clone()
                .map_or_else(DateTimeConverter::new, DateTimeConverter::with_default_format),
        );
        registry.insert::<DateTime<FixedOffset>, _>(
            "timestamp",
            formats
                .timestamp
                .clone()
                .map_or_else(TimestampConverter::new, TimestampConverter::with_default_format),
        );

        registry.insert::<Uuid, _>("uuid", UuidConverter);
        registry.insert::<Url, _>("url", UrlConverter);

        for (alias, name) in [
            ("boolean", "bool"),
            ("int", "i32"),
            ("integer", "i32"),
            ("long", "i64"),
            ("short", "i16"),
            ("byte", "i8"),
            ("float", "f32"),
            ("double", "f64"),
            ("str", "string"),
        ] {
            registry.aliases.insert(alias.to_owned(), name.to_owned());
        }

        registry
    }

    /// Registers `converter` for `T` under the canonical `name`.
    ///
    /// A converter already registered for `T` is replaced, together with
    /// its canonical name. Aliases of the old name move to `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if `name` (or an alias of
    /// that spelling) already refers to a different type.
    pub fn register<T, C>(&mut self, name: impl Into<String>, converter: C) -> Result<(), RegistryError>
    where
        T: Serialize + 'static,
        C: Converter<T> + 'static,
    {
        let name = name.into();
        let type_id = TypeId::of::<T>();

        if let Some(existing) = self.resolve(&name) {
            if existing.id() != type_id {
                return Err(RegistryError::DuplicateName {
                    name,
                    existing: existing.name(),
                });
            }
        }

        self.insert::<T, C>(name, converter);
        Ok(())
    }

    /// Registers the enumeration `E` under `name`.
    ///
    /// # Errors
    ///
    /// Same as [`register`](Self::register).
    pub fn register_enum<E>(&mut self, name: impl Into<String>) -> Result<(), RegistryError>
    where
        E: NamedEnum + Serialize,
    {
        self.register::<E, _>(name, EnumConverter::<E>::new())
    }

    /// Adds `alias` as another name for the converter registered as `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownType`] if `name` is not registered,
    /// and [`RegistryError::DuplicateName`] if `alias` is already a
    /// canonical name.
    pub fn alias(&mut self, alias: impl Into<String>, name: &str) -> Result<(), RegistryError> {
        let alias = alias.into();
        let canonical = self.canonical_name(name).ok_or_else(|| RegistryError::UnknownType {
            name: name.to_owned(),
        })?;

        if let Some(&existing) = self.names.get(&alias) {
            if let Some(entry) = self.entries.get(&existing) {
                return Err(RegistryError::DuplicateName {
                    name: alias,
                    existing: entry.target().name(),
                });
            }
        }

        let canonical = canonical.to_owned();
        self.aliases.insert(alias, canonical);
        Ok(())
    }

    fn insert<T, C>(&mut self, name: impl Into<String>, converter: C)
    where
        T: Serialize + 'static,
        C: Converter<T> + 'static,
    {
        let name = name.into();
        let target = TargetType::of::<T>();

        // Replace the previous canonical name of this type; its aliases follow.
        let previous: Vec<String> = self
            .names
            .iter()
            .filter(|(_, id)| **id == target.id())
            .map(|(old, _)| old.clone())
            .collect();
        self.names.retain(|_, id| *id != target.id());
        self.aliases.remove(&name);
        for canonical in self.aliases.values_mut() {
            if previous.contains(canonical) {
                canonical.clone_from(&name);
            }
        }

        let entry: Arc<dyn ErasedConverter> = Arc::new(TypedEntry {
            converter: Arc::new(converter),
            target,
        });
        self.entries.insert(target.id(), entry);
        self.names.insert(name.clone(), target.id());

        tracing::trace!(name = %name, target_type = target.name(), "registered converter");
    }

    fn canonical_name<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        if self.names.contains_key(name) {
            return Some(name);
        }
        self.aliases
            .get(name)
            .map(String::as_str)
            .filter(|canonical| self.names.contains_key(*canonical))
    }

    /// Target type registered under `name` or one of its aliases.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<TargetType> {
        let canonical = self.canonical_name(name)?;
        let id = self.names.get(canonical)?;
        self.entries.get(id).map(|entry| *entry.target())
    }

    /// Whether a converter is registered for `T`.
    #[must_use]
    pub fn contains<T: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// The converter registered for `T`.
    #[must_use]
    pub fn get<T: 'static>(&self) -> Option<&dyn Converter<T>> {
        let entry = self.entries.get(&TypeId::of::<T>())?;
        let typed = entry.as_any().downcast_ref::<TypedEntry<T>>()?;
        Some(typed.converter.as_ref())
    }

    /// Converts `raw` with the converter registered for `T`.
    ///
    /// The outer `Result` reports lookup failures, the inner one the
    /// conversion outcome.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotRegistered`] if no converter exists for `T`.
    pub fn convert<T: 'static>(
        &self,
        ctx: &dyn RequestContext,
        raw: Option<&str>,
        format: Option<&str>,
    ) -> Result<Conversion<T>, RegistryError> {
        let converter = self.get::<T>().ok_or_else(|| RegistryError::NotRegistered {
            type_name: std::any::type_name::<T>(),
        })?;
        Ok(converter.convert(ctx, raw, format, &TargetType::of::<T>()))
    }

    /// Converts `raw` with the converter registered under `name`, producing
    /// JSON.
    ///
    /// Fallback values of recoverable errors are carried through as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownType`] if `name` is neither a
    /// registered name nor an alias.
    pub fn convert_named(
        &self,
        name: &str,
        ctx: &dyn RequestContext,
        raw: Option<&str>,
        format: Option<&str>,
    ) -> Result<Conversion<Value>, RegistryError> {
        let entry = self
            .canonical_name(name)
            .and_then(|canonical| self.names.get(canonical))
            .and_then(|id| self.entries.get(id))
            .ok_or_else(|| RegistryError::UnknownType {
                name: name.to_owned(),
            })?;
        Ok(entry.convert_json(ctx, raw, format))
    }

    /// Canonical names of all registered converters, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Aliases and the canonical names they point at, sorted by alias.
    #[must_use]
    pub fn aliases(&self) -> Vec<(&str, &str)> {
        let mut aliases: Vec<(&str, &str)> = self
            .aliases
            .iter()
            .map(|(alias, name)| (alias.as_str(), name.as_str()))
            .collect();
        aliases.sort_unstable();
        aliases
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults(&BindingConfig::default())
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("names", &self.names())
            .finish_non_exhaustive()
    }
}
