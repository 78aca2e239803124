use anyhow::bail;
use bindery_convert::{
    Binder, BindingConfig, ConverterRegistry, EmptyContext, FieldSpec, ParameterMap,
};
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::cli::{BindArgs, ConvertArgs};

/// JSON document to print, and whether the command succeeded.
#[derive(Debug)]
pub struct Report {
    pub output: Value,
    pub success: bool,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum ConvertOutcome {
    Ok {
        value: Option<Value>,
    },
    Error {
        recoverable: bool,
        default: Option<Value>,
        code: &'static str,
        message: String,
    },
}

pub fn convert(registry: &ConverterRegistry, args: &ConvertArgs) -> anyhow::Result<Report> {
    let result = registry.convert_named(
        &args.type_name,
        &EmptyContext,
        args.value.as_deref(),
        args.format.as_deref(),
    )?;

    let (outcome, success) = match result {
        Ok(value) => (ConvertOutcome::Ok { value }, true),
        Err(err) => {
            let code = err.code();
            let message = err.to_string();
            let recoverable = err.is_recoverable();
            let outcome = ConvertOutcome::Error {
                recoverable,
                default: err.into_default(),
                code,
                message,
            };
            (outcome, false)
        }
    };

    Ok(Report {
        output: serde_json::to_value(outcome)?,
        success,
    })
}

pub fn bind(
    registry: &ConverterRegistry,
    config: &BindingConfig,
    args: &BindArgs,
) -> anyhow::Result<Report> {
    let params = args
        .params
        .iter()
        .map(|param| parse_param(param))
        .collect::<anyhow::Result<ParameterMap>>()?;
    let fields = args
        .fields
        .iter()
        .map(|field| parse_field(field))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let policy = args.fallback.map_or(config.fallback, Into::into);
    let mut binder = Binder::new(registry, &params, policy);

    let mut values = Map::new();
    for (spec, type_name) in &fields {
        let value = binder.bind_named(spec, type_name).unwrap_or(Value::Null);
        values.insert(spec.name.clone(), value);
    }

    let report = match binder.finish() {
        Ok(report) => Report {
            output: json!({
                "status": "ok",
                "values": values,
                "fallbacks": report.fallbacks,
            }),
            success: true,
        },
        Err(errors) => {
            tracing::info!(failed = errors.failures.len(), "binding rejected");
            Report {
                output: json!({
                    "status": "error",
                    "message": errors.to_string(),
                    "values": values,
                    "failures": errors.failures,
                    "fallbacks": errors.fallbacks,
                }),
                success: false,
            }
        }
    };
    Ok(report)
}

/// One line per canonical name, then one `alias -> name` line per alias.
pub fn types(registry: &ConverterRegistry) -> String {
    let names = registry.names().into_iter().map(str::to_owned);
    let aliases = registry
        .aliases()
        .into_iter()
        .map(|(alias, name)| format!("{alias} -> {name}"));

    let mut listing = names.chain(aliases).collect::<Vec<_>>().join("\n");
    listing.push('\n');
    listing
}

fn parse_param(raw: &str) -> anyhow::Result<(String, String)> {
    let Some((name, value)) = raw.split_once('=') else {
        bail!("parameter `{raw}` must look like NAME=VALUE");
    };
    if name.is_empty() {
        bail!("parameter `{raw}` has an empty name");
    }
    Ok((name.to_owned(), value.to_owned()))
}

/// Parses `name:type[:format]`; the format keeps any further colons.
fn parse_field(raw: &str) -> anyhow::Result<(FieldSpec, String)> {
    let mut parts = raw.splitn(3, ':');
    let name = parts.next().filter(|s| !s.is_empty());
    let type_name = parts.next().filter(|s| !s.is_empty());

    let (Some(name), Some(type_name)) = (name, type_name) else {
        bail!("field `{raw}` must look like NAME:TYPE[:FORMAT]");
    };

    let mut spec = FieldSpec::new(name);
    if let Some(format) = parts.next() {
        spec = spec.with_format(format);
    }
    Ok((spec, type_name.to_owned()))
}
