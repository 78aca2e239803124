//! Layered binding config: defaults, then the TOML file, then the
//! `BINDERY_FALLBACK` and `BINDERY_BOOLEAN` overrides applied by
//! [`BindingConfig::with_env_overrides`].

use std::path::Path;

use anyhow::{Context, bail};
use bindery_convert::BindingConfig;
use figment::Figment;
use figment::providers::{Format, Serialized, Toml};

pub fn figment(config_file: Option<&Path>) -> anyhow::Result<Figment> {
    let mut figment = Figment::from(Serialized::defaults(BindingConfig::default()));

    if let Some(path) = config_file {
        if !path.is_file() {
            bail!("config file {} does not exist", path.display());
        }
        figment = figment.merge(Toml::file(path));
    }

    Ok(figment)
}

pub fn load(config_file: Option<&Path>) -> anyhow::Result<BindingConfig> {
    let config: BindingConfig = figment(config_file)?
        .extract::<BindingConfig>()
        .context("invalid binding config")?
        .with_env_overrides();

    tracing::debug!(
        fallback = ?config.fallback,
        boolean = ?config.boolean,
        file = ?config_file,
        "loaded binding config"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use bindery_convert::{BooleanPolicy, FallbackPolicy};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_without_file() {
        let config: BindingConfig = Figment::from(Serialized::defaults(BindingConfig::default()))
            .extract()
            .unwrap();
        assert_eq!(config, BindingConfig::default());
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "fallback = \"reject\"\n[formats]\ndate = \"%d/%m/%Y\"").unwrap();

        let config: BindingConfig = Figment::from(Serialized::defaults(BindingConfig::default()))
            .merge(Toml::file(file.path()))
            .extract()
            .unwrap();

        assert_eq!(config.fallback, FallbackPolicy::Reject);
        assert_eq!(config.boolean, BooleanPolicy::Lenient);
        assert_eq!(config.formats.date.as_deref(), Some("%d/%m/%Y"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = figment(Some(Path::new("/no/such/bindery.toml"))).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn bad_value_is_reported() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "boolean = \"sometimes\"").unwrap();

        let err = load(Some(file.path())).unwrap_err();
        assert!(format!("{err:#}").contains("invalid binding config"));
    }
}
