//! Logger builder implementation

use std::io;

use tracing::Subscriber;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::{Config, Format, Writer};
use crate::error::LogError;

/// Logger builder
pub struct LoggerBuilder {
    config: Config,
    writer: Option<BoxMakeWriter>,
}

impl LoggerBuilder {
    /// Create builder from config
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self {
            config,
            writer: None,
        }
    }

    /// Send output to `writer` instead of the configured destination.
    #[must_use]
    pub fn with_writer<W>(mut self, writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        self.writer = Some(BoxMakeWriter::new(writer));
        self
    }

    /// Build the subscriber without installing it.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Filter`] if the filter directives do not parse.
    pub fn subscriber(self) -> Result<impl Subscriber + Send + Sync + 'static, LogError> {
        let filter = EnvFilter::try_new(&self.config.level).map_err(|e| LogError::Filter {
            filter: self.config.level.clone(),
            reason: e.to_string(),
        })?;

        let writer = self.writer.unwrap_or_else(|| match self.config.writer {
            Writer::Stderr => BoxMakeWriter::new(io::stderr),
            Writer::Stdout => BoxMakeWriter::new(io::stdout),
        });

        Ok(tracing_subscriber::registry()
            .with(filter)
            .with(format_layer(&self.config, writer)))
    }

    /// Build and install the subscriber as the global default.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Filter`] for bad directives and [`LogError::Init`]
    /// if a global subscriber is already installed.
    pub fn build(self) -> Result<(), LogError> {
        self.subscriber()?
            .try_init()
            .map_err(|e| LogError::Init(e.to_string()))
    }
}

fn format_layer<S>(config: &Config, writer: BoxMakeWriter) -> Box<dyn Layer<S> + Send + Sync + 'static>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let display = &config.display;
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(display.colors && config.format != Format::Json)
        .with_target(display.target)
        .with_file(display.source)
        .with_line_number(display.source);

    match (config.format, display.time) {
        (Format::Pretty, true) => layer.pretty().boxed(),
        (Format::Pretty, false) => layer.pretty().without_time().boxed(),
        (Format::Compact, true) => layer.compact().boxed(),
        (Format::Compact, false) => layer.compact().without_time().boxed(),
        (Format::Json, true) => layer.json().flatten_event(true).boxed(),
        (Format::Json, false) => layer.json().flatten_event(true).without_time().boxed(),
    }
}
