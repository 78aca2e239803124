use std::path::PathBuf;

use bindery_convert::FallbackPolicy;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "bindery", version)]
#[command(about = "Convert raw request parameters to typed values", long_about = None)]
pub struct Cli {
    /// TOML file with binding policies
    #[arg(long, global = true, env = "BINDERY_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log filter directives (e.g. "debug", "bindery_convert=trace")
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a single raw value
    Convert(ConvertArgs),

    /// Bind a set of request parameters to typed fields
    Bind(BindArgs),

    /// List registered type names and aliases
    Types,
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Registered type name or alias (see `bindery types`)
    #[arg(short, long = "type", value_name = "NAME")]
    pub type_name: String,

    /// Raw parameter value; omit to convert an absent parameter
    #[arg(short, long, allow_hyphen_values = true)]
    pub value: Option<String>,

    /// Format hint passed to the converter
    #[arg(short, long)]
    pub format: Option<String>,
}

#[derive(Args, Debug)]
pub struct BindArgs {
    /// Request parameter as `name=value`
    #[arg(short, long = "param", value_name = "NAME=VALUE")]
    pub params: Vec<String>,

    /// Field to bind as `name:type[:format]`
    #[arg(short, long = "field", value_name = "NAME:TYPE[:FORMAT]", required = true)]
    pub fields: Vec<String>,

    /// Override the configured fallback policy
    #[arg(long, value_enum)]
    pub fallback: Option<FallbackArg>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackArg {
    UseDefault,
    Reject,
}

impl From<FallbackArg> for FallbackPolicy {
    fn from(arg: FallbackArg) -> Self {
        match arg {
            FallbackArg::UseDefault => Self::UseDefault,
            FallbackArg::Reject => Self::Reject,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_bind_arguments() {
        let cli = Cli::try_parse_from([
            "bindery",
            "bind",
            "-p",
            "age=3",
            "--field",
            "age:int",
            "--fallback",
            "reject",
        ])
        .unwrap();

        let Command::Bind(args) = cli.command else {
            panic!("expected bind");
        };
        assert_eq!(args.params, ["age=3"]);
        assert_eq!(args.fields, ["age:int"]);
        assert_eq!(args.fallback, Some(FallbackArg::Reject));
    }
}
