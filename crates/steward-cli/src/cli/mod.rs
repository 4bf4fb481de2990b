use clap::Parser;
use steward_config::StewardConfig;

pub mod commands;
pub mod global;

pub use commands::Commands;
pub use global::{GlobalFlags, OutputFormat};

use crate::commands::shared::parse::parse_enum;

/// Top-level CLI parser for the `stw` binary.
#[derive(Debug, Parser)]
#[command(
    name = "stw",
    version,
    about = "Steward - data governance workflow gates and lineage"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw (defaults to general.default_format)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve global flags, falling back to the configured output format.
    pub fn global_flags(&self, config: &StewardConfig) -> anyhow::Result<GlobalFlags> {
        let format = match self.format {
            Some(format) => format,
            None => parse_enum(&config.general.default_format, "general.default_format")?,
        };
        Ok(GlobalFlags {
            format,
            quiet: self.quiet,
            verbose: self.verbose,
        })
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;
    use steward_config::StewardConfig;

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["stw", "--format", "table", "--verbose", "gates", "c.json"])
            .expect("cli should parse");

        assert_eq!(cli.format, Some(OutputFormat::Table));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Gates(_)));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["stw", "status", "c.json", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, Some(OutputFormat::Raw));
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["stw", "--format", "xml", "gates", "c.json"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn missing_format_falls_back_to_config() {
        let cli = Cli::try_parse_from(["stw", "summary", "c.json"]).expect("cli should parse");
        let mut config = StewardConfig::default();
        config.general.default_format = "table".to_string();

        let flags = cli.global_flags(&config).expect("flags should resolve");
        assert_eq!(flags.format, OutputFormat::Table);
    }

    #[test]
    fn explicit_format_beats_config() {
        let cli = Cli::try_parse_from(["stw", "-f", "raw", "summary", "c.json"])
            .expect("cli should parse");
        let flags = cli
            .global_flags(&StewardConfig::default())
            .expect("flags should resolve");
        assert_eq!(flags.format, OutputFormat::Raw);
    }

    #[test]
    fn advance_write_flag() {
        let cli = Cli::try_parse_from(["stw", "advance", "c.json", "--write"])
            .expect("cli should parse");
        match cli.command {
            Commands::Advance(args) => {
                assert!(args.write);
                assert_eq!(args.file.to_str(), Some("c.json"));
            }
            other => panic!("expected advance, got {other:?}"),
        }
    }

    #[test]
    fn lineage_direction_defaults_to_downstream() {
        let cli = Cli::try_parse_from(["stw", "lineage", "c.json", "src_loans"])
            .expect("cli should parse");
        match cli.command {
            Commands::Lineage(args) => {
                assert_eq!(args.node, "src_loans");
                assert_eq!(args.direction, "downstream");
            }
            other => panic!("expected lineage, got {other:?}"),
        }
    }
}
