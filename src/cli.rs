use crate::config::{CliOverrides, Config, ExtractionTarget};
use crate::error::Result;
use crate::scanner::validate_extension;
use crate::ui::OutputMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "extcopy")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Copy every file with a given extension from a directory tree into one flat directory")]
#[command(
    long_about = "extcopy walks SOURCE recursively and copies every file whose name, from its \
                  first dot onward, equals EXTENSION into DESTINATION. Subdirectories are \
                  flattened and files with the same name overwrite each other without warning."
)]
#[command(after_help = "EXAMPLES:\n  \
    extcopy .class build/lib collected\n  \
    extcopy .tar.gz downloads archives --dry-run\n  \
    extcopy --config extcopy.toml -v")]
pub struct Cli {
    /// Extension to match, including the leading dot (e.g. .class)
    #[arg(value_parser = parse_extension)]
    pub extension: Option<String>,

    /// Directory to scan recursively
    pub source: Option<PathBuf>,

    /// Existing directory that receives the copies
    pub destination: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only the final status and errors)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (list what would be copied without copying)
    #[arg(long, help = "Show what would be copied without actually doing it")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl From<&OutputFormat> for OutputMode {
    fn from(format: &OutputFormat) -> Self {
        match format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;
        config.merge_with_cli_args(&self.create_cli_overrides());
        Ok(config)
    }

    /// Loads the config, applies command-line values on top and checks that
    /// nothing is missing.
    pub fn resolve_target(&self) -> Result<(Config, ExtractionTarget)> {
        let config = self.load_config()?;
        let target = config.validate()?;
        Ok((config, target))
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_extension(self.extension.clone())
            .with_source_dir(self.source.clone())
            .with_destination_dir(self.destination.clone())
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

pub fn parse_extension(s: &str) -> std::result::Result<String, String> {
    validate_extension(s)
        .map(|_| s.to_string())
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("extcopy").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_positional_arguments() {
        let cli = parse(&[".class", "lib", "lib2"]);
        assert_eq!(cli.extension.as_deref(), Some(".class"));
        assert_eq!(cli.source, Some(PathBuf::from("lib")));
        assert_eq!(cli.destination, Some(PathBuf::from("lib2")));
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_extension_without_dot_is_rejected() {
        let result = Cli::try_parse_from(["extcopy", "class", "lib", "lib2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["extcopy", "-q", "-v", ".txt", "a", "b"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbosity_level() {
        assert_eq!(parse(&["-vv", ".txt", "a", "b"]).verbosity_level(), 2);
        assert_eq!(parse(&["-q", ".txt", "a", "b"]).verbosity_level(), 0);
    }

    #[test]
    fn test_overrides_carry_positional_values() {
        let cli = parse(&[".md", "docs", "out"]);
        let overrides = cli.create_cli_overrides();
        assert_eq!(overrides.extension.as_deref(), Some(".md"));
        assert_eq!(overrides.destination_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_output_format_maps_to_mode() {
        let cli = parse(&["--output-format", "json", ".txt", "a", "b"]);
        assert_eq!(OutputMode::from(&cli.output_format), OutputMode::Json);
        assert_eq!(OutputMode::from(&OutputFormat::Plain), OutputMode::Plain);
        assert_eq!(OutputMode::from(&OutputFormat::Human), OutputMode::Human);
    }

    #[test]
    fn test_parse_extension() {
        assert_eq!(parse_extension(".gz").unwrap(), ".gz");
        assert!(parse_extension("gz").is_err());
    }
}
