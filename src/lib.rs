pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod logging;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, CopyConfig, ExtractConfig, ExtractionTarget};
pub use error::{DirectoryRole, ExtractError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{
    ExtractionSummary, ExtractorState, FileExtractor, FinalStatus, PlannedCopy,
};
pub use scanner::{first_dot_suffix, ExtensionFilter, TreeWalker};
pub use ui::{OutputFormatter, OutputMode};

use std::path::Path;

/// Application driver: resolves parameters, runs the extractor and reports
/// through the output formatter.
pub struct ExtCopy {
    config: Config,
    target: ExtractionTarget,
    output_formatter: OutputFormatter,
}

impl ExtCopy {
    pub fn new(
        config: Config,
        target: ExtractionTarget,
        output_mode: OutputMode,
        verbose: u8,
        quiet: bool,
    ) -> Self {
        Self {
            config,
            target,
            output_formatter: OutputFormatter::new(output_mode, verbose, quiet),
        }
    }

    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let (config, target) = cli_args.resolve_target()?;
        Ok(Self::new(
            config,
            target,
            OutputMode::from(&cli_args.output_format),
            cli_args.verbose,
            cli_args.quiet,
        ))
    }

    /// Validates the target and performs the full copy pass. The first
    /// failure ends the run and is returned as is.
    pub fn execute(&self) -> Result<ExtractionSummary> {
        let mut extractor = self.build_extractor()?;

        self.output_formatter.start_operation(&format!(
            "Copying {} files from {} to {}",
            self.target.extension,
            self.target.source_dir.display(),
            self.target.destination_dir.display()
        ));

        extractor.run()?;

        let summary = extractor.summary();
        self.output_formatter.print_final_status(&summary);
        Ok(summary)
    }

    /// Validates the target and lists what `execute` would copy.
    pub fn dry_run(&self) -> Result<Vec<PlannedCopy>> {
        let extractor = self.build_extractor()?;

        self.output_formatter
            .info("DRY RUN MODE - No files will be copied");
        let plan = extractor.plan()?;
        self.output_formatter.print_plan(&plan);

        Ok(plan)
    }

    fn build_extractor(&self) -> Result<FileExtractor> {
        Ok(FileExtractor::new(
            self.target.extension.clone(),
            self.target.source_dir.clone(),
            self.target.destination_dir.clone(),
        )?
        .with_buffer_size(self.config.copy.buffer_size))
    }

    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let path = output_path.as_ref();
        std::fs::write(path, Config::create_sample_config())
            .map_err(|e| ExtractError::io(path, e))
    }

    pub fn handle_error(&self, error: &ExtractError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn app(extension: &str, source: &Path, destination: &Path) -> ExtCopy {
        let target = ExtractionTarget {
            extension: extension.to_string(),
            source_dir: source.to_path_buf(),
            destination_dir: destination.to_path_buf(),
        };
        ExtCopy::new(Config::default(), target, OutputMode::Plain, 0, true)
    }

    #[test]
    fn test_execute_copies_and_summarises() {
        let source = TempDir::new().unwrap();
        let destination = TempDir::new().unwrap();
        fs::create_dir(source.path().join("sub")).unwrap();
        fs::write(source.path().join("sub/a.log"), "abc").unwrap();
        fs::write(source.path().join("b.log"), "de").unwrap();

        let summary = app(".log", source.path(), destination.path())
            .execute()
            .unwrap();

        assert_eq!(summary.files_copied, 2);
        assert_eq!(summary.bytes_copied, 5);
        assert_eq!(summary.extension, ".log");
        assert!(summary.status().is_success());
    }

    #[test]
    fn test_dry_run_leaves_destination_untouched() {
        let source = TempDir::new().unwrap();
        let destination = TempDir::new().unwrap();
        fs::write(source.path().join("a.log"), "abc").unwrap();

        let plan = app(".log", source.path(), destination.path())
            .dry_run()
            .unwrap();

        assert_eq!(plan.len(), 1);
        assert_eq!(fs::read_dir(destination.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_execute_rejects_invalid_target() {
        let source = TempDir::new().unwrap();
        let missing = source.path().join("nope");

        let err = app(".log", source.path(), &missing).execute().unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_sample_config_generation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("sample.toml");

        ExtCopy::generate_sample_config(&config_path).unwrap();

        let loaded = Config::load_from_file(&config_path).unwrap();
        assert_eq!(loaded.extract.extension.as_deref(), Some(".class"));
    }

    #[test]
    fn test_version_info() {
        assert!(!version_info().is_empty());
    }
}
