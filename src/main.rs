use clap::Parser;
use extcopy::{Cli, ExtCopy, ExtractError, OutputFormatter, OutputMode, UserFriendlyError};
use std::path::PathBuf;
use std::process;

const EXIT_SUCCESS: i32 = 0;
const EXIT_GENERAL: i32 = 1;
const EXIT_INVALID_ARGUMENT: i32 = 2;
const EXIT_ABORTED: i32 = 3;
const EXIT_NOTHING_COPIED: i32 = 4;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    if let Err(e) = extcopy::logging::init(cli.verbosity_level()) {
        eprintln!("Warning: {:#}", e);
    }

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let app = match ExtCopy::from_cli(&cli) {
        Ok(app) => app,
        Err(e) => {
            print_startup_error(&cli, &e);
            return exit_code_for(&e);
        }
    };

    if cli.dry_run {
        return match app.dry_run() {
            Ok(_) => EXIT_SUCCESS,
            Err(e) => {
                app.handle_error(&e);
                exit_code_for(&e)
            }
        };
    }

    match app.execute() {
        Ok(summary) if summary.status().is_success() => EXIT_SUCCESS,
        Ok(_) => EXIT_NOTHING_COPIED,
        Err(e) => {
            app.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &ExtractError) -> i32 {
    if error.is_invalid_argument() {
        EXIT_INVALID_ARGUMENT
    } else if error.is_fatal_abort() {
        EXIT_ABORTED
    } else {
        EXIT_GENERAL
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("extcopy.toml"));

    match ExtCopy::generate_sample_config(&config_path) {
        Ok(()) => {
            println!(
                "Generated sample configuration file: {}",
                config_path.display()
            );
            println!("\nTo use this configuration:");
            println!("  extcopy --config {}", config_path.display());
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            EXIT_GENERAL
        }
    }
}

fn print_startup_error(cli: &Cli, error: &ExtractError) {
    let formatter = OutputFormatter::new(
        OutputMode::from(&cli.output_format),
        cli.verbosity_level(),
        cli.quiet,
    );
    formatter.print_user_friendly_error(error);
}
