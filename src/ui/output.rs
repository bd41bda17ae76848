use crate::error::{ExtractError, UserFriendlyError};
use crate::extractor::{ExtractionSummary, PlannedCopy};
use console::{style, Emoji, Term};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("{}{}", ROCKET, style(operation).bold());
                    } else {
                        println!("> {}", operation);
                    }
                }
                OutputMode::Json => self.print_json_message("operation_start", operation),
                OutputMode::Plain => println!("STARTING: {}", operation),
            }
        }
    }

    pub fn print_user_friendly_error(&self, error: &ExtractError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => eprintln!("SUGGESTION: {}", suggestion),
            }
        }
    }

    /// Prints the final status. Shown even in quiet mode.
    pub fn print_final_status(&self, summary: &ExtractionSummary) {
        let status = summary.status();

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    let text = status.to_string();
                    if status.is_success() {
                        println!("{}", style(text).green().bold());
                    } else {
                        println!("{}", style(text).red().bold());
                    }
                } else {
                    println!("{}", status);
                }

                if self.should_show_message(1) {
                    println!("  Bytes copied: {}", format_bytes(summary.bytes_copied));
                    println!("  Time taken:   {}", format_duration(summary.duration));
                }
            }
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "status",
                    "success": status.is_success(),
                    "message": status.to_string(),
                    "summary": summary,
                }));
            }
            OutputMode::Plain => {
                println!("{}", status);
                if self.should_show_message(1) {
                    println!("Bytes copied: {}", summary.bytes_copied);
                    println!("Duration: {:?}", summary.duration);
                }
            }
        }
    }

    pub fn print_plan(&self, plan: &[PlannedCopy]) {
        match self.mode {
            OutputMode::Human | OutputMode::Plain => {
                self.print_separator();
                for copy in plan {
                    println!(
                        "  {} -> {}",
                        copy.source.display(),
                        copy.destination.display()
                    );
                }
                self.print_separator();
                println!("Files that would be copied: {}", plan.len());
            }
            OutputMode::Json => {
                let copies: Vec<_> = plan
                    .iter()
                    .map(|copy| {
                        serde_json::json!({
                            "source": copy.source.display().to_string(),
                            "destination": copy.destination.display().to_string(),
                        })
                    })
                    .collect();
                self.print_json_object(&serde_json::json!({
                    "type": "plan",
                    "files": plan.len(),
                    "copies": copies,
                }));
            }
        }
    }

    pub fn print_separator(&self) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}", style("─".repeat(60)).dim());
                } else {
                    println!("{}", "-".repeat(60));
                }
            }
            OutputMode::Plain => println!("{}", "-".repeat(60)),
            OutputMode::Json => {}
        }
    }

    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        if self.use_colors {
            match msg_type {
                MessageType::Error => eprintln!("{}{}", CROSS, style(message).red().bold()),
                MessageType::Info => println!("{}{}", INFO, style(message).cyan()),
            }
        } else {
            match msg_type {
                MessageType::Error => eprintln!("✗ {}", message),
                MessageType::Info => println!("i {}", message),
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Error,
    Info,
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}
