use anyhow::{anyhow, Context};
use tracing_subscriber::{fmt, EnvFilter};

/// Default filter directive for a `-v` count. `RUST_LOG` takes precedence.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "extcopy=warn",
        1 => "extcopy=info",
        2 => "extcopy=debug",
        _ => "extcopy=trace",
    }
}

/// Installs the global subscriber, writing to stderr so stdout carries only
/// user-facing output.
pub fn init(verbosity: u8) -> anyhow::Result<()> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) => EnvFilter::try_new(&directives)
            .with_context(|| format!("invalid RUST_LOG value '{}'", directives))?,
        Err(_) => EnvFilter::new(default_directive(verbosity)),
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install logger: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(0), "extcopy=warn");
        assert_eq!(default_directive(2), "extcopy=debug");
        assert_eq!(default_directive(9), "extcopy=trace");
    }
}
