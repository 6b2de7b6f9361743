use crate::core::config::LoggingSection;
use crate::logging::context::ExecutionContext;
use crate::logging::layers::console::ConsoleOutput;
use crate::Result;
use anyhow::anyhow;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::filter::Directive;

const DEFAULT_LEVEL: &str = "info";

/// Resolved logging configuration after applying the `[logging]` table to context defaults.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub log_dir: Option<PathBuf>,
    pub default_level: String,
    pub enable_file: bool,
    pub console_output: ConsoleOutput,
}

impl LoggingConfig {
    /// Context defaults first, then whatever the config file sets.
    pub fn resolve(context: ExecutionContext, section: &LoggingSection) -> Result<Self> {
        let config = LoggingConfig {
            log_dir: section.log_dir.clone(),
            default_level: section
                .default_level
                .clone()
                .unwrap_or_else(|| DEFAULT_LEVEL.to_string()),
            enable_file: section
                .enable_file
                .unwrap_or_else(|| context.file_sink_by_default()),
            console_output: section.console_output.unwrap_or(ConsoleOutput::Stderr),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        Directive::from_str(&self.default_level)
            .map_err(|_| anyhow!("logging.default_level must be a valid tracing directive"))?;
        Ok(())
    }
}
