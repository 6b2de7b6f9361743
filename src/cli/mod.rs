pub mod args;
pub mod commands;

pub use args::{CheckConfigArgs, ConfigArgs, ServeArgs, SubmitArgs, WebhookOverrides};
use crate::core::config::RelayConfig;
use clap::{Parser, Subcommand};
use std::path::Path;

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n\
RELAY COMMANDS:\n{subcommands}\n";

#[derive(Parser)]
#[command(name = "article-relay")]
#[command(version = crate::VERSION)]
#[command(about = "Validate article submissions and relay them to a workflow webhook")]
#[command(help_template = HELP_TEMPLATE)]
#[command(
    after_long_help = "Typical flow: check-config to confirm the webhook, submit --dry-run to preview a payload, then serve."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(
        about = "Run the HTTP submission service",
        long_about = "Serve accepts POST /api/process submissions, normalizes them, and forwards each one to the configured workflow webhook exactly once.",
        after_help = "Example:\n    article-relay serve --bind 0.0.0.0:5000 --webhook-url https://hooks.example.com/articles"
    )]
    Serve(ServeArgs),
    #[command(
        about = "Process one article from the command line",
        long_about = "Submit runs a single article through validation, normalization, and dispatch, then prints the processing result as JSON.",
        after_help = "Example:\n    article-relay submit --domain example.com --title \"Launch\" --file article.txt --dry-run"
    )]
    Submit(SubmitArgs),
    #[command(
        about = "Validate configuration and print effective values",
        long_about = "Check-config merges defaults, the config file, and RELAY_* environment variables, validates the result, and prints it as TOML.",
        after_help = "Example:\n    article-relay check-config --config ./relay.toml"
    )]
    CheckConfig(CheckConfigArgs),
}

impl Command {
    /// Explicit config file requested on the command line, if any.
    pub fn config_path(&self) -> Option<&Path> {
        let config = match self {
            Command::Serve(args) => &args.config,
            Command::Submit(args) => &args.config,
            Command::CheckConfig(args) => &args.config,
        };
        config.config.as_deref()
    }
}

pub async fn run(command: Command, config: RelayConfig) -> crate::Result<()> {
    match command {
        Command::Serve(serve_args) => commands::serve(serve_args, config).await,
        Command::Submit(submit_args) => commands::submit(submit_args, config).await,
        Command::CheckConfig(_) => commands::check_config(config),
    }
}
