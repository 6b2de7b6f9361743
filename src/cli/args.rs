use clap::Args;
use std::path::PathBuf;

#[derive(Args, Clone, Debug, Default)]
pub struct ConfigArgs {
    /// Path to the relay configuration file (default: ./relay.toml when present)
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Clone, Debug, Default)]
pub struct WebhookOverrides {
    /// Workflow endpoint receiving normalized submissions
    #[arg(long, value_name = "URL", help_heading = "Webhook Overrides")]
    pub webhook_url: Option<String>,

    /// Upper bound for one outbound dispatch in milliseconds (default: 30000)
    #[arg(long, value_name = "MILLIS", help_heading = "Webhook Overrides")]
    pub timeout_ms: Option<u64>,
}

#[derive(Args, Clone, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Socket address the HTTP listener binds to (default: 127.0.0.1:5000)
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,

    #[command(flatten)]
    pub webhook: WebhookOverrides,
}

#[derive(Args, Clone, Debug)]
#[command(group(
    clap::ArgGroup::new("article_source")
        .required(true)
        .args(["file", "article"])
))]
pub struct SubmitArgs {
    /// Company domain or URL the article belongs to
    #[arg(long, value_name = "DOMAIN")]
    pub domain: String,

    /// Article title
    #[arg(long, value_name = "TITLE")]
    pub title: String,

    /// Read the article body from this file
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Article body given inline
    #[arg(long, value_name = "TEXT")]
    pub article: Option<String>,

    /// Validate and normalize only; print the payload without dispatching it
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub webhook: WebhookOverrides,
}

#[derive(Args, Clone, Debug)]
pub struct CheckConfigArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}
