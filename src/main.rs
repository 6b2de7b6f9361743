use article_relay::cli::{self, commands, Args};
use article_relay::logging;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let (config, config_warnings) = commands::resolve_config(&args.command)?;
    let _logging_guard = logging::init(&args.command, &config.logging)?;
    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }
    cli::run(args.command, config).await
}
