use crate::{
    cli::args::{ServeArgs, SubmitArgs, WebhookOverrides},
    cli::Command,
    core::{
        config::RelayConfig,
        pipeline::{validator, Normalizer, SubmissionPipeline},
        ConfigLoader, ConfigValidator,
    },
    server, Result,
};
use anyhow::{anyhow, Context};
use serde::Serialize;
use serde_json::{Map, Value};

/// Load configuration for a command and apply its flag overrides on top.
///
/// Also returns ignored environment values, to be logged once logging is initialized.
pub fn resolve_config(command: &Command) -> Result<(RelayConfig, Vec<String>)> {
    let (mut config, warnings) = ConfigLoader::load_with_warnings(command.config_path())?;
    match command {
        Command::Serve(args) => {
            if let Some(bind) = &args.bind {
                config.server.bind = bind.clone();
            }
            apply_webhook_overrides(&mut config, &args.webhook);
        }
        Command::Submit(args) => apply_webhook_overrides(&mut config, &args.webhook),
        Command::CheckConfig(_) => {}
    }
    Ok((config, warnings))
}

fn apply_webhook_overrides(config: &mut RelayConfig, overrides: &WebhookOverrides) {
    if let Some(url) = &overrides.webhook_url {
        config.webhook.url = Some(url.clone());
    }
    if let Some(timeout_ms) = overrides.timeout_ms {
        config.webhook.timeout_ms = timeout_ms;
    }
}

pub async fn serve(_args: ServeArgs, config: RelayConfig) -> Result<()> {
    ConfigValidator::validate(&config)?;
    server::serve(&config).await?;
    Ok(())
}

pub async fn submit(args: SubmitArgs, config: RelayConfig) -> Result<()> {
    let article = match (&args.file, &args.article) {
        (Some(path), _) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read article from {}", path.display()))?,
        (None, Some(text)) => text.clone(),
        (None, None) => return Err(anyhow!("either --file or --article is required")),
    };
    let mut fields = Map::new();
    fields.insert(validator::FIELD_COMPANY_DOMAIN.to_string(), Value::String(args.domain));
    fields.insert(validator::FIELD_ARTICLE_TITLE.to_string(), Value::String(args.title));
    fields.insert(validator::FIELD_ARTICLE.to_string(), Value::String(article));
    let raw = Value::Object(fields);

    if args.dry_run {
        let submission = validator::validate(&raw)?;
        let payload = Normalizer::new(config.analysis).normalize(submission);
        return print_json(&payload);
    }

    ConfigValidator::validate(&config)?;
    let pipeline = SubmissionPipeline::from_config(&config)?;
    let result = pipeline.process(&raw).await?;
    print_json(&result)
}

pub fn check_config(config: RelayConfig) -> Result<()> {
    ConfigValidator::validate(&config)?;
    let mut shown = config;
    if shown.webhook.auth_token.is_some() {
        shown.webhook.auth_token = Some("***".to_string());
    }
    let rendered =
        toml::to_string_pretty(&shown).context("failed to render effective configuration")?;
    println!("{}", rendered);
    println!("# Environment overrides:");
    for line in ConfigLoader::env_var_documentation() {
        println!("#   {}", line);
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let value: Value = serde_json::to_value(value)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
