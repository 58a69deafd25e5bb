mod cli;
mod repl;

use std::sync::Arc;
use std::time::Duration;

use nyai_common::NyaiError;
use nyai_config::NyaiConfig;
use nyai_llm::{LlmError, OpenAiClient, OpenAiConfig, Session};
use tracing_subscriber::EnvFilter;

use crate::repl::ReplOptions;

fn init_logging(directive: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                directive
                    .parse()
                    .unwrap_or_else(|_| "nyai=info".parse().unwrap()),
            ),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Turn a bare level into a directive scoped to our crates.
fn log_directive(args: &cli::Args, config: &NyaiConfig) -> String {
    match &args.log_level {
        Some(level) if level.contains('=') => level.clone(),
        Some(level) => format!("nyai={level}"),
        None => format!("nyai={}", config.logging.level.to_lowercase()),
    }
}

fn provider_config(config: &NyaiConfig) -> Result<OpenAiConfig, NyaiError> {
    let provider = &config.provider;
    let api_key = std::env::var(&provider.api_key_env)
        .map_err(|_| LlmError::MissingApiKey(provider.api_key_env.clone()))?;

    let mut openai = OpenAiConfig::new(api_key)
        .with_base_url(provider.base_url.clone())
        .with_connect_timeout(Duration::from_secs(provider.connect_timeout_secs.into()))
        .with_timeout(Duration::from_secs(provider.timeout_secs.into()));
    if let Some(organization) = &provider.organization {
        openai = openai.with_organization(organization.clone());
    }
    Ok(openai)
}

#[tokio::main]
async fn main() -> Result<(), NyaiError> {
    let args = cli::parse();

    // Loaded before logging so `[logging] level` can seed the filter
    let loaded = nyai_config::load_config(args.config.as_deref());
    let config = loaded.as_ref().cloned().unwrap_or_default();
    init_logging(&log_directive(&args, &config));

    tracing::info!("nyai v{} starting", env!("CARGO_PKG_VERSION"));
    match loaded {
        Ok(_) => tracing::debug!("config loaded"),
        Err(e) if args.config.is_some() => return Err(e.into()),
        Err(e) => tracing::warn!("Config load failed, using defaults: {e}"),
    }

    if args.print_config {
        println!("{}", nyai_config::config_to_json(&config));
        return Ok(());
    }

    let client = OpenAiClient::new(provider_config(&config)?)?;
    let mut session = Session::new(Arc::new(client))
        .with_system_prompt(args.system.clone().unwrap_or_else(|| config.session.system.clone()))
        .with_remember(config.session.remember && !args.no_remember);
    if let Some(model) = args.model.clone().or_else(|| config.session.model.clone()) {
        session = session.with_model(model);
    } else {
        tracing::warn!("No model configured; pass --model or set session.model");
    }

    let options = ReplOptions {
        author: args.author,
        attachments: args.attachments,
        vars: args.vars.into_iter().collect(),
        strict_vars: args.strict_vars,
        stream: !args.no_stream,
    };

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    repl::run(&mut session, &options, stdin, &mut stdout).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn log_level_flag_is_scoped_to_nyai() {
        let config = NyaiConfig::default();
        let args = cli::Args::parse_from(["nyai", "--log-level", "debug"]);
        assert_eq!(log_directive(&args, &config), "nyai=debug");

        let args = cli::Args::parse_from(["nyai", "--log-level", "reqwest=trace"]);
        assert_eq!(log_directive(&args, &config), "reqwest=trace");

        let args = cli::Args::parse_from(["nyai"]);
        assert_eq!(log_directive(&args, &config), "nyai=info");
    }

    #[test]
    fn provider_config_requires_key_variable() {
        let mut config = NyaiConfig::default();
        config.provider.api_key_env = "NYAI_TEST_KEY_THAT_IS_NEVER_SET".into();
        let err = provider_config(&config).unwrap_err();
        assert!(matches!(err, NyaiError::Llm(_)));
        assert!(err.to_string().contains("NYAI_TEST_KEY_THAT_IS_NEVER_SET"));
    }
}
