use std::path::PathBuf;

use clap::Parser;

/// nyai: chat with an OpenAI-compatible model from the terminal.
///
/// Reads one message per line from stdin and prints each reply.
#[derive(Parser, Debug)]
#[command(name = "nyai", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Model to use instead of the configured default.
    #[arg(short, long)]
    pub model: Option<String>,

    /// System prompt for the whole session.
    #[arg(short, long)]
    pub system: Option<String>,

    /// Author name prefixed to every message.
    #[arg(short, long)]
    pub author: Option<String>,

    /// File to attach to the first message (repeatable).
    #[arg(long = "attach", value_name = "PATH")]
    pub attachments: Vec<PathBuf>,

    /// Placeholder value substituted into every line (repeatable).
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_var)]
    pub vars: Vec<(String, String)>,

    /// Fail on placeholders that have no `--var` value.
    #[arg(long)]
    pub strict_vars: bool,

    /// Wait for complete replies instead of streaming them.
    #[arg(long)]
    pub no_stream: bool,

    /// Do not keep the conversation history between lines.
    #[arg(long)]
    pub no_remember: bool,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

fn parse_var(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got `{raw}`")),
    }
}

pub fn parse() -> Args {
    Args::parse()
}
