use clap::Parser;
use std::path::PathBuf;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "+", env!("BUILD_NUMBER"));

#[derive(Parser, Debug)]
#[command(name = "arogya", version = VERSION, about = "Arogya AI report history TUI")]
pub struct Cli {
    /// Base URL of the reports API
    #[arg(long, default_value = "http://127.0.0.1:8000", value_parser = parse_url)]
    pub api_url: String,

    /// Base URL of the web app (report details and uploads open here)
    #[arg(long, default_value = "http://localhost:5173", value_parser = parse_url)]
    pub web_url: String,

    /// Session file holding the stored credentials
    /// (default: $XDG_CONFIG_HOME/arogya/session.json)
    #[arg(long)]
    pub session_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(short, long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Enable verbose logging to $XDG_STATE_HOME/arogya/debug.log
    #[arg(long)]
    pub verbose: bool,
}

/// Validates that `url` is an http(s) URL with a non-empty host.
pub fn validate_url(url: &str) -> Result<(), String> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    let host = rest.and_then(|r| r.split(['/', '?', '#']).next());
    match host {
        Some(h) if !h.is_empty() && !url.contains(char::is_whitespace) => Ok(()),
        _ => Err(format!(
            "Invalid URL '{url}'. Expected http://host[:port] or https://host[:port]."
        )),
    }
}

fn parse_url(url: &str) -> Result<String, String> {
    validate_url(url)?;
    Ok(url.trim_end_matches('/').to_string())
}
