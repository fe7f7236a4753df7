//! `nettask`: send one request and print the decoded JSON response.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use nettask_core::{HttpMethod, JsonRequest, NetworkClient, NetworkRequest, TransportConfig};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Absolute URL to call
    endpoint: String,

    /// HTTP method (GET, POST, PUT, DELETE)
    #[arg(short = 'X', long, default_value = "GET")]
    method: HttpMethod,

    /// Request parameter as key=value; the value is parsed as JSON when possible
    #[arg(short = 'p', long = "param", value_parser = parse_param)]
    params: Vec<(String, Value)>,

    /// Request header as name:value
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    headers: Vec<(String, String)>,

    /// Whole-request timeout in seconds
    #[arg(long, env = "NETTASK_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

fn parse_param(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))?;
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected name:value, got {raw:?}"))?;
    Ok((name.trim().to_string(), value.trim().to_string()))
}

fn build(args: Args) -> JsonRequest<Value> {
    let mut request = JsonRequest::new(args.method, args.endpoint);
    for (key, value) in args.params {
        request = request.with_parameter(key, value);
    }
    for (name, value) in args.headers {
        request = request.with_header(name, value);
    }
    request
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = TransportConfig {
        timeout: args.timeout_secs.map(Duration::from_secs),
        connect_timeout: None,
    };
    let client = NetworkClient::with_config(&config).context("failed to set up HTTP client")?;

    let request = build(args);
    tracing::debug!(?request, "sending");
    let value = client
        .call(&request)
        .await
        .with_context(|| format!("{} {} failed", request.method(), request.endpoint()))?;

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
