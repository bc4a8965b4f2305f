use anyhow::Result;

use crate::platform::LaunchArgs;
use crate::push::parse_launch_args;

/// Parse a single `KEY=VALUE` argument. Keys are URIs so only the first
/// `=` splits.
pub fn parse_extra(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no `=` found in `{s}`"))?;
    Ok((key.to_string(), value.to_string()))
}

pub fn render(extra: Vec<(String, String)>) -> Result<String> {
    let args: LaunchArgs = extra.into_iter().collect();
    let push = parse_launch_args(&args);
    Ok(serde_json::to_string_pretty(&push)?)
}

pub async fn run(extra: Vec<(String, String)>) -> Result<()> {
    println!("{}", render(extra)?);
    Ok(())
}
