use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;

use crate::push::parse_toast;

pub fn render(document: &str) -> Result<String> {
    let push = parse_toast(document);
    Ok(serde_json::to_string_pretty(&push)?)
}

pub async fn run(file: &Path) -> Result<()> {
    let document = if file == Path::new("-") {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("Failed to read toast document from stdin")?;
        buf
    } else {
        tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("Failed to read toast document {}", file.display()))?
    };
    println!("{}", render(&document)?);
    Ok(())
}
