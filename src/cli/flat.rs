use anyhow::Result;

use crate::push::parse_flat;

pub fn render(message: &str, app_data: &str) -> Result<String> {
    let push = parse_flat(message, app_data);
    Ok(serde_json::to_string_pretty(&push)?)
}

pub async fn run(message: &str, app_data: &str) -> Result<()> {
    println!("{}", render(message, app_data)?);
    Ok(())
}
