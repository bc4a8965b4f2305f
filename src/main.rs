use anyhow::Result;
use push_bridge::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
