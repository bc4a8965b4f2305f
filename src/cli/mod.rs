use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod flat;
pub mod launch;
pub mod toast;

use crate::core::init_tracing;

#[derive(Subcommand)]
enum Command {
    /// Parse a toast XML notification document
    Toast {
        /// Path to the XML document, `-` reads stdin
        #[arg(long)]
        file: PathBuf,
    },
    /// Parse a flat notification payload
    Flat {
        /// URL query string carrying textTypeTitle and textTypeContent
        #[arg(long, default_value = "")]
        message: String,

        /// App data of the form {key1:val1&key2:val2}
        #[arg(long)]
        app_data: String,
    },
    /// Check application launch extra data for a tapped notification
    Launch {
        /// Extra data entry, may be repeated
        #[arg(long = "extra", value_name = "KEY=VALUE", value_parser = launch::parse_extra)]
        extra: Vec<(String, String)>,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();
    init_tracing();

    // Handle each sub command
    match args.command {
        Some(Command::Toast { file }) => {
            toast::run(&file).await?;
        }
        Some(Command::Flat { message, app_data }) => {
            flat::run(&message, &app_data).await?;
        }
        Some(Command::Launch { extra }) => {
            launch::run(extra).await?;
        }
        None => {}
    }

    Ok(())
}
