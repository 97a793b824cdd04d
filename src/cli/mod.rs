pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "contact")]
#[command(about = "Contact intake CLI - validate submissions and check deployed endpoints")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the submission rules locally over a JSON document")]
    Validate {
        #[arg(help = "Path to a JSON file, or - for stdin", default_value = "-")]
        input: String,
    },

    #[command(about = "Send one submission to an endpoint")]
    Submit {
        #[arg(long, env = "API_URL", help = "Contact endpoint URL")]
        url: String,
        #[arg(long, help = "Sender name")]
        name: String,
        #[arg(long, help = "Sender email address")]
        email: String,
        #[arg(long, help = "Message text")]
        message: String,
    },

    #[command(about = "Smoke-check a deployed endpoint: CORS preflight and rule rejections")]
    Check {
        #[arg(long, env = "API_URL", help = "Contact endpoint URL")]
        url: String,
        #[arg(long, help = "Also send one valid submission (stores a record and emails the operator)")]
        submit: bool,
        #[arg(long, default_value_t = 30, help = "Per-request timeout in seconds")]
        timeout: u64,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Validate { input } => commands::validate::handle(&input, output_format),
        Commands::Submit {
            url,
            name,
            email,
            message,
        } => commands::submit::handle(&url, name, email, message, output_format).await,
        Commands::Check {
            url,
            submit,
            timeout,
        } => commands::check::handle(&url, submit, timeout, output_format).await,
    }
}
