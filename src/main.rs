use anyhow::Context;
use clap::Parser;
use docgen_client::app::commands::{run_command, CommandOutput};
use docgen_client::utils::{logger, validation::Validate};
use docgen_client::CliArgs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    let config = args
        .client_config()
        .context("failed to load client configuration")?;
    if args.verbose {
        tracing::debug!("Client config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let client = docgen_client::init(&config)?;

    match run_command(client, &args.command).await {
        Ok(CommandOutput::Json(value)) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Ok(CommandOutput::Saved { path, bytes }) => {
            tracing::info!("📁 Saved {} bytes to {}", bytes, path.display());
            println!("📁 {}", path.display());
        }
        Err(e) => {
            // The request itself was already logged by the client.
            eprintln!("❌ {}", e);
            if let Some(body) = e.response_body() {
                eprintln!("{}", body);
            }
            std::process::exit(1);
        }
    }

    Ok(())
}
