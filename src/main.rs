use anyhow::Result;
use clap::Parser;
use maize_dashboard::{analyzer, chat, cli, config, server, upload};
use maize_dashboard_common::ContextBundle;
use std::sync::Arc;
use cli::{Cli, Commands};
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let config = Config::load()?;

    match cli.command {
        Commands::Serve { bind, port } => {
            let vision = analyzer::AzureVision::from_config(&config)?;
            let state = server::AppState::new(Arc::new(vision));

            let bind = bind.unwrap_or_else(|| config.bind.clone());
            let port = port.unwrap_or(config.port);
            server::run(&bind, port, state).await?;
        }

        Commands::Classify { image } => {
            let vision = analyzer::AzureVision::from_config(&config)?;
            let image = upload::load_image(&image)?;

            let result = analyzer::analyze_maize_image(&vision, &image).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Ask { message } => {
            let context = ContextBundle::snapshot();
            println!("{}", chat::get_farm_response(&message, &context));
        }

        Commands::Config { set_endpoint, set_key, show } => {
            let mut config = config;

            if let Some(endpoint) = set_endpoint {
                config.set_endpoint(endpoint)?;
                println!("✔ エンドポイントを設定しました");
            }

            if let Some(key) = set_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                println!("設定:");
                println!("  エンドポイント: {}", config.endpoint().as_deref().unwrap_or("未設定"));
                println!("  APIキー: {}", if config.api_key().is_some() { "設定済み" } else { "未設定" });
                println!("  待ち受け: {}:{}", config.bind, config.port);
                match config.timeout_seconds {
                    Some(secs) => println!("  タイムアウト: {}秒", secs),
                    None => println!("  タイムアウト: なし"),
                }
            }
        }
    }

    Ok(())
}
