//! Assistant Bot
//!
//! Telegram bot answering Yandex Cloud questions: VM cost estimates, pricing
//! information, folder inventory and YandexGPT answers. The same dispatch
//! path is available from the command line for one-off queries.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use domain_assistant::{CloudAssistant, Dispatcher, InboundMessage, YandexGptClient};
use domain_cloud_resources::{CloudResourceService, YandexCloudInventory};
use domain_pricing::{HOURS_PER_MONTH, MAX_VM_QUANTITY, PricingService, VmCostRequest};
use eyre::{Result, WrapErr};
use tokio::sync::watch;
use tracing::{error, info};

mod config;
mod server;
mod telegram;

use config::{Config, RatesConfig};
use telegram::TelegramClient;

type BotDispatcher = Dispatcher<YandexGptClient, YandexCloudInventory>;

#[derive(Parser)]
#[command(name = "assistant-bot")]
#[command(about = "Yandex Cloud assistant: Telegram bot and CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the Telegram bot with the health and metrics endpoint
    Run,

    /// Estimate the cost of a virtual machine
    Calculate {
        /// vCPU cores
        #[arg(long, value_parser = quantity())]
        cpu: i64,

        /// RAM in gigabytes
        #[arg(long, value_parser = quantity())]
        ram: i64,

        /// Disk in gigabytes
        #[arg(long, value_parser = quantity())]
        disk: i64,

        /// Billed hours
        #[arg(long, default_value_t = HOURS_PER_MONTH, value_parser = quantity())]
        hours: i64,
    },

    /// Show the pricing menu, or pricing for one service
    Pricing {
        /// Service key (compute, storage)
        service: Option<String>,
    },

    /// Handle one message (command or free text) and print the reply
    Ask {
        /// Message text, e.g. "/databases" or "what is YDB?"
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

fn quantity() -> clap::builder::RangedI64ValueParser<i64> {
    clap::value_parser!(i64).range(0..=MAX_VM_QUANTITY)
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let environment = Environment::from_env();
    init_tracing(&environment);

    let cli = Cli::parse();

    match cli.command {
        Commands::Calculate {
            cpu,
            ram,
            disk,
            hours,
        } => {
            let pricing = pricing_service()?;
            let request = VmCostRequest::new(cpu, ram, disk).with_hours(hours);
            let result = pricing.calculate_vm_cost(&request);
            println!("{}", pricing.format_price_message(&result));
        }

        Commands::Pricing { service } => {
            let pricing = pricing_service()?;
            let message = match service {
                Some(service) => pricing.pricing_info(&service.to_lowercase()),
                None => domain_assistant::templates::PRICING_MENU.to_string(),
            };
            println!("{}", message);
        }

        Commands::Ask { text } => {
            let config = Config::from_env()?;
            let dispatcher = build_dispatcher(&config)?;
            let reply = dispatcher
                .handle(&InboundMessage::from_text(&text.join(" ")))
                .await;
            println!("{}", reply);
        }

        Commands::Run => run(Config::from_env()?).await?,
    }

    Ok(())
}

fn pricing_service() -> Result<PricingService> {
    let rates = RatesConfig::from_env()?.load()?;
    Ok(PricingService::new(rates))
}

fn build_dispatcher(config: &Config) -> Result<BotDispatcher> {
    let pricing = PricingService::new(config.rates.load()?);

    let model =
        YandexGptClient::new(config.gpt.clone()).wrap_err("Failed to build YandexGPT client")?;
    let inventory = YandexCloudInventory::new(config.cloud.clone())
        .wrap_err("Failed to build Yandex Cloud client")?;

    Ok(Dispatcher::new(
        pricing,
        CloudAssistant::new(model),
        CloudResourceService::new(inventory, config.folder_id()),
    )
    .with_timeout(config.collaborator_timeout))
}

async fn run(config: Config) -> Result<()> {
    let telegram_config = config::telegram_config()?;
    observability::init_metrics().wrap_err("Failed to install metrics recorder")?;

    let dispatcher = Arc::new(build_dispatcher(&config)?);
    let telegram = Arc::new(TelegramClient::new(telegram_config)?);
    let addr = config.server.socket_addr()?;
    let listener = server::bind(addr)
        .await
        .wrap_err_with(|| format!("Failed to bind health endpoint on {addr}"))?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        server::shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    let server = tokio::spawn(server::serve(listener, wait_for(shutdown_rx.clone())));

    info!(
        folder_id = config.folder_id(),
        environment = ?config.environment,
        "Assistant bot started"
    );
    telegram::run_polling(telegram, dispatcher, wait_for(shutdown_rx)).await;

    match server.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(error = %e, "Health endpoint failed"),
        Err(e) => error!(error = %e, "Health endpoint task panicked"),
    }

    info!("Assistant bot stopped");
    Ok(())
}

async fn wait_for(mut shutdown: watch::Receiver<bool>) {
    // A dropped sender also means shutdown
    let _ = shutdown.wait_for(|stopped| *stopped).await;
}
