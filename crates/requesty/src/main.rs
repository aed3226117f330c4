//! Requesty CLI - list models, chat and price exchanges from the terminal.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use requesty::{CompletionClient, Config, CostBreakdown, CostEstimator, Message, ModelCatalog};

#[derive(Parser)]
#[command(name = "requesty")]
#[command(author, version, about = "Client for the Requesty LLM router", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the YAML config file
    #[arg(short, long, global = true, default_value = "requesty.yaml")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// List purchasable models
    Models,

    /// Show per-million-token prices for a model
    Pricing {
        /// Model identifier (provider/model)
        model: String,
    },

    /// Send a single prompt and print the reply with its estimated cost
    Chat {
        /// Model identifier (provider/model)
        model: String,
        /// User prompt
        prompt: String,
        /// Optional system message
        #[arg(short, long)]
        system: Option<String>,
    },

    /// Estimate the cost of an exchange
    Cost {
        /// Model identifier (provider/model)
        model: String,
        /// Input text
        input: String,
        /// Output text
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("requesty=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)
        .await
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;

    let http = reqwest::Client::new();
    let credentials = config.credentials();
    let catalog = Arc::new(ModelCatalog::new(
        http.clone(),
        config.router.models_url.clone(),
        credentials.clone(),
    ));

    match cli.command {
        Commands::Models => {
            let models = catalog.list_models().await.context("failed to list models")?;
            for model in models {
                println!("{model}");
            }
        }

        Commands::Pricing { model } => {
            catalog
                .list_models()
                .await
                .context("failed to load catalog")?;
            match catalog.get_pricing(&model) {
                Some(pricing) => println!(
                    "{model}: input ${} / output ${} per million tokens",
                    pricing.input, pricing.output
                ),
                None => println!("{model}: unknown"),
            }
        }

        Commands::Chat {
            model,
            prompt,
            system,
        } => {
            let client =
                CompletionClient::new(http, config.router.completions_url.clone(), credentials);

            let mut messages = Vec::new();
            if let Some(system) = system {
                messages.push(Message::system(system));
            }
            messages.push(Message::user(prompt));

            let reply = client.complete(&model, &messages).await?;
            println!("{reply}");

            // Pricing is best effort; a catalog failure leaves the cost at zero.
            if let Err(e) = catalog.list_models().await {
                tracing::warn!(error = %e, "Catalog unavailable, cost will show as zero");
            }
            let input: String = messages
                .iter()
                .map(|m| m.content.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            let cost = CostEstimator::new(catalog).estimate(&input, &reply, &model);
            eprintln!("{}", format_cost(&cost));
        }

        Commands::Cost {
            model,
            input,
            output,
        } => {
            catalog
                .list_models()
                .await
                .context("failed to load catalog")?;
            let estimator = CostEstimator::new(catalog);
            let cost = estimator.estimate(&input, &output, &model);
            println!("{}", format_cost(&cost));
        }
    }

    Ok(())
}

fn format_cost(cost: &CostBreakdown) -> String {
    format!(
        "cost: input ${:.6} + output ${:.6} = ${:.6}",
        cost.input_cost, cost.output_cost, cost.total
    )
}
