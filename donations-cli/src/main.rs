//! Donations CLI
//!
//! Command-line interface for the donations API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use donations_client::{DonationsClient, generate_payment_reference};
use donations_types::{AmountInput, InitializePaymentRequest};

#[derive(Parser)]
#[command(name = "donations")]
#[command(author, version, about = "Donations API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the donations API
    #[arg(
        long,
        env = "DONATIONS_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    /// Site origin sent as the `Origin` header (decides the checkout redirect)
    #[arg(long, env = "DONATIONS_ORIGIN")]
    origin: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a hosted checkout for a donation
    Donate {
        /// Amount in naira, e.g. 5000 or 2500.50
        #[arg(long)]
        amount: String,
        /// Donor's full name
        #[arg(long)]
        name: String,
        /// Donor's email address
        #[arg(long)]
        email: String,
        /// Payment reference; generated when omitted
        #[arg(long)]
        reference: Option<String>,
        /// Description shown on the checkout page
        #[arg(long)]
        description: Option<String>,
    },
    /// Print a fresh payment reference
    Reference,
    /// Check API health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut client = DonationsClient::new(&cli.api_url);
    if let Some(origin) = cli.origin {
        client = client.with_origin(origin);
    }

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Reference => {
            println!("{}", generate_payment_reference());
        }

        Commands::Donate {
            amount,
            name,
            email,
            reference,
            description,
        } => {
            let req = InitializePaymentRequest {
                amount: Some(AmountInput::from(amount.as_str())),
                customer_name: name,
                customer_email: email,
                payment_reference: reference.unwrap_or_else(generate_payment_reference),
                payment_description: description,
            };
            let checkout = client.initialize_payment(&req).await?;
            println!("{}", serde_json::to_string_pretty(&checkout)?);
        }
    }

    Ok(())
}
