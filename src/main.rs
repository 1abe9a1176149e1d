//! atom-transfer - Wallet-backed ATOM transfer workflow for Cosmos Hub
//!
//! CLI front-end for the read-only pieces of the workflow: balance
//! queries, address validation, and configuration inspection. Transfer
//! submission requires a wallet extension host and is exercised through
//! the library API.

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use atom_transfer::address::is_valid_address;
use atom_transfer::{ChainConfig, LcdClient};

/// atom-transfer: ATOM balances and transfers on Cosmos Hub
#[derive(Parser)]
#[command(name = "atom-transfer")]
#[command(about = "Query balances and validate addresses on Cosmos Hub", long_about = None)]
struct Cli {
    /// Override the LCD endpoint
    #[arg(long, global = true)]
    lcd_url: Option<String>,

    /// Override the RPC endpoint
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Override the explorer base URL
    #[arg(long, global = true)]
    explorer_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the ATOM balance of an address
    Balance {
        /// Account address (cosmos1...)
        #[arg(value_name = "ADDRESS")]
        address: String,
    },

    /// Check whether an address is well-formed
    Validate {
        /// Candidate address
        #[arg(value_name = "ADDRESS")]
        address: String,
    },

    /// Print the active chain configuration
    Config,
}

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    let cli = Cli::parse();

    let mut config = ChainConfig::cosmos_hub();
    if let Some(url) = &cli.lcd_url {
        config = config.with_lcd_url(url);
    }
    if let Some(url) = &cli.rpc_url {
        config = config.with_rpc_url(url);
    }
    if let Some(url) = &cli.explorer_url {
        config = config.with_explorer_url(url);
    }

    match cli.command {
        Commands::Balance { address } => {
            if !is_valid_address(&address, &config.address_prefix) {
                eprintln!("Invalid {} address: {}", config.address_prefix, address);
                std::process::exit(1);
            }

            let client = match LcdClient::new(&config) {
                Ok(client) => client,
                Err(err) => {
                    eprintln!("{}", err);
                    std::process::exit(1);
                }
            };

            match client.balance_of(&address).await {
                Ok(balance) => {
                    println!("{} {}", balance.display_amount, config.display_denom);
                }
                Err(err) => {
                    eprintln!("{}", err);
                    std::process::exit(1);
                }
            }
        }

        Commands::Validate { address } => {
            if is_valid_address(&address, &config.address_prefix) {
                println!("valid");
            } else {
                println!("invalid");
                std::process::exit(1);
            }
        }

        Commands::Config => {
            let rendered =
                serde_json::to_string_pretty(&config).expect("config always serializes");
            println!("{}", rendered);
        }
    }
}
