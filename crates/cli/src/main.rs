//! OwnShop CLI - Catalog inspection and text-generation tools.
//!
//! # Usage
//!
//! ```bash
//! # Print the seed catalog
//! ownshop catalog --category electronics
//!
//! # Category and locale tables
//! ownshop categories
//! ownshop locales
//!
//! # Simulate a customer cart
//! ownshop cart --email shopper@example.com 1:2 3
//!
//! # Text generation (needs GENAI_API_KEY)
//! ownshop describe "Smart Watch" --keywords "fitness, waterproof"
//! ownshop summarize headphones
//! ownshop recommend --viewed 1 --viewed 3 -n 3
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

use commands::cart::Line;
use commands::catalog::ListOptions;

#[derive(Parser)]
#[command(name = "ownshop")]
#[command(author, version, about = "OwnShop CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the seed catalog
    Catalog {
        /// Category name or slug
        #[arg(short, long)]
        category: Option<String>,

        /// Only discounted products
        #[arg(long)]
        deals: bool,

        /// Free-text search
        #[arg(short, long)]
        search: Option<String>,

        /// Include unpublished products
        #[arg(long)]
        all: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the category table
    Categories {
        #[arg(long)]
        json: bool,
    },
    /// Print supported languages and countries
    Locales {
        #[arg(long)]
        json: bool,
    },
    /// Simulate a customer cart against the seed catalog
    Cart {
        /// Customer email
        #[arg(short, long, default_value = "shopper@example.com")]
        email: String,

        /// Lines as ID or ID:QTY
        #[arg(required = true)]
        lines: Vec<Line>,
    },
    /// Generate a product description
    Describe {
        /// Product title
        title: String,

        /// Comma-separated keywords
        #[arg(short, long, default_value = "")]
        keywords: String,
    },
    /// Summarize search results for a query
    Summarize {
        /// Search query
        query: String,
    },
    /// Recommend products
    Recommend {
        /// Viewed product id (repeatable)
        #[arg(long)]
        viewed: Vec<String>,

        /// Product id in the cart (repeatable)
        #[arg(long)]
        cart: Vec<String>,

        /// Number of recommendations
        #[arg(short = 'n', long)]
        count: Option<u32>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ownshop_cli=info,ownshop_storefront=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Catalog {
            category,
            deals,
            search,
            all,
            json,
        } => commands::catalog::list(&ListOptions {
            category,
            deals,
            search,
            all,
            json,
        })?,
        Commands::Categories { json } => commands::catalog::categories(json)?,
        Commands::Locales { json } => commands::catalog::locales(json)?,
        Commands::Cart { email, lines } => commands::cart::simulate(&email, &lines).await?,
        Commands::Describe { title, keywords } => {
            commands::genai::describe(title, keywords).await?;
        }
        Commands::Summarize { query } => commands::genai::summarize(query).await?,
        Commands::Recommend {
            viewed,
            cart,
            count,
        } => commands::genai::recommend(viewed, cart, count).await?,
    }
    Ok(())
}
