//! Twist & Taste CLI - browse the catalog, manage the cart, check out and
//! administer products from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse
//! tt-cli catalog list --category حلويات
//! tt-cli catalog categories
//!
//! # Cart
//! tt-cli cart add 3 -q 2
//! tt-cli cart update 3 -- -1
//! tt-cli cart show
//! tt-cli cart clear --yes
//!
//! # Checkout
//! tt-cli checkout --name "Mariam" --phone 55512345 --address "Doha, West Bay"
//!
//! # Contact the store on WhatsApp
//! tt-cli contact --with-cart
//!
//! # Admin (passphrase from --passphrase or TT_ADMIN_KEY)
//! tt-cli admin add --name "Date Cake" --price 18 --image-file cake.jpg
//! tt-cli admin delete 1700000000000 --yes
//! tt-cli admin reset --yes
//! ```
//!
//! # Commands
//!
//! - `catalog` - List products and categories
//! - `cart` - Show and change the cart
//! - `checkout` - Place an order for the cart
//! - `contact` - Print a WhatsApp link to the store
//! - `admin` - Add, edit, delete and reset catalog products

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use secrecy::SecretString;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use twist_taste_core::{Confirmation, ProductId};
use twist_taste_storefront::{Storefront, StorefrontConfig};

mod commands;

#[derive(Parser)]
#[command(name = "tt-cli")]
#[command(author, version, about = "Twist & Taste storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order for everything in the cart
    Checkout {
        /// Customer name
        #[arg(long)]
        name: String,

        /// Customer phone number
        #[arg(long)]
        phone: String,

        /// Delivery address
        #[arg(long)]
        address: String,

        /// Order notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Print a WhatsApp link to the store
    Contact {
        /// Prefill the message with the cart contents
        #[arg(long)]
        with_cart: bool,
    },
    /// Administer catalog products
    Admin {
        /// Admin passphrase
        #[arg(long, env = "TT_ADMIN_KEY", hide_env_values = true)]
        passphrase: String,

        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products, optionally in one category
    List {
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List categories
    Categories,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart and its total
    Show,
    /// Add a product to the cart
    Add {
        /// Product id
        id: ProductId,

        /// Number of units
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: ProductId,
    },
    /// Change a product's quantity by a signed amount
    Update {
        /// Product id
        id: ProductId,

        /// Amount to add (negative to subtract)
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// Empty the cart
    Clear {
        /// Confirm emptying the cart
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
struct ProductArgs {
    /// Product name
    #[arg(long)]
    name: Option<String>,

    /// Unit price
    #[arg(long, allow_hyphen_values = true)]
    price: Option<String>,

    /// Description
    #[arg(long)]
    description: Option<String>,

    /// Category
    #[arg(long)]
    category: Option<String>,

    /// Image link
    #[arg(long, conflicts_with = "image_file")]
    image: Option<String>,

    /// Image file to embed in the catalog
    #[arg(long)]
    image_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Add a new product
    Add {
        #[command(flatten)]
        product: ProductArgs,
    },
    /// Edit an existing product; omitted fields keep their value
    Edit {
        /// Product id
        id: ProductId,

        #[command(flatten)]
        product: ProductArgs,
    },
    /// Delete a product
    Delete {
        /// Product id
        id: ProductId,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Restore the default catalog, removing every custom product
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "twist_taste=info,tt_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().without_time().with_target(false))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = StorefrontConfig::from_env();

    // Sentry must be initialized before the tracing subscriber
    let sentry_guard = config.as_ref().ok().and_then(init_sentry);
    init_tracing();

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut storefront = Storefront::open(config)?;

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List { category } => {
                commands::catalog::list(&storefront, category.as_deref());
            }
            CatalogAction::Categories => commands::catalog::categories(&storefront),
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&storefront),
            CartAction::Add { id, quantity } => commands::cart::add(&mut storefront, id, quantity)?,
            CartAction::Remove { id } => commands::cart::remove(&mut storefront, id),
            CartAction::Update { id, delta } => commands::cart::update(&mut storefront, id, delta),
            CartAction::Clear { yes } => {
                commands::cart::clear(&mut storefront, Confirmation::from_flag(yes));
            }
        },
        Commands::Checkout {
            name,
            phone,
            address,
            notes,
        } => {
            let details = twist_taste_core::OrderDetails {
                name,
                phone,
                address,
                notes,
            };
            commands::checkout::run(&mut storefront, details).await?;
        }
        Commands::Contact { with_cart } => commands::contact::link(&storefront, with_cart)?,
        Commands::Admin { passphrase, action } => {
            let session = commands::admin::unlock(&SecretString::from(passphrase))?;
            let mut console = session.console(storefront.catalog_mut())?;
            match action {
                AdminAction::Add { product } => {
                    commands::admin::add(&mut console, product.into_edit())?;
                }
                AdminAction::Edit { id, product } => {
                    commands::admin::edit(&mut console, id, product.into_edit())?;
                }
                AdminAction::Delete { id, yes } => {
                    commands::admin::delete(&mut console, id, Confirmation::from_flag(yes))?;
                }
                AdminAction::Reset { yes } => {
                    commands::admin::reset(&mut console, Confirmation::from_flag(yes));
                }
            }
        }
    }
    Ok(())
}

impl ProductArgs {
    fn into_edit(self) -> commands::admin::ProductEdit {
        commands::admin::ProductEdit {
            name: self.name,
            price: self.price,
            description: self.description,
            category: self.category,
            image: self.image,
            image_file: self.image_file,
        }
    }
}
