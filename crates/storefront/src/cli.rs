//! # Command Line
//!
//! `storefront` subcommands. Each one starts a [`StorefrontSystem`], runs a short
//! session against it and shuts it down again.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::catalog::featured;
use crate::catalog::{CatalogError, ProductRepository};
use crate::config::{ConfigError, ConfigOverrides, LoadOptions, LogFormat, StorefrontConfig};
use crate::history::HistoryError;
use crate::lifecycle::{setup_tracing, StorefrontSystem, SystemError};
use crate::model::{Category, Product, ProductId};
use crate::query::{CatalogView, QueryError, SortMode};

#[derive(Debug, Parser)]
#[command(name = "storefront", version, about = "Browse and search the storefront catalog")]
pub struct Cli {
    /// TOML config file (defaults to ./storefront.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// compact, pretty or json
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    /// Catalog service base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List products, optionally for one category
    Browse {
        #[arg(long)]
        category: Option<Category>,
        /// default, rating or price
        #[arg(long, default_value_t = SortMode::Default)]
        sort: SortMode,
        /// Show at most this many products
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Search titles, categories and descriptions
    Search {
        #[arg(required = true)]
        terms: Vec<String>,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long, default_value_t = SortMode::Default)]
        sort: SortMode,
    },
    /// Show one product
    Product { id: u32 },
    /// List categories
    Categories,
    /// Show past searches
    History {
        #[arg(long)]
        clear: bool,
    },
    /// Top rated, cheapest and highly rated products
    Featured {
        #[arg(long, default_value_t = 6)]
        limit: usize,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    System(#[from] SystemError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error("failed to set up logging: {0}")]
    Tracing(String),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl Cli {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config.clone(),
            require_file: self.config.is_some(),
            overrides: ConfigOverrides {
                catalog_base_url: self.base_url.clone(),
                log_level: self.log_level.clone(),
                log_format: self.log_format,
                ..ConfigOverrides::default()
            },
        }
    }
}

/// Loads configuration, installs logging and runs `cli.command` against the catalog.
pub async fn run(cli: Cli) -> Result<(), CliError> {
    let config = StorefrontConfig::load(cli.load_options())?;
    setup_tracing(&config.logging).map_err(|e| CliError::Tracing(e.to_string()))?;

    let system = StorefrontSystem::start(&config).await?;
    let mut stdout = std::io::stdout().lock();
    let result = execute(&cli.command, &system, &mut stdout).await;
    system.shutdown().await;
    result
}

/// Runs one command, writing human-readable output to `out`.
pub async fn execute<R, W>(
    command: &Command,
    system: &StorefrontSystem<R>,
    out: &mut W,
) -> Result<(), CliError>
where
    R: ProductRepository + Clone,
    W: Write,
{
    match command {
        Command::Browse {
            category,
            sort,
            limit,
        } => {
            let mut engine = system.query_engine();
            engine.open().await?;
            if let Some(category) = category {
                engine.toggle_category(*category).await?;
            }
            engine.set_sort(*sort);
            render_view(&engine.view(), *limit, out)?;
        }
        Command::Search {
            terms,
            category,
            sort,
        } => {
            let mut engine = system.query_engine();
            engine.open().await?;
            if let Some(category) = category {
                engine.toggle_category(*category).await?;
            }
            engine.set_sort(*sort);
            engine.set_query(&terms.join(" ")).await?;
            render_view(&engine.view(), None, out)?;
        }
        Command::Product { id } => {
            let product = system.catalog().get_product(ProductId(*id)).await?;
            render_product(&product, out)?;
        }
        Command::Categories => {
            for category in system.catalog().list_categories().await? {
                writeln!(out, "{}", category.label())?;
            }
        }
        Command::History { clear } => {
            if *clear {
                system.history().clear().await?;
                writeln!(out, "Search history cleared")?;
            } else {
                let entries = system.history().load().await?;
                if entries.is_empty() {
                    writeln!(out, "No recent searches")?;
                }
                for entry in entries {
                    writeln!(out, "{entry}")?;
                }
            }
        }
        Command::Featured { limit } => {
            let products = system.catalog().list_products(None).await?;
            writeln!(out, "Top Rated")?;
            render_rows(&featured::top_rated(&products, *limit), out)?;
            writeln!(out)?;
            writeln!(out, "Lowest Prices")?;
            let cheapest: Vec<&Product> = featured::lowest_priced(&products)
                .into_iter()
                .take(*limit)
                .collect();
            render_rows(&cheapest, out)?;
            writeln!(out)?;
            writeln!(out, "Highly Rated")?;
            let highly_rated: Vec<&Product> = featured::high_rated(&products)
                .into_iter()
                .take(*limit)
                .collect();
            render_rows(&highly_rated, out)?;
        }
    }
    Ok(())
}

fn render_view<W: Write>(
    view: &CatalogView<'_>,
    limit: Option<usize>,
    out: &mut W,
) -> std::io::Result<()> {
    writeln!(out, "{}", view.heading)?;
    if view.is_empty() {
        return writeln!(out, "{}", view.empty_message);
    }
    let shown = limit.unwrap_or(view.products.len());
    let rows: Vec<&Product> = view.products.iter().take(shown).copied().collect();
    render_rows(&rows, out)
}

fn render_rows<W: Write>(products: &[&Product], out: &mut W) -> std::io::Result<()> {
    for product in products {
        writeln!(
            out,
            "{:>4}  {:<50}  ${:>8.2}  {:.1} ({})",
            product.id.0,
            product.title,
            product.price,
            product.rating.rate,
            product.rating.count
        )?;
    }
    Ok(())
}

fn render_product<W: Write>(product: &Product, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{}", product.title)?;
    writeln!(out, "Category: {}", product.category.label())?;
    writeln!(out, "Price:    ${:.2}", product.price)?;
    writeln!(
        out,
        "Rating:   {:.1} ({} reviews)",
        product.rating.rate, product.rating.count
    )?;
    writeln!(out, "Image:    {}", product.image)?;
    writeln!(out)?;
    writeln!(out, "{}", product.description)
}
