mod analysis;
mod chart;
mod config;
mod consts;
mod events;
mod logging;
mod pretty;
mod session;
mod store;
mod ui;
mod upload;
mod widgets;
mod workers;

use crate::config::{Config, get_config_path};
use crate::logging::get_rust_log_level;
use crate::pretty::{print_cmd_error, print_cmd_info};
use crate::session::store_mode::{
    parse_cart_item, run_categories, run_product, run_products, run_quote, run_search,
};
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use crate::store::{MockCatalog, ProductFilters, SortBy};
use crate::upload::FileFormat;
use crate::upload::template::{default_file_name, write_template};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Terminal analytics dashboard with drag-to-reorder chart widgets
struct Args {
    /// Path to the config file (defaults to ~/.chartdeck/config.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Command to execute (defaults to `dashboard`)
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive dashboard
    Dashboard {
        /// CSV or JSON file to analyze
        #[arg(long, value_name = "FILE")]
        data: Option<PathBuf>,

        /// Disable background colors
        #[arg(long, action = clap::ArgAction::SetTrue)]
        no_background_color: bool,
    },
    /// Load a CSV or JSON file and print insights and an analysis report
    Analyze {
        /// File to analyze
        file: PathBuf,
    },
    /// Write the effective configuration to the config file, filling in defaults
    InitConfig,
    /// Write a sample data file
    Template {
        /// csv or json
        #[arg(long, default_value = "csv")]
        format: FileFormat,

        /// Destination (defaults to sample-template.<format>)
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// List catalog products
    Products {
        #[arg(long)]
        category: Option<String>,

        #[arg(long, value_name = "PRICE")]
        min_price: Option<f64>,

        #[arg(long, value_name = "PRICE")]
        max_price: Option<f64>,

        /// Minimum rating
        #[arg(long)]
        rating: Option<f64>,

        /// Only products with stock left
        #[arg(long, action = clap::ArgAction::SetTrue)]
        in_stock: bool,

        /// Keep products with any of these tags
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// relevance, price_asc, price_desc, rating or newest
        #[arg(long, default_value = "relevance")]
        sort: SortBy,
    },
    /// List product categories
    Categories,
    /// Show one product
    Product {
        id: String,
    },
    /// Search products by name, description and tags
    Search {
        query: String,
    },
    /// Price a cart
    Quote {
        /// Cart line as ID:QTY; repeatable
        #[arg(long = "item", value_name = "ID:QTY", value_parser = parse_cart_item, required = true)]
        items: Vec<(String, u32)>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    log::set_max_level(get_rust_log_level().into());

    let config_path = match args.config {
        Some(path) => path,
        None => get_config_path()?,
    };
    let config = match Config::load_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            print_cmd_error!(
                "Failed to load config",
                "{}: {}",
                config_path.display(),
                e
            );
            return Err(e.into());
        }
    };

    let command = args.command.unwrap_or(Command::Dashboard {
        data: None,
        no_background_color: false,
    });
    match command {
        Command::Dashboard {
            data,
            no_background_color,
        } => {
            let mut config = config;
            if no_background_color {
                config.with_background_color = false;
            }
            let session = setup_session(config);
            run_tui_mode(session, data.as_deref()).await
        }
        Command::Analyze { file } => {
            let session = setup_session(config);
            run_headless_mode(session, &file).await
        }
        Command::InitConfig => {
            config.save(&config_path)?;
            print_cmd_info!("Config written", "{}", config_path.display());
            Ok(())
        }
        Command::Template { format, output } => {
            let path = output.unwrap_or_else(|| default_file_name(format));
            write_template(format, &path)?;
            print_cmd_info!("Template written", "{}", path.display());
            Ok(())
        }
        Command::Products {
            category,
            min_price,
            max_price,
            rating,
            in_stock,
            tags,
            sort,
        } => {
            let filters = ProductFilters {
                category,
                min_price,
                max_price,
                rating,
                in_stock,
                tags,
                sort_by: sort,
            };
            run_products(&MockCatalog::default(), filters).await
        }
        Command::Categories => run_categories(&MockCatalog::default()).await,
        Command::Product { id } => run_product(&MockCatalog::default(), &id).await,
        Command::Search { query } => run_search(&MockCatalog::default(), &query).await,
        Command::Quote { items } => run_quote(&MockCatalog::default(), &items).await,
    }
}
