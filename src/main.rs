//! Fuel Price Dashboard - command line front end.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use fuel_prices::report::{self, OutputFormat};
use fuel_prices::{FuelDashboard, LoadOptions};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "fuel-prices")]
#[command(about = "Yearly fuel price extremes per fuel type", long_about = None)]
struct Args {
    /// Price export to read
    #[arg(long, env = "FUEL_PRICES_DATA", default_value = "CEN0101J.csv")]
    data: PathBuf,

    /// Field separator of the export
    #[arg(long, default_value_t = ',')]
    separator: char,

    /// Fuel type to summarize (defaults to the first one in the file)
    #[arg(long)]
    category: Option<String>,

    /// Print the available fuel types and exit
    #[arg(long)]
    list_categories: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let separator = u8::try_from(args.separator)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| anyhow!("separator must be a single ASCII character"))?;

    let dashboard = FuelDashboard::open(&args.data, &LoadOptions { separator })
        .with_context(|| format!("Failed to load {}", args.data.display()))?;

    if args.list_categories {
        print!("{}", report::render_categories(dashboard.categories())?);
        return Ok(());
    }

    let category = match args.category.as_deref() {
        Some(c) => c,
        None => dashboard
            .default_category()
            .ok_or_else(|| anyhow!("{} holds no rows", args.data.display()))?,
    };
    info!(category, "summarizing");

    let summary = dashboard.summary(category).with_context(|| {
        format!(
            "No data for fuel type '{}' (available: {})",
            category,
            dashboard.categories().join(", ")
        )
    })?;

    match args.format {
        OutputFormat::Text => print!("{}", report::render_text(&summary)?),
        OutputFormat::Json => println!(
            "{}",
            report::render_json(&summary).context("Failed to serialize summary")?
        ),
    }

    Ok(())
}
