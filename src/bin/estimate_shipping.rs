//! Runs one estimate hook against a cart read from JSON and prints the
//! resulting cart.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use estimated_shipping::application::use_cases::ShippingEstimator;
use estimated_shipping::domain::entities::{CandidateMethod, Cart, Customer};
use estimated_shipping::infrastructure::carriers::{RecordingMethodManagement, StaticQuoteProvider};
use estimated_shipping::infrastructure::config::EstimateSettings;
use estimated_shipping::infrastructure::persistence::InMemoryCustomerRepository;
use estimated_shipping::infrastructure::telemetry::{LogFormat, init_tracing};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Hook {
    /// Full selection, as when the checkout configuration is built
    Config,
    /// Cheapest-rate preselection, as before totals are collected
    Totals,
}

#[derive(Debug, Parser)]
#[command(name = "estimate-shipping")]
#[command(about = "Pre-selects a shipping method for a cart")]
#[command(
    after_help = "Settings are read from --config and ESTIMATED_SHIPPING__* variables, \
                  e.g. ESTIMATED_SHIPPING__DEFAULT__ENABLE=true"
)]
struct Args {
    /// Cart JSON file
    #[arg(long)]
    cart: PathBuf,

    /// Rates JSON file, an array of candidate methods
    #[arg(long)]
    rates: PathBuf,

    /// Customers JSON file, an array of customers with their addresses
    #[arg(long)]
    customers: Option<PathBuf>,

    /// Settings TOML file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Hook to run
    #[arg(long, value_enum, default_value = "config")]
    hook: Hook,

    /// Emit JSON log lines
    #[arg(long)]
    json_logs: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let format = if args.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    init_tracing(format, args.verbose).context("installing log subscriber")?;

    let settings = EstimateSettings::load(args.config.as_deref()).context("loading settings")?;
    let mut cart: Cart = read_json(&args.cart)?;
    let rates: Vec<CandidateMethod> = read_json(&args.rates)?;

    let customers = InMemoryCustomerRepository::new();
    if let Some(path) = &args.customers {
        let list: Vec<Customer> = read_json(path)?;
        for customer in list {
            customers.save(customer);
        }
    }

    let estimator = ShippingEstimator::new(
        Arc::new(settings),
        Arc::new(customers),
        Arc::new(StaticQuoteProvider::new(rates)),
        Arc::new(RecordingMethodManagement::new()),
    );

    let outcome = match args.hook {
        Hook::Config => estimator.before_get_config(&mut cart)?,
        Hook::Totals => estimator.before_collect_totals(&mut cart)?,
    };
    tracing::info!(%outcome, "estimate finished");

    println!("{}", serde_json::to_string_pretty(&cart)?);
    Ok(())
}
