use analytics::{AnalyticsEngine, EngineOptions};
use anyhow::Context;
use api_client::{MicroburbsClient, PropertySource};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use configuration::{Config, OutputFormat};
use core_types::{PropertyRecord, PropertyType};
use explorer::{Dashboard, PropertyFilter};
use finance::{AffordabilityParams, CashFlowParams};
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::{Path, PathBuf};
use web_server::requests::{MortgageRequest, RoiRequest};

mod render;

/// The main entry point for the Suburb Scout application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The bearer token usually lives in .env.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = configuration::load_config(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(format) = cli.format {
        config.output.format = format;
    }
    let _guard = configuration::init_tracing(&config.logging)?;

    match cli.command {
        Commands::Serve => web_server::run_server(config).await,
        Commands::Analyze(args) => handle_analyze(args, &config).await,
        Commands::Mortgage(args) => handle_mortgage(args, &config),
        Commands::Roi(args) => handle_roi(args, &config),
        Commands::CashFlow(args) => handle_cash_flow(args, &config),
        Commands::Afford(args) => handle_afford(args, &config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Suburb property analytics and investment calculators.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Output format; overrides `output.format` from the configuration.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP proxy and analytics server.
    Serve,
    /// Analyse the listings of a suburb or of a saved payload.
    Analyze(AnalyzeArgs),
    /// Monthly repayments of a home loan.
    Mortgage(MortgageArgs),
    /// Optimistic, realistic and conservative return projections.
    Roi(RoiArgs),
    /// Annual rental cash flow.
    CashFlow(CashFlowArgs),
    /// Borrowing capacity against a target price.
    Afford(AffordArgs),
}

#[derive(Args)]
struct AnalyzeArgs {
    /// A JSON listings payload saved from the upstream API.
    #[arg(long, conflicts_with = "suburb", required_unless_present = "suburb")]
    file: Option<PathBuf>,

    /// Fetch the listings of this suburb from the upstream API.
    #[arg(long)]
    suburb: Option<String>,

    /// How many top picks to show; overrides `analysis.top_picks`.
    #[arg(long)]
    top: Option<usize>,

    #[arg(long)]
    min_price: Option<Decimal>,

    #[arg(long)]
    max_price: Option<Decimal>,

    #[arg(long)]
    min_beds: Option<f64>,

    #[arg(long)]
    min_baths: Option<f64>,

    /// Only include these property types (repeatable).
    #[arg(long = "type")]
    types: Vec<String>,

    /// Skip listings without an asking price.
    #[arg(long)]
    priced_only: bool,

    /// Also print the month-by-month listing timeline.
    #[arg(long)]
    timeline: bool,
}

impl AnalyzeArgs {
    fn filter(&self) -> PropertyFilter {
        PropertyFilter {
            min_price: self.min_price,
            max_price: self.max_price,
            min_bedrooms: self.min_beds,
            min_bathrooms: self.min_baths,
            property_types: self.types.iter().map(|t| PropertyType::from_label(t)).collect(),
            priced_only: self.priced_only,
        }
    }
}

#[derive(Args)]
struct MortgageArgs {
    #[arg(long)]
    price: Decimal,
    /// Defaults to `finance.deposit_pct` of the price.
    #[arg(long)]
    deposit: Option<Decimal>,
    /// Annual interest rate in percent.
    #[arg(long)]
    rate: Option<Decimal>,
    #[arg(long)]
    years: Option<u32>,
}

#[derive(Args)]
struct RoiArgs {
    #[arg(long)]
    price: Decimal,
    /// Annual capital growth in percent.
    #[arg(long)]
    appreciation: Option<Decimal>,
    /// Gross rental yield in percent.
    #[arg(long = "yield")]
    rental_yield: Option<Decimal>,
    #[arg(long)]
    years: Option<u32>,
    /// Report the gross yield this weekly rent gives on the price.
    #[arg(long)]
    weekly_rent: Option<Decimal>,
}

#[derive(Args)]
struct CashFlowArgs {
    #[arg(long)]
    weekly_rent: Decimal,
    #[arg(long, default_value_t = Decimal::ZERO)]
    mortgage: Decimal,
    #[arg(long, default_value_t = Decimal::ZERO)]
    council_rates: Decimal,
    #[arg(long, default_value_t = Decimal::ZERO)]
    strata: Decimal,
    #[arg(long, default_value_t = Decimal::ZERO)]
    insurance: Decimal,
    #[arg(long, default_value_t = Decimal::ZERO)]
    maintenance: Decimal,
    /// Management fee in percent of the rent.
    #[arg(long, default_value_t = Decimal::ZERO)]
    management_fee: Decimal,
}

#[derive(Args)]
struct AffordArgs {
    /// Gross annual household income.
    #[arg(long)]
    income: Decimal,
    #[arg(long, default_value_t = Decimal::ZERO)]
    debts: Decimal,
    #[arg(long, default_value_t = Decimal::ZERO)]
    expenses: Decimal,
    #[arg(long)]
    deposit: Decimal,
    #[arg(long)]
    price: Decimal,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn emit<T: Serialize>(
    config: &Config,
    value: &T,
    table: impl FnOnce() -> String,
) -> anyhow::Result<()> {
    match config.output.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Table => println!("{}", table()),
    }
    Ok(())
}

fn read_payload(path: &Path) -> anyhow::Result<Vec<PropertyRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let value = serde_json::from_str(&api_client::sanitize_body(&raw))
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    Ok(core_types::parse_payload(value)?)
}

async fn handle_analyze(args: AnalyzeArgs, config: &Config) -> anyhow::Result<()> {
    let (label, records) = match (&args.file, &args.suburb) {
        (Some(path), _) => (path.display().to_string(), read_payload(path)?),
        (None, Some(suburb)) => {
            let client = MicroburbsClient::new(&config.upstream)?;
            (suburb.clone(), client.fetch_properties(suburb).await?)
        }
        (None, None) => anyhow::bail!("either --file or --suburb is required"),
    };
    tracing::info!(source = %label, listings = records.len(), "Listings loaded.");

    let engine = AnalyticsEngine::new(EngineOptions {
        top_picks: args.top.unwrap_or(config.analysis.top_picks),
        outlier_selection: config.analysis.outlier_selection,
    });
    let now = Utc::now();
    let mut dashboard = Dashboard::new(engine, now);
    dashboard.load(records, now);
    dashboard.set_filter(args.filter())?;

    emit(config, dashboard.report(), || {
        let mut out = render::market_report(&label, &dashboard);
        if args.timeline {
            let timeline = dashboard.timeline();
            out.push('\n');
            out.push_str(&render::timeline(
                timeline.frames(),
                dashboard.records(),
                timeline.undated(),
            ));
        }
        out
    })
}

fn handle_mortgage(args: MortgageArgs, config: &Config) -> anyhow::Result<()> {
    let request = MortgageRequest {
        price: args.price,
        deposit: args.deposit,
        annual_rate_pct: args.rate,
        term_years: args.years,
    };
    let repayment = finance::mortgage_repayment(&request.resolve(&config.finance)?)?;
    emit(config, &repayment, || render::mortgage(&repayment))
}

fn handle_roi(args: RoiArgs, config: &Config) -> anyhow::Result<()> {
    let request = RoiRequest {
        price: args.price,
        annual_appreciation_pct: args.appreciation,
        rental_yield_pct: args.rental_yield,
        years: args.years,
        weekly_rent: args.weekly_rent,
    };
    let scenarios = finance::project_roi(&request.resolve(&config.finance))?;
    let gross_yield = args
        .weekly_rent
        .map(|rent| finance::gross_rental_yield(rent, args.price))
        .transpose()?;
    emit(config, &scenarios, || render::roi(&scenarios, gross_yield))
}

fn handle_cash_flow(args: CashFlowArgs, config: &Config) -> anyhow::Result<()> {
    let summary = finance::cash_flow(&CashFlowParams {
        weekly_rent: args.weekly_rent,
        monthly_mortgage_payment: args.mortgage,
        annual_council_rates: args.council_rates,
        quarterly_strata_fees: args.strata,
        annual_insurance: args.insurance,
        annual_maintenance: args.maintenance,
        management_fee_pct: args.management_fee,
    })?;
    emit(config, &summary, || render::cash_flow(&summary))
}

fn handle_afford(args: AffordArgs, config: &Config) -> anyhow::Result<()> {
    let assessment = finance::assess_affordability(&AffordabilityParams {
        annual_household_income: args.income,
        monthly_debts: args.debts,
        monthly_expenses: args.expenses,
        available_deposit: args.deposit,
        target_price: args.price,
    })?;
    emit(config, &assessment, || render::affordability(&assessment))
}
