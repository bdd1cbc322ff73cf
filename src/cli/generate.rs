use crate::config::{Config, OutputConfig};
use crate::error::AppError;
use crate::export::{write_plan_csv, write_plan_json, write_shopping_csv};
use crate::import::load_catalog;
use crate::report::write_report;
use chrono::NaiveDate;
use clap::Args;
use dinnerplan_mealplan::{GenerationRequest, generate_plan};
use dinnerplan_shopping::IngredientAggregationService;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Args, Debug, Default, Clone)]
pub struct GenerateArgs {
    /// Dish catalog CSV (Dish Name, Category, Ingredients)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Number of days to plan
    #[arg(short, long)]
    pub days: Option<u32>,

    /// First planned date, YYYY-MM-DD (default: today)
    #[arg(long, value_parser = parse_date)]
    pub start_date: Option<NaiveDate>,

    /// Seed for a reproducible plan (default: derived from the clock)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Non-serving date, YYYY-MM-DD (repeatable)
    #[arg(long = "holiday", value_parser = parse_date)]
    pub holidays: Vec<NaiveDate>,

    /// Meal plan CSV output
    #[arg(short = 'o', long)]
    pub output_plan: Option<PathBuf>,

    /// Shopping list CSV output
    #[arg(short = 's', long)]
    pub output_shop: Option<PathBuf>,

    /// HTML report output
    #[arg(short = 'w', long)]
    pub output_html: Option<PathBuf>,

    /// Full plan as JSON
    #[arg(long)]
    pub output_json: Option<PathBuf>,
}

pub fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDate(value.to_string()))
}

/// Everything a generate run needs once flags and configuration are merged.
#[derive(Debug, Clone)]
pub struct GenerateSettings {
    pub input: PathBuf,
    pub request: GenerationRequest,
    pub output: OutputConfig,
    /// Whether the seed came from the clock rather than the user.
    pub derived_seed: bool,
}

/// Merge flags over configuration; flags win. The merged horizon and input
/// path are validated here rather than in the raw configuration.
pub fn resolve_settings(
    config: &Config,
    args: GenerateArgs,
    today: NaiveDate,
    clock_seed: u64,
) -> Result<GenerateSettings, AppError> {
    let planner = &config.planner;

    let start_date = args.start_date.or(planner.start_date).unwrap_or(today);
    let days = args.days.unwrap_or(planner.days);
    let explicit_seed = args.seed.or(planner.seed);

    let request = GenerationRequest::new(start_date, days, explicit_seed.unwrap_or(clock_seed))
        .with_holidays(planner.holidays.iter().copied().chain(args.holidays));
    request.last_date()?;

    let input = args.input.unwrap_or_else(|| planner.input.clone());
    if input.as_os_str().is_empty() {
        return Err(AppError::ValidationError(
            "Catalog input path must not be empty".to_string(),
        ));
    }

    let output = OutputConfig {
        plan: args.output_plan.unwrap_or_else(|| config.output.plan.clone()),
        shop: args.output_shop.unwrap_or_else(|| config.output.shop.clone()),
        html: args.output_html.unwrap_or_else(|| config.output.html.clone()),
        json: args.output_json.or_else(|| config.output.json.clone()),
    };

    Ok(GenerateSettings {
        input,
        request,
        output,
        derived_seed: explicit_seed.is_none(),
    })
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

#[tracing::instrument(skip(config))]
pub fn generate(config: Config, args: GenerateArgs) -> anyhow::Result<()> {
    let today = chrono::Local::now().date_naive();
    let settings = resolve_settings(&config, args, today, clock_seed())?;
    let request = &settings.request;

    if settings.derived_seed {
        tracing::info!(
            seed = request.seed,
            "No seed given, derived one from the clock; pass --seed {} to reproduce",
            request.seed
        );
    }

    let catalog = load_catalog(&settings.input)?;
    if catalog.is_empty() {
        return Err(AppError::EmptyCatalog(settings.input).into());
    }

    tracing::info!(
        start = %request.start_date,
        days = request.total_days,
        holidays = request.holidays.len(),
        "Generating meal plan"
    );

    let plan = generate_plan(&catalog, request)?;
    let lists = IngredientAggregationService::aggregate_by_week(&plan);

    let output = &settings.output;
    write_plan_csv(&plan, &output.plan)?;
    write_shopping_csv(&lists, &output.shop)?;
    write_report(&plan, &lists, &output.html)?;
    if let Some(json) = &output.json {
        write_plan_json(&plan, json)?;
    }

    println!(
        "Planned {} dinners over {} days (seed {})",
        plan.serving_days().count(),
        plan.total_days,
        plan.seed
    );
    println!(" - Plan: {}", output.plan.display());
    println!(" - Shopping list: {}", output.shop.display());
    println!(" - Report: {}", output.html.display());
    if let Some(json) = &output.json {
        println!(" - JSON: {}", json.display());
    }

    Ok(())
}
