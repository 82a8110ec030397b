mod cli;
mod config;
mod core;
mod tours;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{AnswerArgs, AssessArgs, BookSubcommand, Cli, Commands, FilterArgs, ToursSubcommand};
use config::{CONFIG_FILE_NAME, Config};
use crate::core::report::{AssessmentRecord, EmergencyContact};
use crate::core::validate::RawAnswers;
use std::path::{Path, PathBuf};
use tours::filter::TourFilter;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Assess(args) => run_assess(args),
        Commands::Init => {
            let path = std::env::current_dir()?.join(CONFIG_FILE_NAME);
            config::write_default_config(&path)?;
            println!("created {}", path.display());
            Ok(0)
        }
        Commands::Tours { command } => match command {
            ToursSubcommand::List(args) => {
                let cfg = load(args.common.config.as_deref())?;
                let catalog = load_catalog(args.filter.catalog.as_deref(), &cfg)?;
                let mut filter = build_filter(&args.filter)?;
                filter.max_difficulty = args.max_difficulty.map(Into::into);
                let matched = filter.apply(&catalog);

                if args.common.json || cfg.general.json {
                    print_json(&summaries(&matched))?;
                } else {
                    tours::report::print_tours("Tours", &matched);
                }
                Ok(0)
            }
            ToursSubcommand::Recommend(args) => {
                let cfg = load(args.common.config.as_deref())?;
                let catalog = load_catalog(args.filter.catalog.as_deref(), &cfg)?;
                let filter = build_filter(&args.filter)?;
                let report = core::run_assessment(&read_raw(&args.answers)?, &cfg)?;
                let picks = tours::filter::recommend(&catalog, &report.result, &filter);

                if args.common.json || cfg.general.json {
                    print_json(&serde_json::json!({
                        "assessment": core::report::JsonReport::from(&report),
                        "tours": summaries(&picks),
                    }))?;
                } else {
                    core::report::print_human(&report);
                    println!();
                    let heading = format!(
                        "Tours up to {} difficulty",
                        report.result.recommended_difficulty
                    );
                    tours::report::print_tours(&heading, &picks);
                }
                Ok(if picks.is_empty() { 1 } else { 0 })
            }
        },
        Commands::Book { command } => match command {
            BookSubcommand::Quote(args) => {
                let cfg = load(args.common.config.as_deref())?;
                let catalog = load_catalog(args.catalog.as_deref(), &cfg)?;
                let tour = catalog
                    .find(&args.tour)
                    .with_context(|| format!("no tour with id or slug `{}`", args.tour))?;
                let quote = tours::booking::quote(tour, args.participants)?;

                if args.common.json || cfg.general.json {
                    print_json(&quote)?;
                } else {
                    tours::report::print_quote(&quote);
                }
                Ok(if quote.bookable { 0 } else { 1 })
            }
        },
    }
}

fn run_assess(args: AssessArgs) -> Result<i32> {
    let mut cfg = load(args.common.config.as_deref())?;
    cfg.general.strict |= args.strict;

    let report = core::run_assessment(&read_raw(&args.answers)?, &cfg)?;

    if let Some(user_id) = args.user_id {
        let contact = EmergencyContact {
            name: args.emergency_name,
            phone: args.emergency_phone,
        };
        let record = AssessmentRecord::new(user_id, contact, &report.input, &report.result);
        print_json(&record)?;
    } else if args.common.json || cfg.general.json {
        print_json(&core::report::JsonReport::from(&report))?;
    } else {
        core::report::print_human(&report);
    }

    if report.exit.ok { Ok(0) } else { Ok(1) }
}

fn load(config_path: Option<&Path>) -> Result<Config> {
    let cwd = std::env::current_dir()?;
    Ok(config::load_config(config_path, &cwd)?.config)
}

fn load_catalog(path: Option<&Path>, cfg: &Config) -> Result<tours::Catalog> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&cfg.catalog.path));
    tours::load_catalog(&resolve_path(&path)?, &cfg.catalog.exclude)
}

fn read_raw(args: &AnswerArgs) -> Result<RawAnswers> {
    match &args.answers {
        Some(path) => core::read_answers(&resolve_path(path)?),
        None => Ok(args.to_raw()),
    }
}

fn build_filter(args: &FilterArgs) -> Result<TourFilter> {
    let price_range = args
        .price
        .as_deref()
        .map(str::parse::<tours::filter::PriceRange>)
        .transpose()
        .context("invalid --price")?;

    Ok(TourFilter {
        search: args.search.clone(),
        destination: args.destination.clone(),
        price_range,
        quality_tier: args.tier.clone(),
        tour_type: args.tour_type.map(Into::into),
        transportation: args.transport.clone(),
        max_difficulty: None,
        featured_only: args.featured,
    })
}

fn summaries(matched: &[&tours::Tour]) -> Vec<tours::report::TourSummary> {
    matched.iter().map(|tour| (*tour).into()).collect()
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn resolve_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
