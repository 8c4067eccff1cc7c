use clap::Parser;
use house_price_engine::app::output;
use house_price_engine::config::{Command, EngineConfig};
use house_price_engine::utils::error::EngineError;
use house_price_engine::utils::logger;
use house_price_engine::{
    CliConfig, InteractionRequest, PredictionRequest, PreferenceSet, PriceEngine,
    UniformPriceSource,
};
use std::io::Write;

fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config) {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        std::process::exit(e.severity().exit_code());
    }
}

fn load_config(cli: &CliConfig) -> Result<EngineConfig, EngineError> {
    match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            EngineConfig::from_file(path)
        }
        None => Ok(EngineConfig::default()),
    }
}

fn run(cli: &CliConfig) -> Result<(), EngineError> {
    let engine_config = load_config(cli)?;
    let source = match cli.seed {
        Some(seed) => {
            tracing::info!("🎲 Using seeded price source ({})", seed);
            UniformPriceSource::seeded(seed)
        }
        None => UniformPriceSource::new(),
    };
    let engine = PriceEngine::new(engine_config, source)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let format = cli.format;

    match &cli.command {
        Command::Regions => output::write_regions(&mut out, engine.catalog(), format)?,
        Command::Estimate {
            region,
            rooms,
            preferences,
            budget,
        } => {
            if let Some(b) = budget {
                engine.check_budget(*b)?;
            }
            let prediction = engine.estimate(region, *rooms, &PreferenceSet::from(preferences))?;
            let verdict = budget.map(|b| (b, engine.evaluate(prediction.price, b)));
            output::write_prediction(&mut out, &prediction, verdict, format)?;
        }
        Command::Compare {
            first,
            second,
            rooms,
        } => {
            let comparison = engine.compare(first, second, *rooms)?;
            output::write_comparison(&mut out, &comparison, format)?;
        }
        Command::Trend { region } => {
            let points: Vec<_> = engine.trend(region)?.collect();
            output::write_trend(&mut out, region, &points, format)?;
        }
        Command::Recommend {
            budget,
            rooms,
            preferences,
            top,
            all,
        } => {
            let list = engine.recommend(*budget, &PreferenceSet::from(preferences), *rooms)?;
            let shown = if *all {
                list.entries()
            } else {
                list.top(top.unwrap_or(engine.config().recommender.top_k))
            };
            output::write_recommendations(&mut out, shown, format)?;
        }
        Command::Report {
            region,
            rooms,
            budget,
            preferences,
            compare_first,
            compare_second,
        } => {
            let first_region = || {
                engine
                    .catalog()
                    .names()
                    .next()
                    .map(str::to_string)
                    .ok_or_else(|| EngineError::ConfigError {
                        message: "the region catalog is empty".to_string(),
                    })
            };
            let request = InteractionRequest {
                prediction: PredictionRequest {
                    region: region.clone().map_or_else(first_region, Ok)?,
                    rooms: *rooms,
                    preferences: PreferenceSet::from(preferences),
                    budget: *budget,
                },
                compare_first: compare_first.clone().map_or_else(first_region, Ok)?,
                compare_second: compare_second.clone().map_or_else(first_region, Ok)?,
            };
            let report = engine.run(&request)?;
            output::write_report(&mut out, &report, format)?;
        }
    }

    out.flush()?;
    tracing::debug!("✅ Command completed");
    Ok(())
}
