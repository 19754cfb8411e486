use std::path::Path;

use anyhow::{Context, Result};
use pay_core::{
    PayError, PayInputs, PaycheckCalculator, RegionCode, Scenario, ScenarioEvaluator, ScenarioResult, TaxTable,
    TaxTableProvider, TaxTableStore, rank_by_annual_delta,
};
use pay_data::TaxTableLoader;
use tracing::{debug, info, warn};

use crate::cli::{Cli, Command, EstimateArgs};
use crate::config::{AppConfig, TablesConfig};
use crate::logging;
use crate::report;

/// Folds command-line overrides into the file configuration.
pub fn apply_overrides(
    config: &mut AppConfig,
    cli: &Cli,
) {
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(path) = &cli.log_file {
        config.logging.file = Some(path.clone());
    }
    if cli.quiet {
        config.logging.stdout = false;
    }
    if let Some(dir) = &cli.tables {
        config.tables.dir = Some(dir.clone());
    }
    if let Some(year) = cli.year {
        config.tables.year = Some(year);
    }
}

fn load_tables(dir: Option<&Path>) -> Result<Vec<TaxTable>> {
    match dir {
        Some(dir) => {
            let tables = TaxTableLoader::load_all(dir)
                .with_context(|| format!("Failed to load tax tables from: {}", dir.display()))?;
            if tables.is_empty() {
                anyhow::bail!("No tax years found in {}", dir.display());
            }
            Ok(tables)
        }
        None => Ok(vec![
            TaxTableLoader::builtin().context("Built-in tax tables are invalid")?,
        ]),
    }
}

/// Builds the table store from the configured directory (or the built-in
/// tables) and selects the requested year, defaulting to the latest.
pub fn build_store(tables: &TablesConfig) -> Result<TaxTableStore> {
    let mut loaded = load_tables(tables.dir.as_deref())?.into_iter();
    let Some(first) = loaded.next() else {
        anyhow::bail!("No tax tables loaded");
    };
    let store = TaxTableStore::new(first);
    for table in loaded {
        store.install(table);
    }

    let years = store.years();
    let year = match tables.year {
        Some(year) => year,
        None => years.last().copied().unwrap_or_else(|| store.current_year()),
    };
    store
        .set_current_year(year)
        .with_context(|| format!("Tax year {year} is not loaded (available: {years:?})"))?;

    info!(year, available = ?years, "tax tables ready");
    Ok(store)
}

/// Turns command-line arguments into engine inputs.
pub fn build_inputs(args: &EstimateArgs) -> Result<PayInputs, PayError> {
    let region_code: RegionCode = args.region.parse()?;
    Ok(PayInputs {
        hourly_rate: args.rate,
        hours_per_week: args.hours,
        region_code,
        retirement_contribution_pct: args.retirement_pct,
        tips_per_hour: args.tips_per_hour,
        include_tips: args.include_tips,
    })
}

/// Runs the estimate command and returns the rendered report.
pub fn run_estimate(
    provider: &dyn TaxTableProvider,
    args: &EstimateArgs,
    catalog: &[Scenario],
) -> Result<String> {
    let table = provider.snapshot();
    let calculator = PaycheckCalculator::new(&table);

    let inputs = build_inputs(args).inspect_err(|e| warn!(error = %e, "rejected inputs"))?;
    let breakdown = calculator
        .calculate(&inputs)
        .inspect_err(|e| warn!(error = %e, "rejected inputs"))?;
    let rule = table.regional_rule(&inputs.region_code)?;

    let mut out = report::render_breakdown(&inputs, rule, table.tax_year(), &breakdown);

    let mut scenarios: Vec<Scenario> = if args.scenarios {
        catalog.to_vec()
    } else {
        Vec::new()
    };
    scenarios.extend(args.what_if.iter().cloned());
    if scenarios.is_empty() {
        return Ok(out);
    }

    if !args.keep_redundant {
        scenarios.retain(|s| {
            let redundant = s.is_redundant_for(&inputs, &table);
            if redundant {
                debug!(scenario = %s.id, "skipping redundant scenario");
            }
            !redundant
        });
    }

    let outcomes = ScenarioEvaluator::new(&table).evaluate(&inputs, &breakdown, &scenarios);
    let mut results: Vec<ScenarioResult> = Vec::with_capacity(outcomes.len());
    let mut failures = Vec::new();
    for (scenario, outcome) in scenarios.iter().zip(outcomes) {
        match outcome {
            Ok(result) => results.push(result),
            Err(err) => failures.push((scenario.label.as_str(), err.source)),
        }
    }

    let shown: Vec<&ScenarioResult> = if args.rank {
        rank_by_annual_delta(&results)
    } else {
        results.iter().collect()
    };

    out.push('\n');
    out.push_str(&report::render_scenarios(&shown));
    for (label, err) in failures {
        out.push_str(&format!("  skipped {label}: {err}\n"));
    }
    Ok(out)
}

pub fn run_regions(provider: &dyn TaxTableProvider) -> String {
    report::render_regions(&provider.snapshot())
}

/// Resolves configuration, loads tables and runs the chosen command.
pub fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::resolve(cli.config.as_deref()).context("Failed to load configuration")?;
    apply_overrides(&mut config, &cli);
    logging::init(&config.logging)?;
    debug!(
        file = ?cli.config,
        tables = ?config.tables,
        scenarios = config.scenarios.len(),
        "configuration resolved"
    );

    let store = build_store(&config.tables)?;

    let output = match &cli.command {
        Command::Estimate(args) => {
            let catalog = config.scenario_catalog()?;
            run_estimate(&store, args, &catalog)?
        }
        Command::Regions => run_regions(&store),
    };
    print!("{output}");
    Ok(())
}
