mod cli;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use supply_relief::io::{generator, loader, reporting};
use supply_relief::model::{EntityKind, NetworkModel};
use supply_relief::resolution::detector;
use supply_relief::resolution::engine::ResolutionEngine;

use crate::cli::NetworkSource;

fn main() -> Result<()> {
    init_tracing();

    // 1. SETUP CONFIGURATION
    let args = cli::parse_args()?;

    // 2. LOAD THE NETWORK
    let entities = match &args.source {
        NetworkSource::Csv {
            hospitals,
            suppliers,
        } => {
            let mut entities = loader::load_entities_from_path(hospitals, EntityKind::Hospital)?;
            entities.extend(loader::load_entities_from_path(
                suppliers,
                EntityKind::Supplier,
            )?);
            entities
        }
        NetworkSource::Generated(spec) => generator::generate_network(spec)?,
    };
    let mut network = NetworkModel::new(entities).context("invalid supply network")?;

    // 3. SHOW THE PROBLEMS
    println!("=== Problems ===");
    let shortages = detector::detect(network.entities());
    if shortages.is_empty() {
        println!("None.");
    }
    for shortage in &shortages {
        println!(
            "{} needs {} units of {}",
            shortage.entity, shortage.deficit, shortage.product
        );
    }

    let engine = ResolutionEngine::new(&args.resolver);

    // 4. WHAT IF SOME ENTITIES DROP OUT
    if !args.exclude.is_empty() {
        let excluded: Vec<&str> = args.exclude.iter().map(String::as_str).collect();
        let impact = engine
            .assess_exclusion(&network, &excluded)
            .context("exclusion assessment failed")?;
        println!("\n=== Exclusion impact ===");
        for line in impact.summary_lines() {
            println!("{line}");
        }
    }

    // 5. RESOLVE
    let report = engine
        .run(&mut network)
        .with_context(|| format!("{} resolution failed", engine.strategy_name()))?;

    println!("\n=== Solutions ({}) ===", report.strategy);
    for line in report.summary_lines() {
        println!("{line}");
    }
    println!(
        "\nTotal transport effort: {:.2} km·units over {} transfers",
        report.total_weighted_cost(),
        report.allocation.transfers.len()
    );

    // 6. EXPORT RESULTS
    if let Some(dir) = &args.report_dir {
        for path in reporting::write_resolution_report(dir, &report)? {
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
