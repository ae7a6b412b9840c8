//! Plan a catalog goal and print the plan with a summary of the search.
//!
//! ```text
//! cargo run -p craft-htn --example crafting_trace -- [catalog.json] [time] [domain.yaml]
//! ```
//!
//! Defaults to the bundled catalog, a budget of 300 and the bundled domain config. Set
//! `RUST_LOG=debug` to see every expansion.

use std::path::PathBuf;

use anyhow::Context;
use craft_htn::{Catalog, CraftingDomain, DomainConfig, HtnPlannerConfig};
use htn_tools::TraceLog;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
    let mut args = std::env::args().skip(1);
    let catalog_path = args.next().map(PathBuf::from).unwrap_or_else(|| data.join("crafting.json"));
    let time: i64 = match args.next() {
        Some(raw) => raw.parse().with_context(|| format!("invalid time budget `{raw}`"))?,
        None => 300,
    };
    let config_path = args.next().map(PathBuf::from).unwrap_or_else(|| data.join("domain.yaml"));

    let catalog = Catalog::load(&catalog_path)?;
    let config = DomainConfig::load_or_default(&config_path)?;
    let domain: CraftingDomain<&'static str> = CraftingDomain::compile(&catalog, &config)?;

    let verbose = match std::env::var("RUST_LOG").as_deref() {
        Ok("trace") => 3,
        Ok("debug") => 2,
        Ok(_) => 1,
        Err(_) => 0,
    };
    let planner_config = HtnPlannerConfig {
        verbose,
        ..HtnPlannerConfig::default()
    };

    let mut log = TraceLog::default();
    let solution = domain.solve_traced("agent", time, planner_config, &mut log)?;

    println!("plan ({} steps):", solution.plan.len());
    for step in &solution.plan {
        println!("  {step}");
    }
    println!();
    print!("{}", solution.state);
    println!();
    println!(
        "expansions: {}  prunes: {}  refusals: {}  max depth: {}",
        log.count("htn.search.expand"),
        log.count("htn.search.prune"),
        log.count("htn.operator.refused"),
        log.max_depth()
    );
    Ok(())
}
