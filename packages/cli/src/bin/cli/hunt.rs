// ABOUTME: Predictive hunter command for the terminal
// ABOUTME: Ranks the seed farm list and prints the lead table with the top targets

use bionic_cli::output::{lead_table, targets_block};
use bionic_cli::Runtime;
use bionic_workflows::{PropensityRanker, SeedLeadProvider};
use colored::*;
use std::sync::Arc;

pub async fn run_hunt(runtime: &Runtime) -> Result<(), Box<dyn std::error::Error>> {
    let mut ranker = PropensityRanker::load(Arc::new(SeedLeadProvider::new())).await?;

    println!(
        "{} {} leads with {}",
        "Scoring".cyan(),
        ranker.leads().len(),
        runtime.model
    );
    ranker.run_analysis(runtime.gateway.as_ref()).await;
    if let Some(message) = ranker.status().failure() {
        return Err(message.to_string().into());
    }

    println!("{}", "Farm Leads".blue().bold());
    println!("{}", lead_table(ranker.leads()));
    println!();
    println!("{}", "High Propensity Targets".blue().bold());
    print!("{}", targets_block(&ranker.high_propensity()));
    Ok(())
}
