// ABOUTME: One-shot marketing commands
// ABOUTME: Generates the copy suite from notes and analyzes a single room photo

use bionic_cli::output::{analysis_block, marketing_block};
use bionic_cli::Runtime;
use bionic_tui::clipboard::SystemClipboard;
use bionic_workflows::{CopyTarget, ImageSelection, MarketingGenerator};
use colored::*;
use std::path::Path;

pub async fn run_market(
    runtime: &Runtime,
    notes: String,
    copy: Option<CopyTarget>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut generator = MarketingGenerator::new();
    generator.set_notes(notes);
    if !generator.can_generate() {
        return Err("Property notes are empty".into());
    }

    println!("{}", "Drafting marketing suite...".cyan());
    generator.generate_copy(runtime.gateway.as_ref()).await;
    if let Some(message) = generator.copy_status().failure() {
        return Err(message.to_string().into());
    }
    let content = generator.content().ok_or("No marketing content was produced")?;
    println!();
    print!("{}", marketing_block(content));

    if let Some(target) = copy {
        let mut clipboard = SystemClipboard::new();
        match generator.copy_to(target, &mut clipboard) {
            Ok(Some(_)) => println!("\n{}", "✓ Copied to clipboard".green()),
            Ok(None) => {}
            Err(e) => {
                eprintln!("{} {}", "Clipboard unavailable:".yellow(), e);
                if let Some(text) = generator.copy_text(target) {
                    println!("\n{}", text);
                }
            }
        }
    }

    Ok(())
}

pub async fn run_analyze_image(
    runtime: &Runtime,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let selection = ImageSelection::from_path(path).await?;
    println!(
        "{} {} ({})",
        "Analyzing".cyan(),
        selection.name(),
        selection.mime_type()
    );

    let mut generator = MarketingGenerator::new();
    generator.select_image(selection);
    generator.analyze_image(runtime.gateway.as_ref()).await;
    if let Some(message) = generator.analysis_status().failure() {
        return Err(message.to_string().into());
    }
    let analysis = generator
        .visible_analysis()
        .ok_or("No analysis was produced")?;
    println!();
    print!("{}", analysis_block(analysis));
    Ok(())
}
