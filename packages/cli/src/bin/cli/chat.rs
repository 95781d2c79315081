// ABOUTME: Line-by-line concierge REPL for the terminal
// ABOUTME: Prompts with inquire and prints each reply plus the qualified-lead badge

use bionic_cli::output::newly_qualified;
use bionic_cli::Runtime;
use bionic_workflows::ConciergeSession;
use colored::*;
use inquire::{InquireError, Text};

const EXIT_WORDS: [&str; 3] = ["exit", "quit", ":q"];

pub async fn run_chat(runtime: &Runtime) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = ConciergeSession::new();

    println!("{}", "Bionic Concierge".blue().bold());
    println!("{}", "Type 'exit' or press Esc to leave".dimmed());
    println!();
    if let Some(greeting) = session.messages().first() {
        println!("{} {}", "Concierge:".green().bold(), greeting.content);
    }

    loop {
        let input = match Text::new("You:").prompt() {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };
        if EXIT_WORDS.contains(&input.trim().to_ascii_lowercase().as_str()) {
            break;
        }

        let lead_before = session.qualified_lead().cloned();
        let Some(reply) = session
            .submit(
                &input,
                runtime.gateway.as_ref(),
                runtime.crm.as_ref(),
                runtime.max_tool_rounds,
            )
            .await
        else {
            continue;
        };
        println!("{} {}", "Concierge:".green().bold(), reply.content);

        if let Some(message) = session.status().failure() {
            eprintln!("{} {}", "⚠".yellow(), message.dimmed());
        }
        if let Some(lead) = newly_qualified(lead_before.as_ref(), session.qualified_lead()) {
            println!(
                "{} {} ({})",
                "✔ Lead qualified:".green().bold(),
                lead.name,
                lead.budget
            );
        }
    }

    if let Some(lead) = session.qualified_lead() {
        println!("{} {} ({})", "Qualified lead:".cyan(), lead.name, lead.budget);
    }
    Ok(())
}
