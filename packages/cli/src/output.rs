// ABOUTME: Terminal rendering for workflow results
// ABOUTME: Lead tables via comfy-table and colored text blocks for copy and analysis

use bionic_core::{
    MarketingContent, PropensityCategory, PropertyLead, QualifiedLead, RoomAnalysis, BULLET,
};
use colored::*;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

fn category_color(category: PropensityCategory) -> Color {
    match category {
        PropensityCategory::Hot => Color::Red,
        PropensityCategory::Warm => Color::Yellow,
        PropensityCategory::Stable => Color::Grey,
    }
}

/// Farm list as a table, one row per lead in input order
pub fn lead_table(leads: &[PropertyLead]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        "ID", "Owner", "Address", "Years", "Equity", "Value", "Score", "Category",
    ]);

    for lead in leads {
        let score = lead
            .propensity_score
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        let category = match lead.propensity_category {
            Some(category) => Cell::new(category.to_string()).fg(category_color(category)),
            None => Cell::new("Unscored"),
        };
        table.add_row(vec![
            Cell::new(&lead.id),
            Cell::new(&lead.owner_name),
            Cell::new(&lead.address),
            Cell::new(lead.years_owned),
            Cell::new(&lead.estimated_equity),
            Cell::new(&lead.estimated_value),
            Cell::new(score),
            category,
        ]);
    }

    table
}

/// Numbered summary of the Hot/Warm targets
pub fn targets_block(targets: &[&PropertyLead]) -> String {
    if targets.is_empty() {
        return "No high propensity targets".yellow().to_string();
    }

    let mut out = String::new();
    for (i, lead) in targets.iter().enumerate() {
        let category = lead
            .propensity_category
            .map(|c| c.to_string())
            .unwrap_or_default();
        out.push_str(&format!(
            "{}. {} ({}) {} {}\n",
            i + 1,
            lead.owner_name.bold(),
            lead.address,
            lead.propensity_score.unwrap_or_default(),
            category,
        ));
        if let Some(reasoning) = &lead.propensity_reasoning {
            out.push_str(&format!("   {}\n", reasoning.dimmed()));
        }
    }
    out
}

/// The lead after a turn, if the turn qualified someone new or changed the details
pub fn newly_qualified<'a>(
    before: Option<&QualifiedLead>,
    after: Option<&'a QualifiedLead>,
) -> Option<&'a QualifiedLead> {
    after.filter(|lead| before != Some(*lead))
}

pub fn marketing_block(content: &MarketingContent) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Professional Listing".blue().bold()));
    out.push_str(&format!("{}\n\n", content.professional_listing));
    out.push_str(&format!("{}\n", "Instagram Caption".blue().bold()));
    out.push_str(&format!("{}\n\n", content.instagram_caption));
    out.push_str(&format!("{}\n", "Flyer Points".blue().bold()));
    for point in &content.flyer_points {
        out.push_str(&format!("{} {}\n", BULLET, point));
    }
    out
}

pub fn analysis_block(analysis: &RoomAnalysis) -> String {
    let mut out = format!(
        "{} {}\n",
        "Architectural Style:".cyan().bold(),
        analysis.architectural_style
    );
    out.push_str(&format!("{}\n", "Top Selling Features".cyan().bold()));
    for feature in &analysis.top_selling_features {
        out.push_str(&format!("{} {}\n", BULLET, feature));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use bionic_core::seed_leads;

    fn no_color() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_lead_table_has_row_per_lead() {
        let leads = seed_leads();
        let table = lead_table(&leads);
        assert_eq!(table.row_iter().count(), leads.len());
    }

    #[test]
    fn test_marketing_block_bullets_every_point() {
        no_color();
        let content = MarketingContent {
            professional_listing: "A modern estate.".to_string(),
            instagram_caption: "Dream home #luxury".to_string(),
            flyer_points: [
                "Pool".to_string(),
                "Wine cellar".to_string(),
                "Canyon trail".to_string(),
            ],
        };
        let block = marketing_block(&content);
        assert!(block.contains("A modern estate."));
        assert!(block.contains("• Pool\n• Wine cellar\n• Canyon trail\n"));
    }

    fn lead(name: &str, budget: &str) -> QualifiedLead {
        QualifiedLead {
            name: name.to_string(),
            budget: budget.to_string(),
        }
    }

    #[test]
    fn test_newly_qualified_reports_first_and_changed_leads() {
        let jane = lead("Jane Doe", "$3M");
        let jane_raised = lead("Jane Doe", "$4M");

        assert_eq!(newly_qualified(None, Some(&jane)), Some(&jane));
        assert_eq!(newly_qualified(Some(&jane), Some(&jane_raised)), Some(&jane_raised));
        assert_eq!(newly_qualified(Some(&jane), Some(&jane.clone())), None);
        assert_eq!(newly_qualified(None, None), None);
    }

    #[test]
    fn test_targets_block_empty_message() {
        no_color();
        assert_eq!(targets_block(&[]), "No high propensity targets");
    }

    #[test]
    fn test_targets_block_numbers_leads() {
        no_color();
        let mut lead = seed_leads().remove(0);
        lead.propensity_score = Some(92);
        lead.propensity_category = Some(PropensityCategory::Hot);
        lead.propensity_reasoning = Some("Long tenure".to_string());
        let block = targets_block(&[&lead]);
        assert!(block.starts_with("1. "));
        assert!(block.contains("92 Hot"));
        assert!(block.contains("   Long tenure"));
    }
}
