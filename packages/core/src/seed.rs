// ABOUTME: Static farm data for the predictive hunter
// ABOUTME: Ten homeowner records standing in for a real lead database

use crate::types::PropertyLead;

const SEED: [(&str, &str, &str, u32, &str, &str); 10] = [
    ("1", "Richard & Linda Sterling", "422 N Canon Dr, Beverly Hills", 9, "$3.1M", "$5.8M"),
    ("2", "Marcus Vane", "1200 Sierra Alta Way, Hollywood Hills", 2, "$400K", "$4.2M"),
    ("3", "The Miller Family Trust", "8902 Wonderland Ave, LA", 12, "$2.2M", "$2.9M"),
    ("4", "Sarah Jenkins", "105 S Rockingham Ave, Brentwood", 7, "$4.5M", "$8.1M"),
    ("5", "Tech Peak LLC", "221 Ocean Ave, Santa Monica", 1, "$1.2M", "$12.5M"),
    ("6", "Gary Thompson", "556 Chalon Rd, Bel Air", 15, "$8.0M", "$11.2M"),
    ("7", "Elena Rodriguez", "1432 Blue Jay Way, Bird Streets", 8, "$1.5M", "$6.7M"),
    ("8", "Global Media Partners", "9021 Melrose Ave, West Hollywood", 4, "$600K", "$3.5M"),
    ("9", "Dr. Alistair Cook", "777 Mulholland Dr, Beverly Crest", 6, "$2.8M", "$5.1M"),
    ("10", "The Peterson Family", "300 Palisades Beach Rd, Pacific Palisades", 10, "$5.2M", "$9.4M"),
];

/// The fixed ten-lead seed set, uncategorized
pub fn seed_leads() -> Vec<PropertyLead> {
    SEED.iter()
        .map(|&(id, owner, address, years_owned, equity, value)| PropertyLead {
            id: id.to_string(),
            owner_name: owner.to_string(),
            address: address.to_string(),
            years_owned,
            estimated_equity: equity.to_string(),
            estimated_value: value.to_string(),
            propensity_score: None,
            propensity_reasoning: None,
            propensity_category: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_has_ten_unique_ids() {
        let leads = seed_leads();
        assert_eq!(leads.len(), 10);

        let ids: HashSet<_> = leads.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn test_seed_is_uncategorized() {
        assert!(seed_leads()
            .iter()
            .all(|l| l.propensity_category.is_none() && l.propensity_score.is_none()));
    }
}
