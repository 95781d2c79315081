// ABOUTME: Domain types for the concierge, marketing, and propensity workflows
// ABOUTME: Serialized in camelCase to match the JSON shapes exchanged with the model

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::constants::{BULLET, FEATURE_COUNT, FLYER_POINT_COUNT};

/// Who authored a visible transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single entry in the concierge transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Display label for the author
    pub fn author_label(&self) -> &'static str {
        match self.role {
            Role::User => "You",
            Role::Assistant => "Concierge",
        }
    }
}

/// Lead registered by the concierge's qualification tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualifiedLead {
    pub name: String,
    pub budget: String,
}

/// Marketing suite generated from free-text property notes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingContent {
    pub professional_listing: String,
    pub instagram_caption: String,
    pub flyer_points: [String; FLYER_POINT_COUNT],
}

impl MarketingContent {
    /// Flyer points as a bulleted block, one point per line
    pub fn flyer_block(&self) -> String {
        self.flyer_points
            .iter()
            .map(|point| format!("{} {}", BULLET, point))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Style and selling features extracted from a room photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomAnalysis {
    pub architectural_style: String,
    pub top_selling_features: [String; FEATURE_COUNT],
}

/// Likelihood bucket assigned by the propensity ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropensityCategory {
    Hot,
    Warm,
    Stable,
}

impl PropensityCategory {
    pub fn is_high(&self) -> bool {
        matches!(self, PropensityCategory::Hot | PropensityCategory::Warm)
    }
}

impl fmt::Display for PropensityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PropensityCategory::Hot => "Hot",
            PropensityCategory::Warm => "Warm",
            PropensityCategory::Stable => "Stable",
        };
        f.write_str(label)
    }
}

/// Homeowner record tracked by the predictive hunter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyLead {
    pub id: String,
    pub owner_name: String,
    pub address: String,
    pub years_owned: u32,
    pub estimated_equity: String,
    pub estimated_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub propensity_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub propensity_reasoning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub propensity_category: Option<PropensityCategory>,
}

impl PropertyLead {
    /// Projection of the lead sent to the model for ranking
    pub fn snapshot(&self) -> LeadSnapshot {
        LeadSnapshot {
            id: self.id.clone(),
            years_owned: self.years_owned,
            equity: self.estimated_equity.clone(),
            value: self.estimated_value.clone(),
            address: self.address.clone(),
        }
    }

    /// Overwrite the propensity fields with a ranked result
    pub fn apply_ranking(&mut self, ranked: &RankedLead) {
        self.propensity_score = Some(ranked.score);
        self.propensity_reasoning = Some(ranked.reasoning.clone());
        self.propensity_category = Some(ranked.category);
    }

    /// Mark the lead as outside the ranked set
    pub fn mark_stable(&mut self) {
        self.propensity_score = None;
        self.propensity_reasoning = None;
        self.propensity_category = Some(PropensityCategory::Stable);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSnapshot {
    pub id: String,
    pub years_owned: u32,
    pub equity: String,
    pub value: String,
    pub address: String,
}

/// One entry of the model's top-lead ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedLead {
    pub id: String,
    #[serde(deserialize_with = "deserialize_score")]
    pub score: u8,
    pub category: PropensityCategory,
    pub reasoning: String,
}

/// Scores arrive as JSON numbers (possibly fractional); clamp to 1..=100
fn deserialize_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() {
        return Err(serde::de::Error::custom("score must be a finite number"));
    }
    Ok(raw.round().clamp(1.0, 100.0) as u8)
}
