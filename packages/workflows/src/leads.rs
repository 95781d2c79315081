// ABOUTME: Lead storage seam for the predictive hunter
// ABOUTME: LeadProvider trait and the in-memory provider serving the seed homeowners

use async_trait::async_trait;
use bionic_core::{seed_leads, PropertyLead};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LeadProviderError {
    #[error("Lead store unavailable: {0}")]
    Unavailable(String),

    #[error("Lead not found: {0}")]
    NotFound(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeadProvider: Send + Sync {
    async fn list_leads(&self) -> Result<Vec<PropertyLead>, LeadProviderError>;

    /// Persist a full categorization pass over the leads
    async fn save_categorization(&self, leads: &[PropertyLead]) -> Result<(), LeadProviderError>;
}

/// Keeps leads in memory, starting from the seed data
#[derive(Debug)]
pub struct SeedLeadProvider {
    leads: RwLock<Vec<PropertyLead>>,
}

impl Default for SeedLeadProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SeedLeadProvider {
    pub fn new() -> Self {
        Self::with_leads(seed_leads())
    }

    pub fn with_leads(leads: Vec<PropertyLead>) -> Self {
        Self {
            leads: RwLock::new(leads),
        }
    }
}

#[async_trait]
impl LeadProvider for SeedLeadProvider {
    async fn list_leads(&self) -> Result<Vec<PropertyLead>, LeadProviderError> {
        Ok(self.leads.read().await.clone())
    }

    async fn save_categorization(&self, leads: &[PropertyLead]) -> Result<(), LeadProviderError> {
        let mut stored = self.leads.write().await;
        for lead in leads {
            let existing = stored
                .iter_mut()
                .find(|l| l.id == lead.id)
                .ok_or_else(|| LeadProviderError::NotFound(lead.id.clone()))?;
            existing.propensity_score = lead.propensity_score;
            existing.propensity_reasoning = lead.propensity_reasoning.clone();
            existing.propensity_category = lead.propensity_category;
        }
        debug!("Saved categorization for {} leads", leads.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bionic_core::PropensityCategory;

    #[tokio::test]
    async fn test_seed_provider_lists_ten_leads() {
        let provider = SeedLeadProvider::new();
        let leads = provider.list_leads().await.unwrap();
        assert_eq!(leads.len(), 10);
        assert!(leads.iter().all(|l| l.propensity_category.is_none()));
    }

    #[tokio::test]
    async fn test_save_categorization_persists() {
        let provider = SeedLeadProvider::new();
        let mut leads = provider.list_leads().await.unwrap();
        leads[0].mark_stable();

        provider.save_categorization(&leads).await.unwrap();

        let reloaded = provider.list_leads().await.unwrap();
        assert_eq!(
            reloaded[0].propensity_category,
            Some(PropensityCategory::Stable)
        );
    }

    #[tokio::test]
    async fn test_save_unknown_lead_fails() {
        let provider = SeedLeadProvider::with_leads(vec![]);
        let lead = seed_leads().remove(0);
        let result = provider.save_categorization(&[lead]).await;
        assert!(matches!(result, Err(LeadProviderError::NotFound(id)) if id == "1"));
    }
}
