// ABOUTME: Predictive hunter: ranks homeowners by likelihood to sell
// ABOUTME: Merges the model's top picks back onto the full lead list and persists the result

use bionic_ai::ModelGateway;
use bionic_core::{LeadSnapshot, PropertyLead, RankedLead};
use std::sync::Arc;
use tracing::{info, warn};

use crate::leads::LeadProvider;
use crate::status::{WorkflowError, WorkflowResult, WorkflowStatus};

/// Left-merge ranked results onto leads by id; unranked leads become Stable
pub fn merge_rankings(leads: &[PropertyLead], ranked: &[RankedLead]) -> Vec<PropertyLead> {
    for r in ranked {
        if !leads.iter().any(|l| l.id == r.id) {
            warn!("Ignoring ranking for unknown lead id {}", r.id);
        }
    }

    leads
        .iter()
        .map(|lead| {
            let mut lead = lead.clone();
            match ranked.iter().find(|r| r.id == lead.id) {
                Some(r) => lead.apply_ranking(r),
                None => lead.mark_stable(),
            }
            lead
        })
        .collect()
}

/// Detached ranking request over a snapshot of the leads
#[derive(Debug, Clone)]
pub struct RankingRequest {
    snapshots: Vec<LeadSnapshot>,
}

impl RankingRequest {
    pub fn snapshots(&self) -> &[LeadSnapshot] {
        &self.snapshots
    }

    pub async fn run(self, gateway: &dyn ModelGateway) -> WorkflowResult<Vec<RankedLead>> {
        Ok(gateway.rank_propensity(&self.snapshots).await?)
    }
}

pub struct PropensityRanker {
    provider: Arc<dyn LeadProvider>,
    leads: Vec<PropertyLead>,
    status: WorkflowStatus,
    has_analyzed: bool,
}

impl PropensityRanker {
    pub async fn load(provider: Arc<dyn LeadProvider>) -> WorkflowResult<Self> {
        let leads = provider.list_leads().await?;
        info!("Loaded {} leads", leads.len());
        Ok(Self {
            provider,
            leads,
            status: WorkflowStatus::Idle,
            has_analyzed: false,
        })
    }

    pub fn leads(&self) -> &[PropertyLead] {
        &self.leads
    }

    pub fn status(&self) -> &WorkflowStatus {
        &self.status
    }

    pub fn is_busy(&self) -> bool {
        self.status.is_busy()
    }

    pub fn has_analyzed(&self) -> bool {
        self.has_analyzed
    }

    pub fn begin_ranking(&mut self) -> Option<RankingRequest> {
        if self.is_busy() {
            return None;
        }
        self.status = WorkflowStatus::Busy;
        Some(RankingRequest {
            snapshots: self.leads.iter().map(PropertyLead::snapshot).collect(),
        })
    }

    pub async fn complete_ranking(&mut self, result: WorkflowResult<Vec<RankedLead>>) {
        let ranked = match result {
            Ok(ranked) => ranked,
            Err(e) => {
                warn!("Propensity ranking failed: {}", e);
                self.status = WorkflowStatus::from_error(&e);
                return;
            }
        };

        let merged = merge_rankings(&self.leads, &ranked);
        if let Err(e) = self.provider.save_categorization(&merged).await {
            warn!("Failed to save lead categorization: {}", e);
            self.status = WorkflowStatus::from_error(&WorkflowError::from(e));
            return;
        }

        info!("Ranked {} high-propensity leads", ranked.len());
        self.leads = merged;
        self.has_analyzed = true;
        self.status = WorkflowStatus::Idle;
    }

    pub async fn run_analysis(&mut self, gateway: &dyn ModelGateway) -> bool {
        let Some(request) = self.begin_ranking() else {
            return false;
        };
        let result = request.run(gateway).await;
        self.complete_ranking(result).await;
        true
    }

    /// Hot and Warm leads, highest score first
    pub fn high_propensity(&self) -> Vec<&PropertyLead> {
        let mut high: Vec<&PropertyLead> = self
            .leads
            .iter()
            .filter(|l| l.propensity_category.is_some_and(|c| c.is_high()))
            .collect();
        high.sort_by(|a, b| b.propensity_score.cmp(&a.propensity_score));
        high
    }
}
