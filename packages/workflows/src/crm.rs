// ABOUTME: Side-effect sink for qualified leads
// ABOUTME: Stands in for a CRM write by emitting a structured log record

use bionic_core::QualifiedLead;
use tracing::info;

/// Status written alongside every qualified lead
pub const QUALIFIED_STATUS: &str = "qualified";

/// Receives leads the concierge has qualified
pub trait CrmRecorder: Send + Sync {
    fn record_qualified(&self, lead: &QualifiedLead);
}

/// Records qualifications as `bionic::crm` tracing events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingCrm;

impl CrmRecorder for TracingCrm {
    fn record_qualified(&self, lead: &QualifiedLead) {
        info!(
            target: "bionic::crm",
            name = %lead.name,
            budget = %lead.budget,
            status = QUALIFIED_STATUS,
            "Updating leads collection"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn test_tracing_crm_writes_qualified_record() {
        TracingCrm.record_qualified(&QualifiedLead {
            name: "Jane Doe".to_string(),
            budget: "$3M".to_string(),
        });

        assert!(logs_contain("Updating leads collection"));
        assert!(logs_contain("name=Jane Doe"));
        assert!(logs_contain("budget=$3M"));
        assert!(logs_contain("status=\"qualified\""));
    }
}
