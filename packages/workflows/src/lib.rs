// ABOUTME: Brokerage workflows driven by the model gateway
// ABOUTME: Concierge chat, marketing generation, and propensity ranking with a shared status surface

pub mod clipboard;
pub mod concierge;
pub mod crm;
pub mod hunter;
pub mod leads;
pub mod marketing;
pub mod status;

pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard};
pub use concierge::{
    ConciergeSession, ConciergeState, PendingTurn, TurnProgress, TurnResolution, APOLOGY_MESSAGE,
    EMPTY_REPLY_FALLBACK, WELCOME_MESSAGE,
};
pub use crm::{CrmRecorder, TracingCrm};
pub use hunter::{merge_rankings, PropensityRanker, RankingRequest};
pub use leads::{LeadProvider, LeadProviderError, SeedLeadProvider};
pub use marketing::{
    mime_type_for, AnalysisRequest, CopyRequest, CopyTarget, ImageError, ImageId, ImageSelection,
    MarketingGenerator,
};
pub use status::{WorkflowError, WorkflowResult, WorkflowStatus};
