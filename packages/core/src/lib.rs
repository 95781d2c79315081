// ABOUTME: Core types, seed data, and utilities for Bionic Brokerage
// ABOUTME: Foundational package providing the domain model shared by every other package

pub mod constants;
pub mod seed;
pub mod types;
pub mod validation;

// Re-export main types
pub use types::{
    LeadSnapshot, MarketingContent, Message, PropensityCategory, PropertyLead, QualifiedLead,
    RankedLead, Role, RoomAnalysis,
};

// Re-export constants
pub use constants::{BULLET, FEATURE_COUNT, FLYER_POINT_COUNT, TOP_LEAD_COUNT};

// Re-export seed data
pub use seed::seed_leads;

// Re-export validation
pub use validation::{is_blank, truncate};
