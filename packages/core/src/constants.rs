/// Glyph prefixed to each flyer point when rendered or copied as a block
pub const BULLET: &str = "•";

/// Number of flyer points in every generated marketing suite
pub const FLYER_POINT_COUNT: usize = 3;

/// Number of selling features in every room analysis
pub const FEATURE_COUNT: usize = 3;

/// Maximum number of leads the propensity ranking keeps
pub const TOP_LEAD_COUNT: usize = 3;
