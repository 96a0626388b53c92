/// Default number of blog cards shown per page
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: usize = 100;

// =============================================================================
// DELETE RECONCILIATION
// =============================================================================

/// Refetch attempts after a successful remote delete
pub const DELETE_REFETCH_ATTEMPTS: u32 = 3;

/// Fixed delay between refetch attempts, in milliseconds
pub const DELETE_REFETCH_DELAY_MS: u64 = 500;

/// Terminal message once every refetch attempt has failed
pub const REFETCH_FAILED_MESSAGE: &str = "failed to fetch updated list";

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Platform administrator
pub const ROLE_ADMIN: i64 = 1;

/// Health expert - moderates blogs except health-tagged ones
pub const ROLE_HEALTH_EXPERT: i64 = 3;

/// Nutrient specialist - moderates blogs except nutrient-tagged ones
pub const ROLE_NUTRIENT_SPECIALIST: i64 = 4;

/// Clinic - moderates every blog
pub const ROLE_CLINIC: i64 = 5;

// =============================================================================
// CATEGORY TAGS
// =============================================================================

pub const TAG_NUTRIENT: &str = "nutrient";
pub const TAG_HEALTH: &str = "health";

/// Display name for blogs whose category no longer exists
pub const UNCATEGORIZED: &str = "Uncategorized";
