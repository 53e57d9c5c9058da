//! Validation limits shared by the wizard, the API schema, and the domain
//! value objects.

/// Minimum characters for a pillar habits description
pub const MIN_HABITS: usize = 50;

/// Minimum characters for the biggest-drain description
pub const MIN_DRAIN: usize = 100;

/// Minimum characters for a protocol commitment
pub const MIN_COMMITMENT: usize = 100;

/// Minimum characters for the first-win action
pub const MIN_FIRST_WIN: usize = 50;

/// Minimum characters for the drain impact description
pub const MIN_IMPACT: usize = 10;

/// Minimum characters for peak/crash times and the first-win timeframe
pub const MIN_TIMES: usize = 5;

/// Minimum characters for the accountability partner name
pub const MIN_PARTNER: usize = 2;

/// Rating lower bound (inclusive)
pub const RATING_MIN: i64 = 1;

/// Rating upper bound (inclusive)
pub const RATING_MAX: i64 = 10;

/// User name length bounds for submit requests
pub const MAX_USER_NAME: usize = 100;

/// Company ID length bound for submit requests
pub const MAX_COMPANY_ID: usize = 50;

/// Company name length bound for submit requests
pub const MAX_COMPANY_NAME: usize = 100;

/// List endpoint limit bounds and default
pub const LIST_LIMIT_MIN: i64 = 1;
pub const LIST_LIMIT_MAX: i64 = 500;
pub const LIST_LIMIT_DEFAULT: i64 = 100;
