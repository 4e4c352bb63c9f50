// =============================================================================
// Pagination Defaults
// =============================================================================

/// Page returned when the request names none
pub const DEFAULT_PAGE: u32 = 1;

/// Items per page when the request names no size
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Smallest page size accepted from requests
pub const MIN_PAGE_SIZE: u32 = 3;

/// Largest page size accepted from requests
pub const MAX_PAGE_SIZE: u32 = 100;

// =============================================================================
// Environment Variables - Pagination
// =============================================================================

/// Environment variable for the default page
pub const ENV_DEFAULT_PAGE: &str = "QUERY_HELPERS_DEFAULT_PAGE";

/// Environment variable for the default page size
pub const ENV_DEFAULT_SIZE: &str = "QUERY_HELPERS_DEFAULT_SIZE";

/// Environment variable for the minimum page size
pub const ENV_MIN_SIZE: &str = "QUERY_HELPERS_MIN_SIZE";

/// Environment variable for the maximum page size
pub const ENV_MAX_SIZE: &str = "QUERY_HELPERS_MAX_SIZE";
