/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i32 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i32 = 100;

/// Token type reported alongside issued access tokens
pub const TOKEN_TYPE_BEARER: &str = "Bearer";
