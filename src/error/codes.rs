/// Error code registry for the classifier service
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 2000-2999: Server errors
/// - 7000-7999: Validation errors
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_INVALID_PORT: u16 = 1001;

    // Server errors (2000-2999)
    pub const SERVER_GENERIC: u16 = 2000;
    pub const SERVER_BIND_FAILED: u16 = 2001;
    pub const SERVER_HTTP_CLIENT: u16 = 2002;

    // Validation errors (7000-7999)
    pub const VALIDATION_REQUIRED_FIELD: u16 = 7001;
    pub const VALIDATION_OUT_OF_RANGE: u16 = 7003;
    pub const VALIDATION_PATTERN_MISMATCH: u16 = 7004;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        // Configuration errors
        1001 => "Invalid listening port",

        // Server errors
        2000 => "Generic server error",
        2001 => "Failed to bind listening socket",
        2002 => "Failed to build outbound HTTP client",

        // Validation errors
        7001 => "Required query parameter is missing",
        7003 => "Integer is outside the exactly representable range",
        7004 => "Value is not a plain decimal integer",

        _ => "Unknown error code",
    }
}
