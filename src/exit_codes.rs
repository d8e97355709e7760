//! Exit code constants for the fieldcopy CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable input, invalid config)
//! - 2: Template error (a field has no value)
//! - 3: Copy failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable or invalid input files.
pub const USER_ERROR: i32 = 1;

/// Template error: a field was referenced but never given a value.
pub const TEMPLATE_FAILURE: i32 = 2;

/// Copy failure: a source file is missing or a destination cannot be written.
pub const COPY_FAILURE: i32 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, TEMPLATE_FAILURE, COPY_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn exit_codes_are_stable() {
        assert_eq!(SUCCESS, 0);
        assert_eq!(USER_ERROR, 1);
        assert_eq!(TEMPLATE_FAILURE, 2);
        assert_eq!(COPY_FAILURE, 3);
    }
}
