//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Returns the original string unchanged if no `${}` patterns are present.
/// Bare `$VAR` syntax is not expanded (only `${VAR}` with braces).
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) => Err(LookupError {
                var_name: var.to_owned(),
            }),
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Error returned when environment variable lookup fails.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("WBB_TEST_VAR_SIMPLE", "hello");
        }
        let result = expand_env("${WBB_TEST_VAR_SIMPLE}", "test.field").unwrap();
        assert_eq!(result, "hello");
        unsafe {
            std::env::remove_var("WBB_TEST_VAR_SIMPLE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("WBB_UNSET_VAR_TEST");
        }
        let result =
            expand_env("${WBB_UNSET_VAR_TEST:-https://cms.local/api}", "api.base_url").unwrap();
        assert_eq!(result, "https://cms.local/api");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("WBB_MISSING_VAR_TEST");
        }
        let err = expand_env("${WBB_MISSING_VAR_TEST}", "api.base_url").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("WBB_MISSING_VAR_TEST"));
        assert!(err.to_string().contains("api.base_url"));
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("WBB_HOST_TEST", "cms.example.org");
        }
        let result = expand_env("https://${WBB_HOST_TEST}/api", "api.base_url").unwrap();
        assert_eq!(result, "https://cms.example.org/api");
        unsafe {
            std::env::remove_var("WBB_HOST_TEST");
        }
    }

    #[test]
    fn test_literal_and_bare_dollar_unchanged() {
        assert_eq!(
            expand_env("https://cms.example.org/api", "api.base_url").unwrap(),
            "https://cms.example.org/api"
        );
        assert_eq!(expand_env("$VAR", "test.field").unwrap(), "$VAR");
    }
}
