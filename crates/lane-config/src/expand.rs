//! `${VAR}` expansion inside configuration values.
//!
//! - `${VAR}` inserts the value of VAR and errors when it is unset
//! - `${VAR:-default}` falls back to `default` when VAR is unset

use crate::ConfigError;

/// Expand `${VAR}` references in `value`.
///
/// Strings without `${` come back untouched. Bare `$VAR` (no braces) is
/// never expanded, so URLs and tokens containing a literal `$` pass
/// through.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    match shellexpand::env_with_context(value, lookup) {
        Ok(expanded) => Ok(expanded.into_owned()),
        Err(e) => Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{0}}} not set", e.cause.0),
        }),
    }
}

/// Lookup that reports unset variables instead of silently dropping them.
///
/// A reference with a `:-default` never reaches the error path; shellexpand
/// resolves the default itself.
fn lookup(var: &str) -> Result<Option<String>, Unset> {
    std::env::var(var)
        .map(Some)
        .map_err(|_| Unset(var.to_owned()))
}

/// Name of a variable that was referenced but not set.
struct Unset(String);
