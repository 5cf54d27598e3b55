//! Route matching module
//!
//! Path matching for the factorial endpoint. The route layer owns integer
//! coercion: a path only matches `/factorial/{numero}` when the parameter
//! segment parses as a signed 64-bit integer. Everything else falls through
//! to the 404 handler.

/// Match `/factorial/{numero}` and extract the integer parameter.
///
/// Returns `None` when the path is not the factorial route: wrong prefix,
/// empty or multi-segment parameter, non-numeric characters, or a literal
/// outside the `i64` range. Negative literals match so the handler can
/// reject them with a 400 instead of a route miss.
pub fn match_factorial_path(path: &str) -> Option<i64> {
    let segment = path.strip_prefix("/factorial/")?;
    if segment.is_empty() || segment.contains('/') {
        return None;
    }
    segment.parse().ok()
}
