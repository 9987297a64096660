//! Shared validation helpers.

/// Push an error if `value` is outside `[min, max]`.
pub(crate) fn validate_range(errors: &mut Vec<String>, name: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

pub(crate) fn validate_not_empty(errors: &mut Vec<String>, name: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{name} must not be empty"));
    }
}

/// Push an error unless `value` starts with one of `schemes` and has a host part.
pub(crate) fn validate_url_scheme(
    errors: &mut Vec<String>,
    name: &str,
    value: &str,
    schemes: &[&str],
) {
    if value.trim().is_empty() {
        errors.push(format!("{name} must not be empty"));
        return;
    }
    match schemes.iter().find(|s| value.starts_with(**s)) {
        Some(scheme) if value.len() > scheme.len() => {}
        Some(_) => errors.push(format!("{name} = {value:?} has no host")),
        None => errors.push(format!(
            "{name} = {value:?} must start with one of {}",
            schemes.join(", ")
        )),
    }
}
