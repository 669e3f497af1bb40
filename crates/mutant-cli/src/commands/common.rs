//! Shared CLI helpers used across multiple commands.

/// Parse a `key=value` string with an integer value for clap's `value_parser`.
pub fn parse_key_val(s: &str) -> Result<(String, i32), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid parameter format: '{}' (expected key=value)", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("Missing parameter name in '{}'", s));
    }
    let value = value
        .trim()
        .parse::<i32>()
        .map_err(|_| format!("Parameter value must be an integer: '{}'", s))?;
    Ok((key.to_string(), value))
}
