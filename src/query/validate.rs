use crate::gateway::error::QueryError;

pub const PORT_RANGE_MESSAGE: &str = "Port must be between 1 and 65535";
pub const URL_SCHEME_MESSAGE: &str = "Please enter a full URL including http:// or https://";

/// Trims the input and rejects it when nothing is left.
pub fn required(value: &str, what: &str) -> Result<String, QueryError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(QueryError::validation(format!("Please enter {what}")));
    }
    Ok(trimmed.to_string())
}

pub fn port(value: &str) -> Result<u16, QueryError> {
    let trimmed = required(value, "a port number")?;
    match trimmed.parse::<u32>() {
        Ok(port) if (1..=65535).contains(&port) => Ok(port as u16),
        _ => Err(QueryError::validation(PORT_RANGE_MESSAGE)),
    }
}

/// The scheme check runs on the raw input, the trimmed URL is what gets sent.
pub fn http_url(value: &str) -> Result<String, QueryError> {
    let trimmed = required(value, "a URL")?;
    if !value.starts_with("http://") && !value.starts_with("https://") {
        return Err(QueryError::validation(URL_SCHEME_MESSAGE));
    }
    Ok(trimmed)
}
