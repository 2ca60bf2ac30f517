//! Input validation for user-entered messages, ratings and endpoint URLs

use reqwest::Url;

/// Longest message accepted by the input box
pub const MAX_MESSAGE_CHARS: usize = 4000;

/// Highest star rating
pub const MAX_RATING: u8 = 5;

/// Validates a chat message and returns it trimmed
pub fn validate_message(text: &str) -> Result<&str, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("Message cannot be empty".to_string());
    }

    if trimmed.chars().count() > MAX_MESSAGE_CHARS {
        return Err(format!(
            "Message too long (max {} characters)",
            MAX_MESSAGE_CHARS
        ));
    }

    Ok(trimmed)
}

/// Validates a feedback rating (1 to 5 stars)
pub fn validate_rating(rating: u8) -> Result<u8, String> {
    if rating == 0 {
        return Err("Please select a rating".to_string());
    }
    if rating > MAX_RATING {
        return Err(format!("Rating must be between 1 and {}", MAX_RATING));
    }
    Ok(rating)
}

/// Validates an HTTP(S) endpoint URL
pub fn validate_endpoint_url(url: &str) -> Result<Url, String> {
    if url.trim().is_empty() {
        return Err("Endpoint URL cannot be empty".to_string());
    }

    let parsed = Url::parse(url.trim()).map_err(|e| format!("Invalid endpoint URL: {}", e))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(format!("Unsupported URL scheme: {}", other)),
    }

    if parsed.host_str().map_or(true, str::is_empty) {
        return Err("Endpoint URL must include a host".to_string());
    }

    Ok(parsed)
}
