//! Email extraction from free-form profile text

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}").expect("email pattern is valid")
});

/// First `local@domain.tld` substring in `text`
pub fn extract_email(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    EMAIL_PATTERN.find(text).map(|m| m.as_str().to_string())
}

/// Email from a profile: bio first, then the external link if it contains `@`
pub fn extract_contact_email(bio: &str, external_url: &str) -> Option<String> {
    extract_email(bio).or_else(|| {
        if external_url.contains('@') {
            extract_email(external_url)
        } else {
            None
        }
    })
}
