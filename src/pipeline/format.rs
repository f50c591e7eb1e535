use super::{fields, Table, PROFILE_MARKER};
use tracing::warn;

/// Keeps an address only when something follows the first `@` and that
/// remainder contains a dot. Anything else degrades to empty.
pub fn validate_email(email: &str) -> String {
    if let Some((_, domain)) = email.split_once('@') {
        if domain.contains('.') {
            return email.to_string();
        }
    }
    String::new()
}

/// Last path segment after the final `linkedin.com`, outer slashes trimmed.
fn profile_handle(url: &str) -> &str {
    let after = url.rsplit("linkedin.com").next().unwrap_or("");
    let trimmed = after.trim_matches('/');
    trimmed.rsplit('/').next().unwrap_or("")
}

/// Normalizes a profile reference to a canonical absolute URL. Values
/// already carrying the profile path are kept; everything else is rebuilt
/// around the extracted handle.
pub fn canonicalize_linkedin(raw: &str) -> String {
    let mut url = raw.trim().to_string();
    if url.starts_with("www") {
        url = format!("https://{url}");
    }
    if url.contains(PROFILE_MARKER) {
        return url;
    }
    if url.contains("linkedin.com") {
        format!("https://www.linkedin.com/in/{}", profile_handle(&url))
    } else {
        format!(
            "https://www.linkedin.com/in/{}",
            raw.trim().trim_matches('/')
        )
    }
}

/// Email and LinkedIn repair for rows that survived URL validation.
/// Failures degrade to empty strings; the row is always retained.
#[tracing::instrument(level = "debug", skip(table))]
pub fn repair_contact_fields(mut table: Table) -> Table {
    for record in &mut table {
        let email = record.get(fields::EMAIL).to_string();
        let validated = validate_email(&email);
        if validated.is_empty() && !email.is_empty() {
            warn!(email = %email, "discarding invalid email address");
        }
        record.set(fields::EMAIL, validated);

        let url = canonicalize_linkedin(record.get(fields::LINKEDIN_URL));
        record.set(fields::LINKEDIN_URL, url);
    }
    table
}
