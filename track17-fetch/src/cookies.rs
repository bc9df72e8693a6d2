//! Session cookie filtering.
//!
//! The service sets a number of cookies; only two of them matter for
//! keeping the session alive. Everything else (and every cookie
//! attribute: domain, path, expiry) is discarded on receipt.

use std::collections::HashMap;

/// The only cookie names this layer ever stores or replays: the account
/// identifier and the session token.
pub const TRACKED_COOKIES: [&str; 2] = ["uid", "_yq_rc_"];

/// Parses a raw `Set-Cookie` header value and keeps only the tracked
/// cookies.
///
/// A single header value may carry several cookie assignments separated
/// by commas, and cookie attributes may themselves contain commas inside
/// quoted spans (`Expires="Tue, 01 Jan"`), so the split only happens on
/// commas outside `"..."`. Within each assignment the text before the
/// first `;` is the `name=value` pair; a pair without `=` yields an empty
/// value. Returns an empty map for an empty input.
pub fn filter_set_cookie(raw: &str) -> HashMap<String, String> {
    let mut cookies = HashMap::new();

    for segment in split_unquoted_commas(raw) {
        let pair = segment
            .trim()
            .split(';')
            .next()
            .unwrap_or_default();
        let (name, value) = match pair.split_once('=') {
            Some((name, value)) => (name, value),
            None => (pair, ""),
        };

        if TRACKED_COOKIES.contains(&name) {
            cookies.insert(name.to_string(), value.to_string());
        }
    }

    cookies
}

/// Splits on commas that are not inside a balanced `"..."` span.
fn split_unquoted_commas(raw: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;

    for (index, ch) in raw.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                segments.push(&raw[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    segments.push(&raw[start..]);

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_only_tracked_names() {
        let cookies = filter_set_cookie(
            "uid=12345; Path=/; HttpOnly, other=zzz; Path=/, _yq_rc_=abc; Secure",
        );
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies["uid"], "12345");
        assert_eq!(cookies["_yq_rc_"], "abc");
    }

    #[test]
    fn test_ignores_commas_inside_quoted_attributes() {
        let cookies = filter_set_cookie(r#"uid=1; Path="x,y", _yq_rc_=2"#);
        assert_eq!(cookies["uid"], "1");
        assert_eq!(cookies["_yq_rc_"], "2");
        assert_eq!(cookies.len(), 2);
    }

    #[test]
    fn test_expires_attribute_comma() {
        // The weekday comma in Expires must not split the assignment.
        let cookies =
            filter_set_cookie(r#"uid=7; Expires="Tue, 01 Jan 2030 00:00:00 GMT"; Path=/"#);
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies["uid"], "7");
    }

    #[test]
    fn test_pair_without_equals_has_empty_value() {
        let cookies = filter_set_cookie("uid; Path=/");
        assert_eq!(cookies["uid"], "");
    }

    #[test]
    fn test_empty_input() {
        assert!(filter_set_cookie("").is_empty());
    }

    #[test]
    fn test_untracked_only() {
        let cookies = filter_set_cookie("session_id=xyz; Path=/, theme=dark");
        assert!(cookies.is_empty());
    }

    #[test]
    fn test_values_survive_exactly() {
        let cookies = filter_set_cookie("_yq_rc_=a1b2==; HttpOnly");
        assert_eq!(cookies["_yq_rc_"], "a1b2==");
    }
}
