use lazy_static::lazy_static;
use regex::Regex;

pub const MAX_EMAIL_LEN: usize = 100;
pub const MIN_MESSAGE_LEN: usize = 10;
pub const MAX_MESSAGE_LEN: usize = 1000;

lazy_static! {
    // Letters, whitespace, apostrophes and hyphens; 2 to 50 of them
    static ref NAME_RE: Regex = Regex::new(r"^[a-zA-Z\s'-]{2,50}$").expect("name pattern compiles");
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles");
    static ref NAV_TARGET_RE: Regex =
        Regex::new(r"^[a-zA-Z][a-zA-Z0-9\-_]*$").expect("nav target pattern compiles");
}

pub fn validate_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}

pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email) && email.chars().count() <= MAX_EMAIL_LEN
}

pub fn validate_message(message: &str) -> bool {
    let len = message.chars().count();
    (MIN_MESSAGE_LEN..=MAX_MESSAGE_LEN).contains(&len)
}

/// Element ids that navigation is allowed to scroll to.
pub fn validate_nav_target(id: &str) -> bool {
    NAV_TARGET_RE.is_match(id)
}

/// Escapes text so it can be placed inside HTML element content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_accepts_hyphen_and_apostrophe() {
        assert!(validate_name("Anna-Marie O'Brien"));
        assert!(validate_name("Jo"));
    }

    #[test]
    fn test_name_too_short() {
        assert!(!validate_name("A"));
    }

    #[test]
    fn test_name_rejects_digits() {
        assert!(!validate_name("Anna123"));
    }

    #[test]
    fn test_name_length_limit() {
        assert!(validate_name(&"a".repeat(50)));
        assert!(!validate_name(&"a".repeat(51)));
    }

    #[test]
    fn test_name_rejects_markup() {
        assert!(!validate_name("<script>"));
    }

    #[test]
    fn test_email_accepts_short_address() {
        assert!(validate_email("a@b.co"));
        assert!(validate_email("first.last+tag@example.org"));
    }

    #[test]
    fn test_email_rejects_missing_at() {
        assert!(!validate_email("not-an-email"));
    }

    #[test]
    fn test_email_requires_dot_after_at() {
        assert!(!validate_email("a@bco"));
        assert!(!validate_email("a@.co"));
    }

    #[test]
    fn test_email_rejects_whitespace_and_double_at() {
        assert!(!validate_email("a b@c.de"));
        assert!(!validate_email("a@@c.de"));
    }

    #[test]
    fn test_email_rejects_over_100_chars() {
        let long = format!("{}@b.co", "a".repeat(101));
        assert!(!validate_email(&long));

        let at_limit = format!("{}@b.co", "a".repeat(MAX_EMAIL_LEN - 5));
        assert_eq!(at_limit.len(), MAX_EMAIL_LEN);
        assert!(validate_email(&at_limit));
    }

    #[test]
    fn test_message_length_boundaries() {
        assert!(!validate_message(&"x".repeat(9)));
        assert!(validate_message(&"x".repeat(10)));
        assert!(validate_message(&"x".repeat(1000)));
        assert!(!validate_message(&"x".repeat(1001)));
    }

    #[test]
    fn test_message_counts_chars_not_bytes() {
        assert!(validate_message(&"é".repeat(10)));
        assert!(!validate_message(&"é".repeat(9)));
    }

    #[test]
    fn test_nav_target() {
        assert!(validate_nav_target("about"));
        assert!(validate_nav_target("case-study_2"));
        assert!(!validate_nav_target("2fast"));
        assert!(!validate_nav_target(""));
        assert!(!validate_nav_target("a\"]"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>Tom & Jerry</b>"),
            "&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }
}
