use ammonia::Builder;
use chrono::{DateTime, Utc};

use crate::config::TIMESTAMP_FORMAT;

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Removes scripts and event handlers from bodies that carry raw HTML tags.
/// Plain markdown is returned as typed so `>`, `<` and `&` survive.
pub fn sanitize_markup(content: &str) -> String {
    if !ammonia::is_html(content) {
        return content.to_string();
    }
    Builder::default()
        .link_rel(Some("noopener noreferrer"))
        .clean(content)
        .to_string()
}

pub fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamps_use_backend_format() {
        let at = Utc.with_ymd_and_hms(2022, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(format_timestamp(at), "2022-03-04 05:06:07");
    }

    #[test]
    fn markup_sanitizer_drops_scripts() {
        let clean = sanitize_markup("<b>hi</b><script>alert(1)</script>");
        assert_eq!(clean, "<b>hi</b>");
    }

    #[test]
    fn markdown_without_tags_is_untouched() {
        let body = "> quote\n\n`if a < b && c`";
        assert_eq!(sanitize_markup(body), body);
    }
}
