use crate::config::{MIN_FILTER_QUERY_LENGTH, MIN_SEARCH_QUERY_LENGTH};
use crate::core::errors::{FeedError, FeedResult};
use crate::core::helpers::contains_ignore_case;
use crate::models::models::Post;

/// Post field the page filter matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    Content,
    UploaderEmail,
    Username,
    FullName,
}

impl SearchField {
    /// Unknown modes fall back to content.
    pub fn parse(mode: &str) -> Self {
        match mode {
            "uploader_email" => SearchField::UploaderEmail,
            "username" => SearchField::Username,
            "fullname" => SearchField::FullName,
            _ => SearchField::Content,
        }
    }

    fn matches(self, post: &Post, needle: &str) -> bool {
        let field = |value: &Option<String>| {
            value
                .as_deref()
                .map(|v| contains_ignore_case(v, needle))
                .unwrap_or(false)
        };

        match self {
            SearchField::Content => contains_ignore_case(&post.content, needle),
            SearchField::UploaderEmail => field(&post.author.email),
            SearchField::Username => field(&post.author.username),
            SearchField::FullName => field(&post.author.first_name) || field(&post.author.last_name),
        }
    }
}

/// Narrows an already fetched page. Queries under the minimum length leave
/// the page untouched.
pub fn filter_page(posts: &[Post], field: SearchField, query: &str) -> Vec<Post> {
    if query.chars().count() < MIN_FILTER_QUERY_LENGTH {
        return posts.to_vec();
    }

    let needle = query.to_lowercase();
    posts
        .iter()
        .filter(|post| field.matches(post, &needle))
        .cloned()
        .collect()
}

/// Builds the full-search page path for a query typed in the feed search box.
pub fn search_path(query: &str) -> FeedResult<String> {
    // Length is checked before trimming, as the search box does.
    if query.chars().count() < MIN_SEARCH_QUERY_LENGTH {
        return Err(FeedError::BadRequest(
            "Please enter a valid search query".to_string(),
        ));
    }

    let trimmed = query.trim();

    // Every whitespace character becomes '+'.
    let encoded: Vec<String> = trimmed
        .split(char::is_whitespace)
        .map(|word| urlencoding::encode(word).into_owned())
        .collect();

    Ok(format!("/search?query={}", encoded.join("+")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::models::AuthorMetadata;

    fn post(id: &str, content: &str, author: AuthorMetadata) -> Post {
        Post {
            id: id.to_string(),
            author_id: "u1".to_string(),
            author,
            content: content.to_string(),
            kind: "blog".to_string(),
            created_at: String::new(),
            updated_at: String::new(),
            comments: vec![],
            upvoters: vec![],
        }
    }

    fn page() -> Vec<Post> {
        vec![
            post(
                "1",
                "Found a Heap Overflow today",
                AuthorMetadata {
                    username: Some("ana".into()),
                    first_name: Some("Ana".into()),
                    last_name: Some("Reyes".into()),
                    email: Some("ana@wicket.dev".into()),
                    ..Default::default()
                },
            ),
            post(
                "2",
                "writeup on xss",
                AuthorMetadata {
                    username: Some("bo".into()),
                    first_name: Some("Bo".into()),
                    last_name: Some("Heapson".into()),
                    email: Some("bo@example.com".into()),
                    ..Default::default()
                },
            ),
            post("3", "no metadata heap", AuthorMetadata::default()),
        ]
    }

    fn ids(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn short_query_returns_page_unfiltered() {
        let page = page();
        assert_eq!(filter_page(&page, SearchField::Content, "he"), page);
        assert_eq!(filter_page(&page, SearchField::Username, ""), page);
    }

    #[test]
    fn matches_each_field_case_insensitively() {
        let page = page();
        assert_eq!(ids(&filter_page(&page, SearchField::Content, "HEAP")), vec!["1", "3"]);
        assert_eq!(ids(&filter_page(&page, SearchField::UploaderEmail, "wicket")), vec!["1"]);
        assert_eq!(ids(&filter_page(&page, SearchField::Username, "ANA")), vec!["1"]);
        assert_eq!(ids(&filter_page(&page, SearchField::FullName, "heap")), vec!["2"]);
        assert_eq!(ids(&filter_page(&page, SearchField::FullName, "reyes")), vec!["1"]);
    }

    #[test]
    fn unknown_mode_falls_back_to_content() {
        assert_eq!(SearchField::parse("tags"), SearchField::Content);
        assert_eq!(SearchField::parse("fullname"), SearchField::FullName);
    }

    #[test]
    fn search_path_requires_five_characters() {
        assert!(matches!(search_path("abc"), Err(FeedError::BadRequest(_))));
        assert_eq!(search_path("  abc  ").unwrap(), "/search?query=abc");
        assert_eq!(search_path(" heap  spray ").unwrap(), "/search?query=heap++spray");
        assert_eq!(search_path("c&c server").unwrap(), "/search?query=c%26c+server");
    }
}
