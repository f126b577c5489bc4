pub const MIN_POST_LENGTH: usize = 5;
pub const MAX_POST_LENGTH: usize = 5000;
pub const MIN_FILTER_QUERY_LENGTH: usize = 3;
pub const MIN_SEARCH_QUERY_LENGTH: usize = 5;
pub const FEED_PAGE_SIZE: usize = 10;
pub const SIDEBAR_RECOMMENDATIONS: usize = 5;
pub const INLINE_RECOMMENDATIONS: usize = 3;
pub const PLACEHOLDER_INDEX: usize = 1;
pub const CHANGE_CHANNEL_CAPACITY: usize = 64;
pub const POST_KIND: &str = "blog";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

pub fn bind_addr() -> String {
    std::env::var("WICKET_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string())
}

pub fn feed_page_size() -> usize {
    env_or("WICKET_FEED_PAGE_SIZE", FEED_PAGE_SIZE).max(1)
}

pub fn recommendation_limit() -> usize {
    env_or("WICKET_RECOMMENDATION_LIMIT", SIDEBAR_RECOMMENDATIONS)
}

pub fn seed_demo_data() -> bool {
    env_or("WICKET_SEED_DEMO_DATA", true)
}

/// Fetch bounds used by a feed context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedSettings {
    pub page_size: usize,
    pub recommendation_limit: usize,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            page_size: FEED_PAGE_SIZE,
            recommendation_limit: SIDEBAR_RECOMMENDATIONS,
        }
    }
}

impl FeedSettings {
    pub fn from_env() -> Self {
        Self {
            page_size: feed_page_size(),
            recommendation_limit: recommendation_limit(),
        }
    }
}
