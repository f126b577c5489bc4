use crate::config::{INLINE_RECOMMENDATIONS, SIDEBAR_RECOMMENDATIONS};
use crate::models::models::{Connections, User};

/// Presentation contexts that show suggested connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationLayout {
    /// Desktop sidebar next to the feed.
    Sidebar,
    /// Narrow screens, rendered in the feed placeholder.
    Inline,
}

impl RecommendationLayout {
    pub fn limit(self) -> usize {
        match self {
            RecommendationLayout::Sidebar => SIDEBAR_RECOMMENDATIONS,
            RecommendationLayout::Inline => INLINE_RECOMMENDATIONS,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "sidebar" => Some(RecommendationLayout::Sidebar),
            "inline" => Some(RecommendationLayout::Inline),
            _ => None,
        }
    }
}

/// Drops the viewer and users they are already connected to, keeping the
/// candidate ranking, and returns at most `limit` users.
pub fn filter_recommendations(
    candidates: &[User],
    viewer_id: &str,
    connections: &Connections,
    limit: usize,
) -> Vec<User> {
    candidates
        .iter()
        .filter(|user| user.id != viewer_id && !connections.contains(&user.id))
        .take(limit)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users(ids: &[&str]) -> Vec<User> {
        ids.iter().map(|id| User::new(*id, format!("user-{}", id))).collect()
    }

    fn ids(users: &[User]) -> Vec<&str> {
        users.iter().map(|u| u.id.as_str()).collect()
    }

    #[test]
    fn excludes_connections_and_keeps_order() {
        let candidates = users(&["u2", "u3", "u4"]);
        let connections: Connections = ["u3"].into_iter().collect();

        let result = filter_recommendations(&candidates, "u1", &connections, 2);

        assert_eq!(ids(&result), vec!["u2", "u4"]);
    }

    #[test]
    fn empty_pool_yields_nothing() {
        assert!(filter_recommendations(&[], "u1", &Connections::new(), 5).is_empty());
    }

    #[test]
    fn never_returns_viewer_or_connections_and_respects_limit() {
        let candidates = users(&["u7", "u1", "u2", "u6", "u3", "u5", "u4"]);
        let connections: Connections = ["u2", "u5"].into_iter().collect();

        for limit in 0..8 {
            let result = filter_recommendations(&candidates, "u1", &connections, limit);
            assert!(result.len() <= limit);
            assert!(result
                .iter()
                .all(|u| u.id != "u1" && !connections.contains(&u.id)));
        }

        let all = filter_recommendations(&candidates, "u1", &connections, 10);
        assert_eq!(ids(&all), vec!["u7", "u6", "u3", "u4"]);
    }

    #[test]
    fn layouts_carry_their_bounds() {
        assert_eq!(RecommendationLayout::Sidebar.limit(), 5);
        assert_eq!(RecommendationLayout::Inline.limit(), 3);
        assert_eq!(RecommendationLayout::parse("inline"), Some(RecommendationLayout::Inline));
        assert_eq!(RecommendationLayout::parse("grid"), None);
    }
}
