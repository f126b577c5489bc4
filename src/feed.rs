use crate::config::PLACEHOLDER_INDEX;
use crate::models::models::{Connections, FeedItem, FeedView, Post};

/// Where the inline recommendation slot goes in a composed feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderSlot {
    /// Insert one placeholder at this index, or at the end when the feed is shorter.
    At(usize),
    None,
}

impl Default for PlaceholderSlot {
    fn default() -> Self {
        PlaceholderSlot::At(PLACEHOLDER_INDEX)
    }
}

pub fn is_visible_to(post: &Post, viewer_id: &str, connections: &Connections) -> bool {
    post.author_id == viewer_id || connections.contains(&post.author_id)
}

/// Keeps the viewer's own posts and their connections' posts, in input order,
/// and reserves the placeholder slot.
pub fn compose_feed(
    posts: &[Post],
    viewer_id: &str,
    connections: &Connections,
    slot: PlaceholderSlot,
) -> FeedView {
    let mut items: Vec<FeedItem> = posts
        .iter()
        .filter(|post| is_visible_to(post, viewer_id, connections))
        .cloned()
        .map(FeedItem::Post)
        .collect();

    if let PlaceholderSlot::At(index) = slot {
        let at = index.min(items.len());
        items.insert(at, FeedItem::Placeholder);
    }

    tracing::debug!(
        viewer = viewer_id,
        fetched = posts.len(),
        shown = items.len(),
        "composed feed"
    );

    FeedView { items }
}
