//! Keeps one viewer's derived views current.
//!
//! The context fetches the latest page of posts and candidates, runs the pure
//! feed and recommendation filters over them and publishes the result on a
//! `watch` channel. It re-runs on every backend change event and stops when
//! the backend goes away or nobody is watching anymore.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};

use crate::backend::Backend;
use crate::config::FeedSettings;
use crate::feed::{compose_feed, PlaceholderSlot};
use crate::models::models::{Connections, FeedSnapshot};
use crate::recommend::filter_recommendations;

pub struct FeedContext {
    backend: Arc<dyn Backend>,
    viewer_id: String,
    settings: FeedSettings,
    slot: PlaceholderSlot,
    publisher: watch::Sender<FeedSnapshot>,
}

impl FeedContext {
    pub fn new(backend: Arc<dyn Backend>, viewer_id: impl Into<String>, settings: FeedSettings) -> Self {
        let (publisher, _) = watch::channel(FeedSnapshot::default());
        Self {
            backend,
            viewer_id: viewer_id.into(),
            settings,
            slot: PlaceholderSlot::default(),
            publisher,
        }
    }

    pub fn with_placeholder(mut self, slot: PlaceholderSlot) -> Self {
        self.slot = slot;
        self
    }

    pub fn viewer_id(&self) -> &str {
        &self.viewer_id
    }

    pub fn watch(&self) -> watch::Receiver<FeedSnapshot> {
        self.publisher.subscribe()
    }

    /// Fetches fresh inputs and derives both views.
    pub fn snapshot(&self) -> anyhow::Result<FeedSnapshot> {
        let connections = self
            .backend
            .fetch_user(&self.viewer_id)?
            .map(|viewer| Connections::of(&viewer))
            .unwrap_or_default();

        let posts = self.backend.fetch_posts(self.settings.page_size)?;
        let feed = compose_feed(&posts, &self.viewer_id, &connections, self.slot);

        // Over-fetch by the connection count so existing connections do not
        // eat into the bound.
        let pool = self
            .settings
            .recommendation_limit
            .saturating_add(connections.len());
        let candidates = self.backend.fetch_candidates(&self.viewer_id, pool)?;
        let recommendations = filter_recommendations(
            &candidates,
            &self.viewer_id,
            &connections,
            self.settings.recommendation_limit,
        );

        Ok(FeedSnapshot {
            feed,
            recommendations,
        })
    }

    fn refresh(&self) {
        match self.snapshot() {
            Ok(snapshot) => {
                tracing::debug!(
                    viewer = %self.viewer_id,
                    feed = snapshot.feed.len(),
                    recommendations = snapshot.recommendations.len(),
                    "feed snapshot published"
                );
                self.publisher.send_replace(snapshot);
            }
            Err(err) => {
                tracing::warn!(viewer = %self.viewer_id, error = %err, "feed refresh failed; keeping last snapshot");
            }
        }
    }

    /// Publishes an initial snapshot, then recomputes on every change event.
    pub async fn run(self) {
        let mut changes = self.backend.subscribe();
        self.refresh();

        loop {
            tokio::select! {
                event = changes.recv() => match event {
                    Ok(event) => {
                        tracing::debug!(viewer = %self.viewer_id, ?event, "backend changed");
                        self.refresh();
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::debug!(viewer = %self.viewer_id, skipped, "change events lagged");
                        self.refresh();
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                _ = self.publisher.closed() => break,
            }
        }

        tracing::debug!(viewer = %self.viewer_id, "feed context stopped");
    }
}
