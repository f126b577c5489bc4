//! Data-fetch collaborator standing in for the managed backend.
//!
//! The hosted service owns storage, authorization and change delivery. The
//! feed core only needs the handful of queries below, plus a channel that
//! says "something changed, fetch again".

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::anyhow;
use tokio::sync::broadcast;

use crate::config::CHANGE_CHANNEL_CAPACITY;
use crate::models::models::{Post, User};

/// Change notification emitted after every write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    PostsChanged,
    UserChanged(String),
}

pub trait Backend: Send + Sync {
    /// Latest posts, newest first.
    fn fetch_posts(&self, limit: usize) -> anyhow::Result<Vec<Post>>;

    /// Users other than `exclude_id`, ranked by id descending.
    fn fetch_candidates(&self, exclude_id: &str, limit: usize) -> anyhow::Result<Vec<User>>;

    fn fetch_user(&self, id: &str) -> anyhow::Result<Option<User>>;

    fn list_users(&self) -> anyhow::Result<Vec<User>>;

    fn insert_post(&self, post: Post) -> anyhow::Result<()>;

    fn save_user(&self, user: User) -> anyhow::Result<()>;

    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent>;
}

pub struct InMemoryBackend {
    posts: RwLock<Vec<Post>>,
    users: RwLock<BTreeMap<String, User>>,
    changes: broadcast::Sender<ChangeEvent>,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn read<T>(lock: &RwLock<T>) -> anyhow::Result<RwLockReadGuard<'_, T>> {
    lock.read().map_err(|_| anyhow!("backend lock poisoned"))
}

fn write<T>(lock: &RwLock<T>) -> anyhow::Result<RwLockWriteGuard<'_, T>> {
    lock.write().map_err(|_| anyhow!("backend lock poisoned"))
}

impl InMemoryBackend {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            posts: RwLock::new(Vec::new()),
            users: RwLock::new(BTreeMap::new()),
            changes,
        }
    }

    pub fn clear(&self) -> anyhow::Result<()> {
        write(&self.posts)?.clear();
        write(&self.users)?.clear();
        self.notify(ChangeEvent::PostsChanged);
        Ok(())
    }

    fn notify(&self, event: ChangeEvent) {
        // No subscribers is fine: nobody is looking at a feed right now.
        let _ = self.changes.send(event);
    }
}

impl Backend for InMemoryBackend {
    fn fetch_posts(&self, limit: usize) -> anyhow::Result<Vec<Post>> {
        let posts = read(&self.posts)?;
        // Reverse first so the stable sort keeps later inserts ahead on ties.
        let mut latest: Vec<Post> = posts.iter().rev().cloned().collect();
        latest.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        latest.truncate(limit);
        Ok(latest)
    }

    fn fetch_candidates(&self, exclude_id: &str, limit: usize) -> anyhow::Result<Vec<User>> {
        let users = read(&self.users)?;
        Ok(users
            .values()
            .rev()
            .filter(|u| u.id != exclude_id)
            .take(limit)
            .cloned()
            .collect())
    }

    fn fetch_user(&self, id: &str) -> anyhow::Result<Option<User>> {
        Ok(read(&self.users)?.get(id).cloned())
    }

    fn list_users(&self) -> anyhow::Result<Vec<User>> {
        Ok(read(&self.users)?.values().cloned().collect())
    }

    fn insert_post(&self, post: Post) -> anyhow::Result<()> {
        tracing::info!(post_id = %post.id, author = %post.author_id, "post inserted");
        write(&self.posts)?.push(post);
        self.notify(ChangeEvent::PostsChanged);
        Ok(())
    }

    fn save_user(&self, user: User) -> anyhow::Result<()> {
        let id = user.id.clone();
        write(&self.users)?.insert(id.clone(), user);
        tracing::info!(user_id = %id, "user saved");
        self.notify(ChangeEvent::UserChanged(id));
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.changes.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::models::AuthorMetadata;

    fn post(id: &str, created_at: &str) -> Post {
        Post {
            id: id.to_string(),
            author_id: "u1".to_string(),
            author: AuthorMetadata::default(),
            content: String::new(),
            kind: "blog".to_string(),
            created_at: created_at.to_string(),
            updated_at: created_at.to_string(),
            comments: vec![],
            upvoters: vec![],
        }
    }

    #[test]
    fn posts_come_back_newest_first_and_bounded() {
        let backend = InMemoryBackend::new();
        backend.insert_post(post("old", "2022-01-01 00:00:00")).unwrap();
        backend.insert_post(post("new", "2022-01-03 00:00:00")).unwrap();
        backend.insert_post(post("mid", "2022-01-02 00:00:00")).unwrap();
        backend.insert_post(post("mid2", "2022-01-02 00:00:00")).unwrap();

        let ids: Vec<String> = backend.fetch_posts(3).unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["new", "mid2", "mid"]);
    }

    #[test]
    fn candidates_exclude_viewer_ranked_by_id_desc() {
        let backend = InMemoryBackend::new();
        for id in ["u1", "u3", "u2", "u4"] {
            backend.save_user(User::new(id, id)).unwrap();
        }

        let ids: Vec<String> = backend
            .fetch_candidates("u3", 2)
            .unwrap()
            .into_iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(ids, vec!["u4", "u2"]);
    }

    #[test]
    fn writes_emit_change_events() {
        let backend = InMemoryBackend::new();
        let mut rx = backend.subscribe();

        backend.save_user(User::new("u1", "ana")).unwrap();
        backend.insert_post(post("p", "2022-01-01 00:00:00")).unwrap();

        assert_eq!(rx.try_recv().unwrap(), ChangeEvent::UserChanged("u1".to_string()));
        assert_eq!(rx.try_recv().unwrap(), ChangeEvent::PostsChanged);
    }
}
