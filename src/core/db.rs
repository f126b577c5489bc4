use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::backend::{Backend, InMemoryBackend};
use crate::core::helpers::format_timestamp;
use crate::follow::connect;
use crate::models::models::{AuthorMetadata, FullName, Post, User};

struct DemoUser {
    username: &'static str,
    first: &'static str,
    last: &'static str,
    posts: &'static [&'static str],
}

const DEMO_USERS: &[DemoUser] = &[
    DemoUser {
        username: "test",
        first: "Test",
        last: "Hunter",
        posts: &["This is my first post on Wicket!"],
    },
    DemoUser {
        username: "alice",
        first: "Alice",
        last: "Moreau",
        posts: &[
            "Welcome to my board! Excited to share writeups here.",
            "Just finished a **heap exploitation** challenge. Feeling productive today!",
        ],
    },
    DemoUser {
        username: "bob",
        first: "Bob",
        last: "Okafor",
        posts: &["Hey everyone! Just joined Wicket, looking forward to connecting with you all."],
    },
    DemoUser {
        username: "carol",
        first: "Carol",
        last: "Lindqvist",
        posts: &["Notes from the last CTF: always check the `robots.txt`."],
    },
];

pub fn find_user_by_username(backend: &dyn Backend, username: &str) -> anyhow::Result<Option<User>> {
    Ok(backend
        .list_users()?
        .into_iter()
        .find(|u| u.username == username))
}

/// Seeds demo users and posts unless they already exist, and connects
/// `test` to `bob`.
pub fn init_demo_data(backend: &dyn Backend) -> anyhow::Result<()> {
    let mut created = 0;
    // Spread timestamps so newer seeds sort first.
    let mut at = Utc::now() - Duration::minutes(60);

    for demo in DEMO_USERS {
        if find_user_by_username(backend, demo.username)?.is_some() {
            continue;
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: demo.username.to_string(),
            fullname: FullName {
                first: Some(demo.first.to_string()),
                middle: None,
                last: Some(demo.last.to_string()),
            },
            email: Some(format!("{}@wicket.dev", demo.username)),
            connections: None,
        };
        backend.save_user(user.clone())?;

        for content in demo.posts {
            at += Duration::minutes(1);
            let timestamp = format_timestamp(at);
            backend.insert_post(Post {
                id: Uuid::new_v4().to_string(),
                author_id: user.id.clone(),
                author: AuthorMetadata::from(&user),
                content: content.to_string(),
                kind: crate::config::POST_KIND.to_string(),
                created_at: timestamp.clone(),
                updated_at: timestamp,
                comments: Vec::new(),
                upvoters: Vec::new(),
            })?;
        }
        created += 1;
    }

    if let (Some(mut test), Some(bob)) = (
        find_user_by_username(backend, "test")?,
        find_user_by_username(backend, "bob")?,
    ) {
        if connect(&mut test, &bob.id) {
            backend.save_user(test)?;
        }
    }

    tracing::info!(created, "demo data ready");
    Ok(())
}

pub fn reset_demo_data(backend: &InMemoryBackend) -> anyhow::Result<()> {
    backend.clear()?;
    tracing::info!("demo data cleared");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::models::Connections;

    #[test]
    fn seeding_is_idempotent() {
        let backend = InMemoryBackend::new();
        init_demo_data(&backend).unwrap();
        init_demo_data(&backend).unwrap();

        assert_eq!(backend.list_users().unwrap().len(), DEMO_USERS.len());
        assert_eq!(backend.fetch_posts(100).unwrap().len(), 5);

        let test = find_user_by_username(&backend, "test").unwrap().unwrap();
        let bob = find_user_by_username(&backend, "bob").unwrap().unwrap();
        assert_eq!(Connections::of(&test).iter().collect::<Vec<_>>(), vec![bob.id.as_str()]);
    }

    #[test]
    fn newest_seed_post_comes_first() {
        let backend = InMemoryBackend::new();
        init_demo_data(&backend).unwrap();

        let latest = backend.fetch_posts(1).unwrap();
        assert_eq!(latest[0].author.username.as_deref(), Some("carol"));
    }

    #[test]
    fn reset_clears_everything() {
        let backend = InMemoryBackend::new();
        init_demo_data(&backend).unwrap();
        reset_demo_data(&backend).unwrap();

        assert!(backend.list_users().unwrap().is_empty());
        assert!(backend.fetch_posts(10).unwrap().is_empty());
    }
}
