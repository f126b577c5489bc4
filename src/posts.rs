use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::{MAX_POST_LENGTH, MIN_POST_LENGTH, POST_KIND};
use crate::core::errors::{FeedError, FeedResult};
use crate::core::helpers::{format_timestamp, sanitize_markup};
use crate::models::models::{AuthorMetadata, Post, User};

impl From<&User> for AuthorMetadata {
    fn from(user: &User) -> Self {
        AuthorMetadata {
            username: Some(user.username.clone()),
            first_name: user.fullname.first.clone(),
            middle_name: user.fullname.middle.clone(),
            last_name: user.fullname.last.clone(),
            email: user.email.clone(),
        }
    }
}

/// Validates and builds a new post authored by `author`, ready to insert.
pub fn draft_post(author: &User, content: &str, now: DateTime<Utc>) -> FeedResult<Post> {
    // Counted on the raw input, like the upload form.
    let length = content.chars().count();
    if length < MIN_POST_LENGTH {
        return Err(FeedError::BadRequest("Please enter some content".to_string()));
    }
    if length > MAX_POST_LENGTH {
        return Err(FeedError::BadRequest(format!(
            "Post too long (max {} chars)",
            MAX_POST_LENGTH
        )));
    }

    let timestamp = format_timestamp(now);

    Ok(Post {
        id: Uuid::new_v4().to_string(),
        author_id: author.id.clone(),
        author: AuthorMetadata::from(author),
        content: sanitize_markup(content),
        kind: POST_KIND.to_string(),
        created_at: timestamp.clone(),
        updated_at: timestamp,
        comments: Vec::new(),
        upvoters: Vec::new(),
    })
}
