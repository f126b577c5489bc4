use serde::{Deserialize, Deserializer, Serialize};

use crate::config::POST_KIND;

fn default_kind() -> String {
    POST_KIND.to_string()
}

/// Hosted rows send `null` for empty columns; treat it like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn null_as_default_kind<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|kind| kind.unwrap_or_else(default_kind))
}

/// Display metadata of a post's author, copied into the post at upload time.
///
/// Every field is optional: rows written by older clients carry only part of
/// it and the feed must still render them.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthorMetadata {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Post {
    pub id: String,
    #[serde(rename = "uploaderID", alias = "authorId", alias = "uploader_id")]
    pub author_id: String,
    #[serde(
        rename = "uploader",
        alias = "authorMetadata",
        alias = "uploaderData",
        default,
        deserialize_with = "null_as_default"
    )]
    pub author: AuthorMetadata,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(rename = "type", default = "default_kind", deserialize_with = "null_as_default_kind")]
    pub kind: String,
    #[serde(rename = "createdAt", alias = "created_at", default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(rename = "updatedAt", alias = "updated_at", default, deserialize_with = "null_as_default")]
    pub updated_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub upvoters: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct FullName {
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub middle: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct User {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fullname: FullName,
    #[serde(default)]
    pub email: Option<String>,
    /// Connection ids as the backend stores them: a JSON list in a text column.
    #[serde(default)]
    pub connections: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            fullname: FullName::default(),
            email: None,
            connections: None,
        }
    }
}

/// Set of user ids a user is connected to, in the order they were added.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Connections(Vec<String>);

impl Connections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the serialized list stored on a user row. Missing, `null` or
    /// malformed input is the empty set.
    pub fn parse(serialized: Option<&str>) -> Self {
        let ids = serialized
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| serde_json::from_str::<Option<Vec<serde_json::Value>>>(s).ok())
            .flatten()
            .unwrap_or_default();

        // Non-string entries are dropped rather than failing the whole list.
        ids.into_iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect()
    }

    pub fn of(user: &User) -> Self {
        Self::parse(user.connections.as_deref())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|c| c == id)
    }

    pub fn insert(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        self.0.push(id.to_string());
        true
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|c| c != id);
        self.0.len() != before
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn to_serialized(&self) -> String {
        serde_json::Value::from(self.0.clone()).to_string()
    }
}

impl FromIterator<String> for Connections {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut connections = Connections::new();
        for id in iter {
            connections.insert(&id);
        }
        connections
    }
}

impl<'a> FromIterator<&'a str> for Connections {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(str::to_string).collect()
    }
}

/// One slot of a composed feed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "slot", content = "post", rename_all = "lowercase")]
pub enum FeedItem {
    Post(Post),
    Placeholder,
}

impl FeedItem {
    pub fn as_post(&self) -> Option<&Post> {
        match self {
            FeedItem::Post(post) => Some(post),
            FeedItem::Placeholder => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, FeedItem::Placeholder)
    }
}

/// Posts visible to a viewer, with layout placeholders interspersed.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct FeedView {
    pub items: Vec<FeedItem>,
}

impl FeedView {
    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.items.iter().filter_map(FeedItem::as_post)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Latest derived views published to the presentation layer.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct FeedSnapshot {
    pub feed: FeedView,
    pub recommendations: Vec<User>,
}
