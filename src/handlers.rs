use std::sync::Arc;

use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;

use crate::backend::Backend;
use crate::config::FeedSettings;
use crate::context::FeedContext;
use crate::core::errors::{FeedError, FeedResult};
use crate::follow::{connect, disconnect, followers_of};
use crate::posts::draft_post;
use crate::recommend::RecommendationLayout;
use crate::search::{filter_page, search_path, SearchField};

pub struct AppState {
    pub backend: Arc<dyn Backend>,
    pub settings: FeedSettings,
}

impl AppState {
    pub fn new(backend: Arc<dyn Backend>, settings: FeedSettings) -> Self {
        Self { backend, settings }
    }
}

#[derive(Deserialize)]
pub struct ViewerQuery {
    viewer: String,
}

#[derive(Deserialize)]
pub struct RecommendationQuery {
    viewer: String,
    layout: Option<String>,
}

#[derive(Deserialize)]
pub struct FilterQuery {
    mode: Option<String>,
    #[serde(default)]
    q: String,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
}

#[derive(Deserialize)]
pub struct NewPostBody {
    viewer: String,
    #[serde(default)]
    content: String,
}

#[derive(Deserialize)]
pub struct ConnectionBody {
    viewer: String,
    #[serde(default)]
    target_user_id: String,
}

fn require_viewer(viewer: &str) -> FeedResult<&str> {
    if viewer.is_empty() {
        return Err(FeedError::BadRequest("Viewer ID required".to_string()));
    }
    Ok(viewer)
}

pub async fn get_feed(
    state: web::Data<AppState>,
    query: web::Query<ViewerQuery>,
) -> FeedResult<HttpResponse> {
    let viewer = require_viewer(&query.viewer)?;
    let context = FeedContext::new(state.backend.clone(), viewer, state.settings);
    let snapshot = context.snapshot()?;
    Ok(HttpResponse::Ok().json(snapshot.feed))
}

pub async fn get_recommendations(
    state: web::Data<AppState>,
    query: web::Query<RecommendationQuery>,
) -> FeedResult<HttpResponse> {
    let viewer = require_viewer(&query.viewer)?;
    let limit = match query.layout.as_deref() {
        None => state.settings.recommendation_limit,
        Some(name) => RecommendationLayout::parse(name)
            .ok_or_else(|| FeedError::BadRequest(format!("Unknown layout: {}", name)))?
            .limit(),
    };

    let settings = FeedSettings {
        recommendation_limit: limit,
        ..state.settings
    };
    let snapshot = FeedContext::new(state.backend.clone(), viewer, settings).snapshot()?;
    Ok(HttpResponse::Ok().json(snapshot.recommendations))
}

pub async fn filter_posts(
    state: web::Data<AppState>,
    query: web::Query<FilterQuery>,
) -> FeedResult<HttpResponse> {
    let field = query
        .mode
        .as_deref()
        .map(SearchField::parse)
        .unwrap_or_default();
    let page = state.backend.fetch_posts(state.settings.page_size)?;
    Ok(HttpResponse::Ok().json(filter_page(&page, field, &query.q)))
}

pub async fn get_search_path(query: web::Query<SearchQuery>) -> FeedResult<HttpResponse> {
    let path = search_path(&query.q)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "path": path })))
}

pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<NewPostBody>,
) -> FeedResult<HttpResponse> {
    let viewer = require_viewer(&body.viewer)?;
    let author = state
        .backend
        .fetch_user(viewer)?
        .ok_or_else(|| FeedError::NotFound("User not found".to_string()))?;

    let post = draft_post(&author, &body.content, Utc::now())?;
    state.backend.insert_post(post.clone())?;
    Ok(HttpResponse::Created().json(post))
}

pub async fn handle_connect(
    state: web::Data<AppState>,
    body: web::Json<ConnectionBody>,
) -> FeedResult<HttpResponse> {
    let viewer = require_viewer(&body.viewer)?;
    let target = body.target_user_id.as_str();
    if target.is_empty() || target == viewer {
        return Err(FeedError::BadRequest("Invalid target user".to_string()));
    }

    let mut user = state
        .backend
        .fetch_user(viewer)?
        .ok_or_else(|| FeedError::NotFound("User not found".to_string()))?;
    if state.backend.fetch_user(target)?.is_none() {
        return Err(FeedError::NotFound("Target user not found".to_string()));
    }

    if connect(&mut user, target) {
        state.backend.save_user(user)?;
    }
    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "connected" })))
}

pub async fn handle_disconnect(
    state: web::Data<AppState>,
    body: web::Json<ConnectionBody>,
) -> FeedResult<HttpResponse> {
    let viewer = require_viewer(&body.viewer)?;
    if body.target_user_id.is_empty() {
        return Err(FeedError::BadRequest("Invalid target user".to_string()));
    }

    let mut user = state
        .backend
        .fetch_user(viewer)?
        .ok_or_else(|| FeedError::NotFound("User not found".to_string()))?;

    if disconnect(&mut user, &body.target_user_id) {
        state.backend.save_user(user)?;
    }
    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "disconnected" })))
}

pub async fn get_followers(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> FeedResult<HttpResponse> {
    let users = state.backend.list_users()?;
    Ok(HttpResponse::Ok().json(followers_of(&users, &path)))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/feed", web::get().to(get_feed))
        .route("/recommendations", web::get().to(get_recommendations))
        .route("/posts/filter", web::get().to(filter_posts))
        .route("/posts", web::post().to(create_post))
        .route("/search-path", web::get().to(get_search_path))
        .route("/connect", web::post().to(handle_connect))
        .route("/disconnect", web::post().to(handle_disconnect))
        .route("/followers/{id}", web::get().to(get_followers));
}
