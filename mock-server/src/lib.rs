use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Longest title the service accepts, in characters.
pub const MAX_TITLE_LEN: usize = 40;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub user_id: i64,
    pub title: String,
    pub body: String,
}

/// Create/replace payload. Every field is optional so validation can report
/// which one is missing instead of failing deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostInput {
    pub title: Option<String>,
    pub body: Option<String>,
    pub user_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(rename = "userId")]
    pub user_id: Option<i64>,
}

/// Failure rendered as `{"error": message}`.
#[derive(Debug)]
pub struct ErrorResponse {
    status: StatusCode,
    message: String,
}

impl ErrorResponse {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: "post not found".to_string(),
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

struct ValidPost {
    title: String,
    body: String,
    user_id: i64,
}

impl PostInput {
    fn validate(self) -> Result<ValidPost, ErrorResponse> {
        let title = match self.title {
            Some(title) if !title.is_empty() => title,
            _ => return Err(ErrorResponse::bad_request("title is required")),
        };
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(ErrorResponse::bad_request(format!(
                "titles longer than {MAX_TITLE_LEN} characters are not supported"
            )));
        }
        let body = match self.body {
            Some(body) if !body.is_empty() => body,
            _ => return Err(ErrorResponse::bad_request("body is required")),
        };
        let user_id = self
            .user_id
            .ok_or_else(|| ErrorResponse::bad_request("userId is required"))?;
        Ok(ValidPost {
            title,
            body,
            user_id,
        })
    }
}

/// In-memory post store. Ids are handed out as one past the highest id seen.
#[derive(Debug)]
pub struct Store {
    posts: BTreeMap<u64, Post>,
    next_id: u64,
}

impl Store {
    pub fn with_posts(posts: Vec<Post>) -> Self {
        let next_id = posts.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self {
            posts: posts.into_iter().map(|p| (p.id, p)).collect(),
            next_id,
        }
    }

    fn insert(&mut self, valid: ValidPost) -> Post {
        let post = Post {
            id: self.next_id,
            user_id: valid.user_id,
            title: valid.title,
            body: valid.body,
        };
        self.next_id += 1;
        self.posts.insert(post.id, post.clone());
        post
    }
}

pub type Db = Arc<RwLock<Store>>;

/// Build `count` deterministic posts with ids `1..=count`, ten per user.
pub fn seed_posts(count: u64) -> Vec<Post> {
    (1..=count)
        .map(|id| Post {
            id,
            user_id: ((id - 1) / 10 + 1) as i64,
            title: format!("seed post {id}"),
            body: format!("body of seed post {id}"),
        })
        .collect()
}

/// Router with an empty store.
pub fn app() -> Router {
    app_with_posts(Vec::new())
}

pub fn app_with_posts(posts: Vec<Post>) -> Router {
    let db: Db = Arc::new(RwLock::new(Store::with_posts(posts)));
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", get(get_post).put(update_post).delete(delete_post))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener, posts: Vec<Post>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_posts(posts)).await
}

async fn list_posts(State(db): State<Db>, Query(params): Query<ListParams>) -> Json<Vec<Post>> {
    let store = db.read().await;
    let posts = store
        .posts
        .values()
        .filter(|p| params.user_id.map_or(true, |user_id| p.user_id == user_id))
        .cloned()
        .collect();
    Json(posts)
}

async fn create_post(
    State(db): State<Db>,
    input: Result<Json<PostInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Post>), ErrorResponse> {
    let Json(input) = input.map_err(|e| ErrorResponse::bad_request(e.body_text()))?;
    let valid = input.validate()?;
    let post = db.write().await.insert(valid);
    info!(id = post.id, user_id = post.user_id, "created post");
    Ok((StatusCode::CREATED, Json(post)))
}

async fn get_post(
    State(db): State<Db>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<Post>, ErrorResponse> {
    let Path(id) = id.map_err(|_| ErrorResponse::not_found())?;
    let store = db.read().await;
    store
        .posts
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(ErrorResponse::not_found)
}

async fn update_post(
    State(db): State<Db>,
    id: Result<Path<u64>, PathRejection>,
    input: Result<Json<PostInput>, JsonRejection>,
) -> Result<Json<Post>, ErrorResponse> {
    let Path(id) = id.map_err(|_| ErrorResponse::not_found())?;
    let Json(input) = input.map_err(|e| ErrorResponse::bad_request(e.body_text()))?;
    let mut store = db.write().await;
    let post = store.posts.get_mut(&id).ok_or_else(ErrorResponse::not_found)?;
    let valid = input.validate()?;
    post.title = valid.title;
    post.body = valid.body;
    post.user_id = valid.user_id;
    info!(id, "replaced post");
    Ok(Json(post.clone()))
}

async fn delete_post(
    State(db): State<Db>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<serde_json::Value>, ErrorResponse> {
    let Path(id) = id.map_err(|_| ErrorResponse::not_found())?;
    let mut store = db.write().await;
    store.posts.remove(&id).ok_or_else(ErrorResponse::not_found)?;
    info!(id, "deleted post");
    Ok(Json(json!({})))
}
