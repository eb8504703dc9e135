use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{FromRequestParts, Path, State},
    http::{StatusCode, request::Parts},
    routing::get,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, info};

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::MovieResponse,
    validate,
};

const MOVIE_NOT_FOUND: &str = "Couldn't find movie with given ID";
const ROUTE_NOT_FOUND: &str = "The requested URL was not found on the server. \
    If you entered the URL manually please check your spelling and try again.";

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/movie/{id}",
            get(get_movie).put(put_movie).patch(patch_movie).delete(delete_movie),
        )
        .fallback(route_not_found)
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any).allow_methods(Any))
        .layer(TraceLayer::new_for_http())
}

/// Movie id taken from the path. Only plain non-negative integers match the
/// route; anything else is answered like an unknown URL.
pub struct MovieId(pub i64);

impl<S: Send + Sync> FromRequestParts<S> for MovieId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::not_found(ROUTE_NOT_FOUND))?;
        parse_movie_id(&raw).map(MovieId).ok_or_else(|| AppError::not_found(ROUTE_NOT_FOUND))
    }
}

fn parse_movie_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    MovieId(id): MovieId,
) -> AppResult<Json<MovieResponse>> {
    let movie = state.store.find(id).await?.ok_or_else(|| AppError::not_found(MOVIE_NOT_FOUND))?;
    Ok(Json(movie.into()))
}

pub async fn put_movie(
    State(state): State<Arc<AppState>>,
    MovieId(id): MovieId,
    body: Bytes,
) -> AppResult<(StatusCode, Json<MovieResponse>)> {
    let new = validate::create(&body)?;

    if state.store.find(id).await?.is_some() {
        debug!(id, "rejecting create, id in use");
        return Err(AppError::conflict("Movie id already taken"));
    }
    if !state.store.find_by_name(&new.name).await?.is_empty() {
        debug!(id, name = %new.name, "rejecting create, name in use");
        return Err(AppError::conflict("Movie name already taken"));
    }

    let movie = state.store.insert(id, new).await?;
    info!(id, movie = %movie, "movie created");
    Ok((StatusCode::CREATED, Json(movie.into())))
}

pub async fn patch_movie(
    State(state): State<Arc<AppState>>,
    MovieId(id): MovieId,
    body: Bytes,
) -> AppResult<Json<MovieResponse>> {
    let changes = validate::update(&body)?;

    let current =
        state.store.find(id).await?.ok_or_else(|| AppError::not_found(MOVIE_NOT_FOUND))?;

    // any stored movie carrying the sent name counts, including this one
    let name_taken = match changes.requested_name.as_deref() {
        Some(name) => !state.store.find_by_name(name).await?.is_empty(),
        None => false,
    };
    if name_taken {
        debug!(id, "rejecting update, name in use");
        return Err(AppError::conflict("Name of the movie already used"));
    }

    let movie = state.store.update(current, changes).await?;
    info!(id, movie = %movie, "movie updated");
    Ok(Json(movie.into()))
}

pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    MovieId(id): MovieId,
) -> AppResult<StatusCode> {
    if !state.store.delete(id).await? {
        return Err(AppError::not_found(MOVIE_NOT_FOUND));
    }
    info!(id, "movie deleted");
    Ok(StatusCode::OK)
}

async fn route_not_found() -> AppError {
    AppError::not_found(ROUTE_NOT_FOUND)
}
