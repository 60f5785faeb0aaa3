use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use movela_lib::types::{CatalogItem, MediaKind, SearchScope};
use movela_lib::{
    validation, CatalogError, CategoryBucket, CategoryId, PaginationMetadata, PersonDetails,
    TitleDetails,
};
use serde::{Deserialize, Serialize};

use crate::server::AppContext;

pub fn api_routes() -> Router<AppContext> {
    Router::new()
        .route("/movies/now-playing", get(now_playing))
        .route("/movies/popular", get(popular_movies))
        .route("/movies/by-genres", get(movies_by_genres))
        .route("/movies/all", get(all_movies))
        .route("/movies/:id", get(movie_details))
        .route("/series/popular", get(popular_series))
        .route("/series/by-genres", get(series_by_genres))
        .route("/series/all", get(all_series))
        .route("/series/:id", get(series_details))
        .route("/search", get(search_multi))
        .route("/search/movies", get(search_movies))
        .route("/search/series", get(search_series))
        .route("/search/persons", get(search_persons))
        .route("/person/:id", get(person_details))
}

/// Failure body: `{ "error": <what failed>, "details": <why> }`.
pub struct ApiError {
    status: StatusCode,
    error: &'static str,
    details: String,
}

impl ApiError {
    fn from_catalog(error: &'static str, err: CatalogError) -> Self {
        let status = match &err {
            CatalogError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            CatalogError::Upstream(_) | CatalogError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        tracing::error!("{}: {}", error, err);
        Self {
            status,
            error,
            details: err.details(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "error": self.error,
            "details": self.details,
        }));
        (self.status, body).into_response()
    }
}

fn fail(error: &'static str) -> impl FnOnce(CatalogError) -> ApiError {
    move |err| ApiError::from_catalog(error, err)
}

#[derive(Deserialize)]
struct ListParams {
    page: Option<String>,
    limit: Option<String>,
}

#[derive(Deserialize)]
struct SearchParams {
    q: Option<String>,
}

// -- Wire shapes read by the front end --

#[derive(Serialize)]
struct MoviesPage {
    movies: Vec<CatalogItem>,
    pagination: MoviesPagination,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MoviesPagination {
    current_page: u32,
    total_pages: u64,
    total_movies: u64,
    movies_per_page: u32,
    has_next_page: bool,
    has_prev_page: bool,
}

impl From<PaginationMetadata> for MoviesPagination {
    fn from(p: PaginationMetadata) -> Self {
        Self {
            current_page: p.current_page,
            total_pages: p.total_pages,
            total_movies: p.total_items_ceiling,
            movies_per_page: p.items_per_page,
            has_next_page: p.has_next_page,
            has_prev_page: p.has_prev_page,
        }
    }
}

#[derive(Serialize)]
struct SeriesPage {
    series: Vec<CatalogItem>,
    pagination: SeriesPagination,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SeriesPagination {
    current_page: u32,
    total_pages: u64,
    total_series: u64,
    series_per_page: u32,
    has_next_page: bool,
    has_prev_page: bool,
}

impl From<PaginationMetadata> for SeriesPagination {
    fn from(p: PaginationMetadata) -> Self {
        Self {
            current_page: p.current_page,
            total_pages: p.total_pages,
            total_series: p.total_items_ceiling,
            series_per_page: p.items_per_page,
            has_next_page: p.has_next_page,
            has_prev_page: p.has_prev_page,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MovieGenreRow {
    genre: &'static str,
    genre_id: CategoryId,
    movies: Vec<CatalogItem>,
}

impl From<CategoryBucket> for MovieGenreRow {
    fn from(bucket: CategoryBucket) -> Self {
        Self {
            genre: bucket.category.display_name,
            genre_id: bucket.category.id,
            movies: bucket.items,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SeriesGenreRow {
    genre: &'static str,
    genre_id: CategoryId,
    series: Vec<CatalogItem>,
}

impl From<CategoryBucket> for SeriesGenreRow {
    fn from(bucket: CategoryBucket) -> Self {
        Self {
            genre: bucket.category.display_name,
            genre_id: bucket.category.id,
            series: bucket.items,
        }
    }
}

#[derive(Serialize)]
struct SearchResults {
    results: Vec<CatalogItem>,
}

// -- Movies --

async fn now_playing(State(ctx): State<AppContext>) -> Result<Json<Vec<CatalogItem>>, ApiError> {
    let items = ctx
        .catalog
        .now_playing()
        .await
        .map_err(fail("Failed to fetch now playing movies"))?;
    Ok(Json(items))
}

async fn popular_movies(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<CatalogItem>>, ApiError> {
    let items = ctx
        .catalog
        .popular(MediaKind::Movie)
        .await
        .map_err(fail("Failed to fetch popular movies"))?;
    Ok(Json(items))
}

async fn movies_by_genres(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<MovieGenreRow>>, ApiError> {
    let buckets = ctx
        .catalog
        .by_categories(MediaKind::Movie)
        .await
        .map_err(fail("Failed to fetch movies by genre"))?;
    Ok(Json(buckets.into_iter().map(MovieGenreRow::from).collect()))
}

async fn all_movies(
    State(ctx): State<AppContext>,
    Query(params): Query<ListParams>,
) -> Result<Json<MoviesPage>, ApiError> {
    let window = ctx
        .catalog
        .window(params.page.as_deref(), params.limit.as_deref());
    let page = ctx
        .catalog
        .list_all(MediaKind::Movie, window)
        .await
        .map_err(fail("Failed to fetch movies"))?;
    Ok(Json(MoviesPage {
        movies: page.items,
        pagination: page.pagination.into(),
    }))
}

async fn movie_details(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<TitleDetails>, ApiError> {
    title_details(&ctx, MediaKind::Movie, &id, "Failed to fetch movie details").await
}

// -- Series --

async fn popular_series(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<CatalogItem>>, ApiError> {
    let items = ctx
        .catalog
        .popular(MediaKind::Tv)
        .await
        .map_err(fail("Failed to fetch popular series"))?;
    Ok(Json(items))
}

async fn series_by_genres(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<SeriesGenreRow>>, ApiError> {
    let buckets = ctx
        .catalog
        .by_categories(MediaKind::Tv)
        .await
        .map_err(fail("Failed to fetch series by genre"))?;
    Ok(Json(buckets.into_iter().map(SeriesGenreRow::from).collect()))
}

async fn all_series(
    State(ctx): State<AppContext>,
    Query(params): Query<ListParams>,
) -> Result<Json<SeriesPage>, ApiError> {
    let window = ctx
        .catalog
        .window(params.page.as_deref(), params.limit.as_deref());
    let page = ctx
        .catalog
        .list_all(MediaKind::Tv, window)
        .await
        .map_err(fail("Failed to fetch series"))?;
    Ok(Json(SeriesPage {
        series: page.items,
        pagination: page.pagination.into(),
    }))
}

async fn series_details(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<TitleDetails>, ApiError> {
    title_details(&ctx, MediaKind::Tv, &id, "Failed to fetch series details").await
}

async fn title_details(
    ctx: &AppContext,
    kind: MediaKind,
    raw_id: &str,
    error: &'static str,
) -> Result<Json<TitleDetails>, ApiError> {
    let id = validation::validate_item_id(raw_id).map_err(fail("Invalid id"))?;
    let details = ctx.catalog.details(kind, id).await.map_err(fail(error))?;
    Ok(Json(details))
}

// -- Search and people --

async fn search_multi(
    State(ctx): State<AppContext>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResults>, ApiError> {
    search(&ctx, SearchScope::Multi, params, "Search failed").await
}

async fn search_movies(
    State(ctx): State<AppContext>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResults>, ApiError> {
    search(&ctx, SearchScope::Movie, params, "Movie search failed").await
}

async fn search_series(
    State(ctx): State<AppContext>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResults>, ApiError> {
    search(&ctx, SearchScope::Tv, params, "Series search failed").await
}

async fn search_persons(
    State(ctx): State<AppContext>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResults>, ApiError> {
    search(&ctx, SearchScope::Person, params, "Person search failed").await
}

async fn search(
    ctx: &AppContext,
    scope: SearchScope,
    params: SearchParams,
    error: &'static str,
) -> Result<Json<SearchResults>, ApiError> {
    let text = params.q.unwrap_or_default();
    let results = ctx
        .catalog
        .search(scope, &text)
        .await
        .map_err(fail(error))?;
    Ok(Json(SearchResults { results }))
}

async fn person_details(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<PersonDetails>, ApiError> {
    let id = validation::validate_item_id(&id).map_err(fail("Invalid id"))?;
    let person = ctx
        .catalog
        .person(id)
        .await
        .map_err(fail("Failed to fetch person details"))?;
    Ok(Json(person))
}
