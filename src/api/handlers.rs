//! Catalog endpoints
//!
//! Thin handlers over [`AttractionRepository`]: each one loads what it needs,
//! applies the configured limits and serializes the result. Nothing here
//! writes to the catalog.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::catalog::CatalogStats;
use crate::error::{Error, Result};
use crate::map::{self, MapMarker};
use crate::models::Attraction;
use crate::seo::{AttractionMeta, LabelMeta};
use crate::sitemap;

/// `?limit=` parameter
#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<usize>,
}

/// `?q=` parameter
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Attractions carrying one category or tag, with page metadata
#[derive(Debug, Serialize)]
pub struct LabelPage {
    pub label: String,
    pub title: String,
    pub description: String,
    pub count: usize,
    pub attractions: Vec<Attraction>,
}

impl LabelPage {
    fn new(label: String, meta: LabelMeta, attractions: Vec<Attraction>) -> Self {
        Self {
            label,
            title: meta.title,
            description: meta.description,
            count: attractions.len(),
            attractions,
        }
    }
}

/// `GET /api/attractions`
pub async fn list_attractions(State(state): State<AppState>) -> Result<Json<Vec<Attraction>>> {
    Ok(Json(state.repository.load_all().await?))
}

/// `GET /api/attractions/:id`
pub async fn get_attraction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Attraction>> {
    find_or_404(&state, &id).await.map(Json)
}

/// `GET /api/attractions/:id/nearby`
pub async fn nearby_attractions(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<LimitParams>,
) -> Result<Json<Vec<Attraction>>> {
    let limit = state
        .config
        .catalog
        .clamp_limit(params.limit, state.config.catalog.nearby_limit);
    Ok(Json(state.repository.nearby(&id, limit).await?))
}

/// `GET /api/attractions/:id/seo`
pub async fn attraction_seo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AttractionMeta>> {
    let attraction = find_or_404(&state, &id).await?;
    Ok(Json(AttractionMeta::new(&attraction, &state.config.site)))
}

/// `GET /api/categories`
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    Ok(Json(state.repository.list_categories().await?))
}

/// `GET /api/categories/:category`
pub async fn category_page(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<LabelPage>> {
    let attractions = state.repository.find_by_category(&category).await?;
    let meta = LabelMeta::category(&category, attractions.len(), &state.config.site);
    Ok(Json(LabelPage::new(category, meta, attractions)))
}

/// `GET /api/tags`
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    Ok(Json(state.repository.list_tags().await?))
}

/// `GET /api/tags/:tag`
pub async fn tag_page(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Result<Json<LabelPage>> {
    let attractions = state.repository.find_by_tag(&tag).await?;
    let meta = LabelMeta::tag(&tag, attractions.len(), &state.config.site);
    Ok(Json(LabelPage::new(tag, meta, attractions)))
}

/// `GET /api/types`
pub async fn list_types(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    Ok(Json(state.repository.list_types().await?))
}

/// `GET /api/types/:type`
pub async fn attractions_by_type(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<Vec<Attraction>>> {
    Ok(Json(state.repository.find_by_type(&kind).await?))
}

/// `GET /api/search?q=`
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Attraction>>> {
    let text = params.q.unwrap_or_default();
    Ok(Json(state.repository.search(&text).await?))
}

/// `GET /api/featured`
pub async fn featured(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<Json<Vec<Attraction>>> {
    let limit = state
        .config
        .catalog
        .clamp_limit(params.limit, state.config.catalog.featured_limit);
    Ok(Json(state.repository.featured(limit).await?))
}

/// `GET /api/stats`
pub async fn stats(State(state): State<AppState>) -> Result<Json<CatalogStats>> {
    Ok(Json(state.repository.stats().await?))
}

/// `GET /api/map/markers`
pub async fn map_markers(State(state): State<AppState>) -> Result<Json<Vec<MapMarker>>> {
    let attractions = state.repository.load_all().await?;
    Ok(Json(map::markers(&attractions)))
}

/// `GET /sitemap.xml`
pub async fn sitemap_xml(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let sitemap = sitemap::build(state.repository.as_ref(), &state.config.site).await?;
    Ok((
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        sitemap.to_xml(),
    ))
}

async fn find_or_404(state: &AppState, id: &str) -> Result<Attraction> {
    state
        .repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| Error::not_found(format!("attraction '{}'", id)))
}
