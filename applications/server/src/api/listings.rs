/// Listings API routes
use super::form::ListingForm;
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use sociaty_core::{
    CreateListing, Listing, ListingFilter, ListingId, MarketStore, StudentId, UpdateListing,
    DEFAULT_CATEGORY,
};

#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    #[serde(default)]
    pub cat: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListingsResponse {
    pub ok: bool,
    pub listings: Vec<Listing>,
}

#[derive(Debug, Serialize)]
pub struct ListingResponse {
    pub ok: bool,
    pub listing: Listing,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

fn not_found() -> ServerError {
    ServerError::NotFound("Not found".to_string())
}

fn parse_id(raw: &str) -> Option<ListingId> {
    raw.parse().ok()
}

/// GET /api/listings
pub async fn list_listings(
    State(app_state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<ListingsResponse>> {
    let filter = ListingFilter::from_query(
        query.cat.as_deref(),
        query.search.as_deref(),
        query.price.as_deref(),
    );

    let listings = app_state.store.get_listings(&filter).await?;

    Ok(Json(ListingsResponse { ok: true, listings }))
}

/// GET /api/listings/:id
pub async fn get_listing(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<ListingResponse>> {
    let id = parse_id(&id).ok_or_else(not_found)?;
    let listing = app_state
        .store
        .get_listing(id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(ListingResponse { ok: true, listing }))
}

/// POST /api/listings
pub async fn create_listing(
    State(app_state): State<AppState>,
    form: ListingForm,
) -> Result<Json<ListingResponse>> {
    let title = form.title.filter(|t| !t.is_empty());
    let student_id = form.student_id.filter(|s| !s.is_empty());
    let (Some(title), Some(student_id)) = (title, student_id) else {
        return Err(ServerError::BadRequest(
            "Missing title or studentId".to_string(),
        ));
    };

    let media = app_state.uploads.store_all(&form.files).await?;

    let listing = app_state
        .store
        .create_listing(CreateListing {
            title,
            description: form.description.unwrap_or_default(),
            price: form.price.unwrap_or(0.0),
            category: form
                .category
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            student_id: StudentId::new(student_id),
            media,
        })
        .await?;

    tracing::info!(
        listing_id = %listing.id,
        student_id = %listing.student_id,
        media = listing.media.len(),
        "Listing created"
    );

    Ok(Json(ListingResponse { ok: true, listing }))
}

/// PUT /api/listings/:id
///
/// Uploaded files replace the listing's media; without files the media is
/// left as is. An unknown id is reported before any problem with the body.
pub async fn update_listing(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    form: std::result::Result<ListingForm, ServerError>,
) -> Result<Json<ListingResponse>> {
    let id = parse_id(&id).ok_or_else(not_found)?;

    // Files are only written for a listing that exists
    if app_state.store.get_listing(id).await?.is_none() {
        return Err(not_found());
    }

    let form = form?;

    let media = if form.files.is_empty() {
        None
    } else {
        Some(app_state.uploads.store_all(&form.files).await?)
    };

    let listing = app_state
        .store
        .update_listing(
            id,
            UpdateListing {
                title: form.title,
                description: form.description,
                price: form.price,
                category: form.category,
                media,
            },
        )
        .await?;

    tracing::info!(listing_id = %listing.id, "Listing updated");

    Ok(Json(ListingResponse { ok: true, listing }))
}

/// DELETE /api/listings/:id
///
/// Succeeds whether or not the listing existed.
pub async fn delete_listing(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<OkResponse>> {
    if let Some(id) = parse_id(&id) {
        let removed = app_state.store.delete_listing(id).await?;
        tracing::info!(listing_id = %id, removed, "Listing delete requested");
    }

    Ok(Json(OkResponse { ok: true }))
}
