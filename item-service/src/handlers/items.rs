//! Item handlers.
//!
//! Each handler validates its input, makes one or a few repository calls and
//! maps the outcome to a status code.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use service_core::utils::{parse_object_id, ValidatedJson, ValidatedQuery};

use crate::dtos::{DeleteResponse, ItemFilterParams, ItemRequest, ItemResponse};
use crate::models::{EmailCount, Item, ItemFields, ItemFilter};
use crate::AppState;

fn item_not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("Item not found"))
}

async fn find_existing(state: &AppState, id: &ObjectId) -> Result<Item, AppError> {
    state
        .items
        .find_by_id(id)
        .await?
        .ok_or_else(item_not_found)
}

/// Create an item stamped with today's date.
///
/// POST /create_item/
pub async fn create_item(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ItemRequest>,
) -> Result<Json<ItemResponse>, AppError> {
    let item = Item::new(ItemFields::from(req), Utc::now().date_naive());
    let id = state.items.insert(&item).await?;

    let created = state.items.find_by_id(&id).await?.ok_or_else(|| {
        AppError::DatabaseError(anyhow::anyhow!("Inserted item {} could not be read back", id))
    })?;

    tracing::info!(item_id = %id, "Item created");
    Ok(Json(ItemResponse::from(created)))
}

/// GET /retrieve_item/:item_id
pub async fn retrieve_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<Json<ItemResponse>, AppError> {
    let id = parse_object_id(&item_id)?;
    let item = find_existing(&state, &id).await?;
    Ok(Json(ItemResponse::from(item)))
}

/// Replace every writable field of an item.
///
/// An update that changes nothing is rejected with "Update failed", the same
/// as an update the store did not apply.
///
/// PUT /items/:item_id
pub async fn update_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    ValidatedJson(req): ValidatedJson<ItemRequest>,
) -> Result<Json<ItemResponse>, AppError> {
    let id = parse_object_id(&item_id)?;
    find_existing(&state, &id).await?;

    let outcome = state
        .items
        .update_fields(&id, &ItemFields::from(req))
        .await?;
    if outcome.modified_count == 0 {
        return Err(AppError::BadRequest(anyhow::anyhow!("Update failed")));
    }

    let updated = find_existing(&state, &id).await?;
    Ok(Json(ItemResponse::from(updated)))
}

/// DELETE /items/:item_id/
pub async fn delete_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let id = parse_object_id(&item_id)?;
    find_existing(&state, &id).await?;

    // A concurrent delete can land between the lookup and this call.
    if state.items.delete(&id).await? == 0 {
        return Err(item_not_found());
    }

    tracing::info!(item_id = %id, "Item deleted");
    Ok(Json(DeleteResponse {
        detail: "Item deleted successfully".to_string(),
    }))
}

/// GET /items/filter?email=&expiry_date=&insert_date=&quantity=
pub async fn filter_items(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<ItemFilterParams>,
) -> Result<Json<Vec<ItemResponse>>, AppError> {
    let filter = ItemFilter::from(params);
    let items = state.items.find(&filter).await?;
    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}

/// GET /items/count_by_email
pub async fn count_by_email(
    State(state): State<AppState>,
) -> Result<Json<Vec<EmailCount>>, AppError> {
    Ok(Json(state.items.count_by_email().await?))
}
