use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use service_core::utils::{parse_object_id, ValidatedJson, ValidatedQuery};

use crate::dtos::{
    ClockFilterParams, ClockRecordPatchRequest, ClockRecordRequest, ClockRecordResponse,
    DeleteResponse, UpdateClockRecordResponse,
};
use crate::models::{ClockFilter, ClockPatch, ClockRecord};
use crate::AppState;

fn record_not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("Item not found"))
}

async fn find_existing(state: &AppState, id: &ObjectId) -> Result<ClockRecord, AppError> {
    state
        .records
        .find_by_id(id)
        .await?
        .ok_or_else(record_not_found)
}

/// POST /create_clock_record/
pub async fn create_clock_record(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ClockRecordRequest>,
) -> Result<Json<ClockRecordResponse>, AppError> {
    let record = ClockRecord::new(req.email, req.location, Utc::now().date_naive());
    let id = state.records.insert(&record).await?;

    let created = state.records.find_by_id(&id).await?.ok_or_else(|| {
        AppError::DatabaseError(anyhow::anyhow!(
            "Inserted clock record {} could not be read back",
            id
        ))
    })?;

    tracing::info!(record_id = %id, "Clock record created");
    Ok(Json(ClockRecordResponse::from(created)))
}

/// GET /retrieve_item/:record_id
pub async fn retrieve_clock_record(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
) -> Result<Json<ClockRecordResponse>, AppError> {
    let id = parse_object_id(&record_id)?;
    let record = find_existing(&state, &id).await?;
    Ok(Json(ClockRecordResponse::from(record)))
}

/// Merge the present fields into a record. Writing values equal to the
/// stored ones still succeeds.
///
/// PUT /items/:record_id
pub async fn update_clock_record(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
    ValidatedJson(req): ValidatedJson<ClockRecordPatchRequest>,
) -> Result<Json<UpdateClockRecordResponse>, AppError> {
    let id = parse_object_id(&record_id)?;

    let patch = ClockPatch::from(req);
    if patch.is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!("No fields to update")));
    }

    let outcome = state.records.update_fields(&id, &patch).await?;
    if outcome.matched_count == 0 {
        return Err(record_not_found());
    }

    let updated = find_existing(&state, &id).await?;
    Ok(Json(UpdateClockRecordResponse {
        message: "Item updated successfully".to_string(),
        item: ClockRecordResponse::from(updated),
    }))
}

/// DELETE /items/:record_id/
pub async fn delete_clock_record(
    State(state): State<AppState>,
    Path(record_id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let id = parse_object_id(&record_id)?;
    find_existing(&state, &id).await?;

    if state.records.delete(&id).await? == 0 {
        return Err(record_not_found());
    }

    tracing::info!(record_id = %id, "Clock record deleted");
    Ok(Json(DeleteResponse {
        detail: "Item deleted successfully".to_string(),
    }))
}

/// GET /items/filter?email=&location=
pub async fn filter_clock_records(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<ClockFilterParams>,
) -> Result<Json<Vec<ClockRecordResponse>>, AppError> {
    let records = state.records.find(&ClockFilter::from(params)).await?;
    Ok(Json(
        records.into_iter().map(ClockRecordResponse::from).collect(),
    ))
}
