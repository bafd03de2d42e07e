//! Conversions between the store's ObjectId and its transport string form.

use mongodb::bson::oid::ObjectId;
use serde::Serializer;

use crate::error::AppError;

/// Parse a path segment into an ObjectId, rejecting anything that is not
/// 24 hex characters.
pub fn parse_object_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw)
        .map_err(|_| AppError::BadRequest(anyhow::anyhow!("Invalid ObjectId format")))
}

/// `serialize_with` helper rendering a document id as its lowercase hex
/// string instead of the extended-JSON `{"$oid": ...}` object. A document
/// that was never stored has no id and renders as `null`.
pub fn serialize_object_id<S>(id: &Option<ObjectId>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match id {
        Some(id) => serializer.serialize_str(&id.to_hex()),
        None => serializer.serialize_none(),
    }
}
