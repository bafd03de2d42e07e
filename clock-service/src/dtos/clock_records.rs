use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use service_core::utils::serialize_object_id;
use validator::Validate;

use crate::models::{ClockFilter, ClockPatch, ClockRecord};

/// Body of `POST /create_clock_record/`.
#[derive(Debug, Deserialize, Validate)]
pub struct ClockRecordRequest {
    pub email: String,
    pub location: String,
}

/// Body of `PUT /items/{id}`. Absent and `null` fields are left unchanged;
/// empty strings are written.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ClockRecordPatchRequest {
    pub email: Option<String>,
    pub location: Option<String>,
}

impl From<ClockRecordPatchRequest> for ClockPatch {
    fn from(req: ClockRecordPatchRequest) -> Self {
        Self {
            email: req.email,
            location: req.location,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClockRecordResponse {
    #[serde(rename = "_id", serialize_with = "serialize_object_id")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub location: String,
    pub inserted_date: String,
}

impl From<ClockRecord> for ClockRecordResponse {
    fn from(record: ClockRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
            location: record.location,
            inserted_date: record.inserted_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateClockRecordResponse {
    pub message: String,
    pub item: ClockRecordResponse,
}

/// Query string of `GET /items/filter`. Blank values are ignored.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ClockFilterParams {
    pub email: Option<String>,
    pub location: Option<String>,
}

impl From<ClockFilterParams> for ClockFilter {
    fn from(params: ClockFilterParams) -> Self {
        Self {
            email: params.email.filter(|e| !e.is_empty()),
            location: params.location.filter(|l| !l.is_empty()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_patch_fields_are_dropped() {
        let req: ClockRecordPatchRequest =
            serde_json::from_str(r#"{"email": null, "location": "Berlin"}"#).unwrap();
        let patch = ClockPatch::from(req);
        assert_eq!(patch.email, None);
        assert_eq!(patch.location.as_deref(), Some("Berlin"));
    }

    #[test]
    fn empty_object_is_an_empty_patch() {
        let req: ClockRecordPatchRequest = serde_json::from_str("{}").unwrap();
        assert!(ClockPatch::from(req).is_empty());
    }

    #[test]
    fn blank_filter_values_are_ignored() {
        let filter = ClockFilter::from(ClockFilterParams {
            email: Some(String::new()),
            location: Some("London".to_string()),
        });
        assert_eq!(filter.email, None);
        assert_eq!(filter.location.as_deref(), Some("London"));
    }
}
