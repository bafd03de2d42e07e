use chrono::NaiveDate;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use service_core::utils::serialize_object_id;
use validator::Validate;

use crate::models::{Item, ItemFields, ItemFilter};

/// Body of `POST /create_item/` and `PUT /items/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct ItemRequest {
    pub name: String,
    pub email: String,
    pub item_name: String,
    pub quantity: i64,
    pub expiry_date: NaiveDate,
}

impl From<ItemRequest> for ItemFields {
    fn from(req: ItemRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            item_name: req.item_name,
            quantity: req.quantity,
            expiry_date: req.expiry_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    #[serde(rename = "_id", serialize_with = "serialize_object_id")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub item_name: String,
    pub quantity: i64,
    pub expiry_date: String,
    pub inserted_date: String,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            email: item.email,
            item_name: item.item_name,
            quantity: item.quantity,
            expiry_date: item.expiry_date,
            inserted_date: item.inserted_date,
        }
    }
}

/// Query string of `GET /items/filter`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ItemFilterParams {
    pub email: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub insert_date: Option<NaiveDate>,
    pub quantity: Option<i64>,
}

impl From<ItemFilterParams> for ItemFilter {
    fn from(params: ItemFilterParams) -> Self {
        Self {
            email: params.email.filter(|e| !e.is_empty()),
            expiry_after: params.expiry_date,
            inserted_after: params.insert_date,
            min_quantity: params.quantity,
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
    fn response_renders_id_as_hex_string() {
        let id = ObjectId::parse_str("65f0c0ffee0000000000abcd").unwrap();
        let item = Item {
            id: Some(id),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            item_name: "milk".to_string(),
            quantity: 2,
            expiry_date: "2026-11-01".to_string(),
            inserted_date: "2026-10-17".to_string(),
        };

        let json = serde_json::to_value(ItemResponse::from(item)).unwrap();
        assert_eq!(json["_id"], "65f0c0ffee0000000000abcd");
        assert_eq!(json["inserted_date"], "2026-10-17");
    }

    #[test]
    fn blank_email_is_not_a_criterion() {
        let filter = ItemFilter::from(ItemFilterParams {
            email: Some(String::new()),
            quantity: Some(0),
            ..Default::default()
        });
        assert_eq!(filter.email, None);
        assert_eq!(filter.min_quantity, Some(0));
    }

    #[test]
    fn request_rejects_non_iso_expiry() {
        let parsed = serde_json::from_str::<ItemRequest>(
            r#"{"name":"a","email":"b","item_name":"c","quantity":1,"expiry_date":"01/11/2026"}"#,
        );
        assert!(parsed.is_err());
    }
}
