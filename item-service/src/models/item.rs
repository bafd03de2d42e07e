use chrono::NaiveDate;
use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// A stored inventory item. Dates are kept as `YYYY-MM-DD` strings so that
/// string comparison in the store is chronological.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub item_name: String,
    pub quantity: i64,
    pub expiry_date: String,
    #[serde(default)]
    pub inserted_date: String,
}

/// The client-writable fields of an item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFields {
    pub name: String,
    pub email: String,
    pub item_name: String,
    pub quantity: i64,
    pub expiry_date: NaiveDate,
}

impl Item {
    pub fn new(fields: ItemFields, inserted_on: NaiveDate) -> Self {
        Self {
            id: None,
            name: fields.name,
            email: fields.email,
            item_name: fields.item_name,
            quantity: fields.quantity,
            expiry_date: iso_date(fields.expiry_date),
            inserted_date: iso_date(inserted_on),
        }
    }

    /// Overwrite every writable field. `id` and `inserted_date` are untouched.
    pub fn apply(&mut self, fields: &ItemFields) {
        self.name = fields.name.clone();
        self.email = fields.email.clone();
        self.item_name = fields.item_name.clone();
        self.quantity = fields.quantity;
        self.expiry_date = iso_date(fields.expiry_date);
    }
}

impl ItemFields {
    /// `$set` update writing every field, changed or not.
    pub fn to_set_document(&self) -> Document {
        doc! {
            "$set": {
                "name": self.name.as_str(),
                "email": self.email.as_str(),
                "item_name": self.item_name.as_str(),
                "quantity": self.quantity,
                "expiry_date": iso_date(self.expiry_date),
            }
        }
    }
}

/// Conjunctive item filter. `None` criteria are left out of the query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFilter {
    pub email: Option<String>,
    pub expiry_after: Option<NaiveDate>,
    pub inserted_after: Option<NaiveDate>,
    pub min_quantity: Option<i64>,
}

impl ItemFilter {
    pub fn to_document(&self) -> Document {
        let mut query = doc! {};

        if let Some(email) = &self.email {
            query.insert("email", email.as_str());
        }
        if let Some(date) = self.expiry_after {
            query.insert("expiry_date", doc! { "$gt": iso_date(date) });
        }
        if let Some(date) = self.inserted_after {
            query.insert("inserted_date", doc! { "$gt": iso_date(date) });
        }
        if let Some(quantity) = self.min_quantity {
            query.insert("quantity", doc! { "$gte": quantity });
        }

        query
    }

    /// In-process equivalent of [`ItemFilter::to_document`].
    pub fn matches(&self, item: &Item) -> bool {
        if let Some(email) = &self.email {
            if &item.email != email {
                return false;
            }
        }
        if let Some(date) = self.expiry_after {
            if item.expiry_date.as_str() <= iso_date(date).as_str() {
                return false;
            }
        }
        if let Some(date) = self.inserted_after {
            if item.inserted_date.as_str() <= iso_date(date).as_str() {
                return false;
            }
        }
        if let Some(quantity) = self.min_quantity {
            if item.quantity < quantity {
                return false;
            }
        }
        true
    }
}

/// One row of the per-email aggregation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailCount {
    pub email: String,
    pub count: i64,
}

pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
