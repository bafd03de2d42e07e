use chrono::NaiveDate;
use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// A user clock-in record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClockRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub location: String,
    #[serde(default)]
    pub inserted_date: String,
}

impl ClockRecord {
    pub fn new(email: String, location: String, inserted_on: NaiveDate) -> Self {
        Self {
            id: None,
            email,
            location,
            inserted_date: inserted_on.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn apply(&mut self, patch: &ClockPatch) {
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(location) = &patch.location {
            self.location = location.clone();
        }
    }
}

/// Partial update. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClockPatch {
    pub email: Option<String>,
    pub location: Option<String>,
}

impl ClockPatch {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.location.is_none()
    }

    /// `$set` update for the present fields, or `None` when there is nothing
    /// to write.
    pub fn to_set_document(&self) -> Option<Document> {
        let mut set = doc! {};
        if let Some(email) = &self.email {
            set.insert("email", email.as_str());
        }
        if let Some(location) = &self.location {
            set.insert("location", location.as_str());
        }

        if set.is_empty() {
            None
        } else {
            Some(doc! { "$set": set })
        }
    }
}

/// Equality filter. `None` criteria are left out of the query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClockFilter {
    pub email: Option<String>,
    pub location: Option<String>,
}

impl ClockFilter {
    pub fn to_document(&self) -> Document {
        let mut query = doc! {};
        if let Some(email) = &self.email {
            query.insert("email", email.as_str());
        }
        if let Some(location) = &self.location {
            query.insert("location", location.as_str());
        }
        query
    }

    pub fn matches(&self, record: &ClockRecord) -> bool {
        self.email.as_ref().map_or(true, |e| e == &record.email)
            && self.location.as_ref().map_or(true, |l| l == &record.location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ClockRecord {
        ClockRecord::new(
            "ada@example.com".to_string(),
            "London".to_string(),
            NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
        )
    }

    #[test]
    fn empty_patch_has_no_update_document() {
        let patch = ClockPatch::default();
        assert!(patch.is_empty());
        assert!(patch.to_set_document().is_none());
    }

    #[test]
    fn patch_sets_only_present_fields() {
        let patch = ClockPatch {
            email: None,
            location: Some("Paris".to_string()),
        };
        let update = patch.to_set_document().unwrap();
        assert_eq!(update, doc! { "$set": { "location": "Paris" } });

        let mut r = record();
        r.apply(&patch);
        assert_eq!(r.location, "Paris");
        assert_eq!(r.email, "ada@example.com");
        assert_eq!(r.inserted_date, "2026-10-17");
    }

    #[test]
    fn filter_is_conjunctive_equality() {
        let filter = ClockFilter {
            email: Some("ada@example.com".to_string()),
            location: Some("London".to_string()),
        };
        assert_eq!(
            filter.to_document(),
            doc! { "email": "ada@example.com", "location": "London" }
        );
        assert!(filter.matches(&record()));

        let elsewhere = ClockFilter {
            location: Some("Paris".to_string()),
            ..Default::default()
        };
        assert!(!elsewhere.matches(&record()));
        assert!(ClockFilter::default().to_document().is_empty());
    }
}
