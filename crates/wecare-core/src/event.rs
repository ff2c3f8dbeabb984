// Event document model (the `events` collection)

use bson::{Bson, Document};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dates::event_timestamp;

/// A stored event, as created by a user.
///
/// Events are open documents: clients may attach any fields at creation time
/// and nothing beyond `_id` uniqueness is enforced. The well-known fields
/// (`title`, `category`, `creatorEmail`, plus whatever else the client sent)
/// travel untouched in `fields`; `_id` and `eventDate` get fields of their
/// own because the service interprets them, but both stay open values. A
/// store-assigned ObjectId `_id` serializes as 24-char hex on the wire; a
/// client-supplied `_id` of any other type is kept and echoed verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EventDocument {
    /// Document id, assigned by the store unless the creating client sent
    /// its own `_id`.
    #[serde(rename = "_id", serialize_with = "crate::ids::serialize_id")]
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub id: Bson,

    /// Client-supplied date value, stored verbatim. Usually an ISO-8601
    /// string but nothing stops a client from sending a number or junk;
    /// values that cannot be interpreted as a timestamp never count as
    /// upcoming.
    #[serde(rename = "eventDate", default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub event_date: Option<Bson>,

    /// Everything else: `title`, `category`, `creatorEmail` and any extra
    /// fields the client attached.
    #[serde(flatten)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub fields: Document,
}

impl EventDocument {
    /// The event's date as a UTC timestamp, if the stored value parses.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.event_date.as_ref().and_then(event_timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::{doc, oid::ObjectId};

    #[test]
    fn deserializes_open_document_from_bson() {
        let id = ObjectId::new();
        let doc = doc! {
            "_id": id,
            "title": "Spring Festival",
            "category": "Music",
            "eventDate": "2030-05-01T18:00:00Z",
            "creatorEmail": "alice@example.com",
            "venue": "Town Hall",
        };

        let event: EventDocument = bson::from_document(doc).expect("should deserialize");
        assert_eq!(event.id, Bson::ObjectId(id));
        assert_eq!(
            event.event_date,
            Some(Bson::String("2030-05-01T18:00:00Z".into()))
        );
        assert_eq!(event.fields.get_str("title").unwrap(), "Spring Festival");
        assert_eq!(event.fields.get_str("venue").unwrap(), "Town Hall");
    }

    #[test]
    fn serializes_id_as_hex_string() {
        let id = ObjectId::new();
        let event = EventDocument {
            id: id.into(),
            event_date: Some(Bson::String("2030-05-01".into())),
            fields: doc! { "title": "Autumn Fair" },
        };

        let json = serde_json::to_value(&event).expect("should serialize");
        assert_eq!(json["_id"], serde_json::json!(id.to_hex()));
        assert_eq!(json["eventDate"], serde_json::json!("2030-05-01"));
        assert_eq!(json["title"], serde_json::json!("Autumn Fair"));
    }

    #[test]
    fn client_supplied_id_survives_readback_verbatim() {
        let event: EventDocument = bson::from_document(doc! {
            "_id": "custom-id",
            "title": "Legacy Import",
            "eventDate": "2030-05-01",
        })
        .expect("should deserialize");

        assert_eq!(event.id, Bson::String("custom-id".into()));
        assert!(event.timestamp().is_some());

        let json = serde_json::to_value(&event).expect("should serialize");
        assert_eq!(json["_id"], serde_json::json!("custom-id"));
    }

    #[test]
    fn missing_event_date_is_none_and_not_serialized() {
        let doc = doc! { "_id": ObjectId::new(), "title": "No Date" };
        let event: EventDocument = bson::from_document(doc).expect("should deserialize");
        assert!(event.event_date.is_none());
        assert!(event.timestamp().is_none());

        let json = serde_json::to_value(&event).expect("should serialize");
        assert!(json.get("eventDate").is_none());
    }

    #[test]
    fn timestamp_reflects_parseability() {
        let dated: EventDocument = bson::from_document(doc! {
            "_id": ObjectId::new(),
            "eventDate": "2030-01-01T00:00:00Z",
        })
        .unwrap();
        assert!(dated.timestamp().is_some());

        let junk: EventDocument = bson::from_document(doc! {
            "_id": ObjectId::new(),
            "eventDate": "next Tuesday-ish",
        })
        .unwrap();
        assert!(junk.timestamp().is_none());
    }
}
