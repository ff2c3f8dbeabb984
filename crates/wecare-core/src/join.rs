// Join document model (the `event-joins` collection)

use bson::{Bson, Document};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dates::event_timestamp;

/// A user's registration for an event.
///
/// Joins are denormalized snapshots: the client sends the event's id, name
/// and date alongside the attendee's details, and the document is stored as
/// submitted. Join-status lookups match on the `eventId` and `userEmail`
/// pair, both of which live in `fields` like every other client-supplied
/// value; cancellation deletes a join by its own `_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct JoinDocument {
    /// Document id, assigned by the store unless the joining client sent
    /// its own `_id`.
    #[serde(rename = "_id", serialize_with = "crate::ids::serialize_id")]
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub id: Bson,

    /// Snapshot of the event's date at join time, stored verbatim.
    #[serde(rename = "eventDate", default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>))]
    pub event_date: Option<Bson>,

    /// Everything else: `eventId`, `eventName`, `userEmail`, `userName` and
    /// any extra fields the client attached.
    #[serde(flatten)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub fields: Document,
}

impl JoinDocument {
    /// The joined event's date as a UTC timestamp, if the snapshot parses.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.event_date.as_ref().and_then(event_timestamp)
    }
}
