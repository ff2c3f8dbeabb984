// Write acknowledgements returned to API clients

use bson::Bson;
use serde::{Deserialize, Serialize};

/// Acknowledgement for a successful insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    /// The new document's `_id`: hex for store-assigned ObjectIds, verbatim
    /// for client-supplied ids of other types.
    #[serde(serialize_with = "crate::ids::serialize_id")]
    #[cfg_attr(feature = "openapi", schema(value_type = String))]
    pub inserted_id: Bson,
}

impl InsertAck {
    pub fn new(id: Bson) -> Self {
        Self {
            acknowledged: true,
            inserted_id: id,
        }
    }
}

/// Acknowledgement for a delete, whether or not anything matched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteAck {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

/// Acknowledgement for an update, whether or not anything matched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

impl UpdateAck {
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::oid::ObjectId;

    #[test]
    fn insert_ack_wire_shape() {
        let id = ObjectId::new();
        let json = serde_json::to_value(InsertAck::new(id.into())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "acknowledged": true, "insertedId": id.to_hex() })
        );
    }

    #[test]
    fn insert_ack_echoes_client_supplied_ids() {
        let json = serde_json::to_value(InsertAck::new(Bson::String("custom-id".into()))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "acknowledged": true, "insertedId": "custom-id" })
        );
    }

    #[test]
    fn delete_ack_wire_shape() {
        let json = serde_json::to_value(DeleteAck::new(0)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "acknowledged": true, "deletedCount": 0 })
        );
    }

    #[test]
    fn update_ack_wire_shape() {
        let json = serde_json::to_value(UpdateAck::new(1, 0)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "acknowledged": true,
                "matchedCount": 1,
                "modifiedCount": 0
            })
        );
    }
}
