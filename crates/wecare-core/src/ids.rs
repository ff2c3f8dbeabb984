// Wire form of document ids

use bson::Bson;
use serde::{Serialize, Serializer};

/// Serializes a document `_id` the way the store's driver reports it:
/// store-assigned ObjectIds as their 24-character hex form, client-supplied
/// ids of any other type verbatim.
pub fn serialize_id<S>(id: &Bson, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match id {
        Bson::ObjectId(oid) => serializer.serialize_str(&oid.to_hex()),
        other => other.serialize(serializer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::oid::ObjectId;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Wire {
        #[serde(serialize_with = "serialize_id")]
        id: Bson,
    }

    #[test]
    fn object_ids_become_hex_strings() {
        let oid = ObjectId::new();
        let json = serde_json::to_value(Wire { id: oid.into() }).unwrap();
        assert_eq!(json["id"], serde_json::json!(oid.to_hex()));
    }

    #[test]
    fn other_id_types_pass_through() {
        let json = serde_json::to_value(Wire {
            id: Bson::String("custom-id".into()),
        })
        .unwrap();
        assert_eq!(json["id"], serde_json::json!("custom-id"));

        let json = serde_json::to_value(Wire { id: Bson::Int32(7) }).unwrap();
        assert_eq!(json["id"], serde_json::json!(7));
    }
}
