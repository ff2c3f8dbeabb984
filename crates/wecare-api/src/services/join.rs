// Join service for business logic

use anyhow::Result;
use bson::{oid::ObjectId, Document};
use std::sync::Arc;

use wecare_core::{sort_joins_by_event_date, DeleteAck, InsertAck, JoinDocument};
use wecare_storage::Database;

pub struct JoinService {
    db: Arc<Database>,
}

impl JoinService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Stores the submitted join document verbatim. Nothing prevents a user
    /// from joining the same event twice.
    pub async fn create(&self, document: Document) -> Result<InsertAck> {
        let id = self.db.insert_join(document).await?;
        Ok(InsertAck::new(id))
    }

    /// A user's joins ordered by the event-date snapshot; joins without an
    /// interpretable date come last.
    pub async fn for_user(&self, email: &str) -> Result<Vec<JoinDocument>> {
        let mut joins = self.db.joins_by_user(email).await?;
        sort_joins_by_event_date(&mut joins);
        Ok(joins)
    }

    /// Join records matching both the event and the user. Non-empty means
    /// the user has joined.
    pub async fn status(&self, user_email: &str, event_id: &str) -> Result<Vec<JoinDocument>> {
        self.db.joins_for_event_user(event_id, user_email).await
    }

    pub async fn delete(&self, id: ObjectId) -> Result<DeleteAck> {
        let result = self.db.delete_join(id).await?;
        Ok(DeleteAck::new(result.deleted_count))
    }
}
