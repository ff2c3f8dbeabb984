// Event service for business logic

use anyhow::Result;
use bson::{oid::ObjectId, Document};
use chrono::Utc;
use std::sync::Arc;

use wecare_core::{title_pattern, upcoming_events, DeleteAck, EventDocument, InsertAck, UpdateAck};
use wecare_storage::Database;

pub struct EventService {
    db: Arc<Database>,
}

impl EventService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Stores the submitted document verbatim.
    pub async fn create(&self, document: Document) -> Result<InsertAck> {
        let id = self.db.insert_event(document).await?;
        Ok(InsertAck::new(id))
    }

    /// Events dated strictly after now, earliest first.
    pub async fn list_upcoming(&self) -> Result<Vec<EventDocument>> {
        let events = self.db.list_events().await?;
        Ok(upcoming_events(events, Utc::now()))
    }

    /// Title search over the upcoming listing. A blank phrase matches
    /// everything, making this equivalent to `list_upcoming`.
    pub async fn search(&self, phrase: &str) -> Result<Vec<EventDocument>> {
        let events = match title_pattern(phrase) {
            Some(pattern) => self.db.search_events(&pattern).await?,
            None => self.db.list_events().await?,
        };
        Ok(upcoming_events(events, Utc::now()))
    }

    /// Exact category match, unfiltered and unsorted.
    pub async fn in_category(&self, category: &str) -> Result<Vec<EventDocument>> {
        self.db.events_in_category(category).await
    }

    /// Every event created under the given email, unfiltered and unsorted.
    pub async fn by_creator(&self, email: &str) -> Result<Vec<EventDocument>> {
        self.db.events_by_creator(email).await
    }

    pub async fn get(&self, id: ObjectId) -> Result<Option<EventDocument>> {
        self.db.find_event(id).await
    }

    /// `$set`-merges the submitted fields into the stored document.
    pub async fn update(&self, id: ObjectId, changes: Document) -> Result<UpdateAck> {
        let result = self.db.update_event(id, changes).await?;
        Ok(UpdateAck::new(result.matched_count, result.modified_count))
    }

    pub async fn delete(&self, id: ObjectId) -> Result<DeleteAck> {
        let result = self.db.delete_event(id).await?;
        Ok(DeleteAck::new(result.deleted_count))
    }
}
