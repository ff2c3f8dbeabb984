// Collection operations for the two weCare collections

use anyhow::{Context, Result};
use bson::{doc, oid::ObjectId, Bson, Document};
use futures::stream::TryStreamExt;
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::results::{DeleteResult, UpdateResult};
use mongodb::{Client, Collection};

use wecare_core::{EventDocument, JoinDocument};

const EVENTS: &str = "events";
const JOINS: &str = "event-joins";

#[derive(Clone)]
pub struct Database {
    db: mongodb::Database,
}

impl Database {
    pub fn new(db: mongodb::Database) -> Self {
        Self { db }
    }

    /// Create a database handle from a connection string.
    ///
    /// The driver connects lazily, so this validates the URI but does not
    /// reach the server; the first operation does.
    pub async fn from_uri(uri: &str, db_name: &str) -> Result<Self> {
        let mut options = ClientOptions::parse(uri)
            .await
            .context("invalid MongoDB connection string")?;
        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );
        let client = Client::with_options(options).context("invalid MongoDB client options")?;
        Ok(Self::new(client.database(db_name)))
    }

    fn events(&self) -> Collection<EventDocument> {
        self.db.collection(EVENTS)
    }

    fn joins(&self) -> Collection<JoinDocument> {
        self.db.collection(JOINS)
    }

    // ============================================
    // Events
    // ============================================

    /// Insert a client-supplied event document verbatim. The returned id is
    /// store-assigned unless the body carried its own `_id`.
    pub async fn insert_event(&self, document: Document) -> Result<Bson> {
        let result = self
            .db
            .collection::<Document>(EVENTS)
            .insert_one(document)
            .await?;
        Ok(result.inserted_id)
    }

    pub async fn list_events(&self) -> Result<Vec<EventDocument>> {
        let cursor = self.events().find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn find_event(&self, id: ObjectId) -> Result<Option<EventDocument>> {
        Ok(self.events().find_one(doc! { "_id": id }).await?)
    }

    /// Case-insensitive title match against a prebuilt regex source.
    pub async fn search_events(&self, title_pattern: &str) -> Result<Vec<EventDocument>> {
        let filter = doc! { "title": { "$regex": title_pattern, "$options": "i" } };
        let cursor = self.events().find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    /// Exact, case-sensitive category match.
    pub async fn events_in_category(&self, category: &str) -> Result<Vec<EventDocument>> {
        let cursor = self.events().find(doc! { "category": category }).await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn events_by_creator(&self, email: &str) -> Result<Vec<EventDocument>> {
        let cursor = self.events().find(doc! { "creatorEmail": email }).await?;
        Ok(cursor.try_collect().await?)
    }

    /// Merge the provided fields into the matched event via `$set`.
    pub async fn update_event(&self, id: ObjectId, changes: Document) -> Result<UpdateResult> {
        let result = self
            .db
            .collection::<Document>(EVENTS)
            .update_one(doc! { "_id": id }, doc! { "$set": changes })
            .await?;
        Ok(result)
    }

    pub async fn delete_event(&self, id: ObjectId) -> Result<DeleteResult> {
        Ok(self.events().delete_one(doc! { "_id": id }).await?)
    }

    // ============================================
    // Joins
    // ============================================

    /// Insert a client-supplied join document verbatim. The returned id is
    /// store-assigned unless the body carried its own `_id`.
    pub async fn insert_join(&self, document: Document) -> Result<Bson> {
        let result = self
            .db
            .collection::<Document>(JOINS)
            .insert_one(document)
            .await?;
        Ok(result.inserted_id)
    }

    pub async fn joins_by_user(&self, email: &str) -> Result<Vec<JoinDocument>> {
        let cursor = self.joins().find(doc! { "userEmail": email }).await?;
        Ok(cursor.try_collect().await?)
    }

    /// Joins matching both the event id and the attendee's email.
    pub async fn joins_for_event_user(
        &self,
        event_id: &str,
        email: &str,
    ) -> Result<Vec<JoinDocument>> {
        let filter = doc! { "eventId": event_id, "userEmail": email };
        let cursor = self.joins().find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn delete_join(&self, id: ObjectId) -> Result<DeleteResult> {
        Ok(self.joins().delete_one(doc! { "_id": id }).await?)
    }
}
