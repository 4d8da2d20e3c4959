use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::Query,
};

#[async_trait]
pub trait QueryRepository: Send + Sync {
    async fn create(&self, query: Query) -> AppResult<Query>;
    /// Newest first.
    async fn find_all(&self) -> AppResult<Vec<Query>>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Query>>;
    async fn delete(&self, id: &str) -> AppResult<()>;
}

pub struct MongoQueryRepository {
    collection: Collection<Query>,
}

impl MongoQueryRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("queries");
        Self { collection }
    }
}

#[async_trait]
impl QueryRepository for MongoQueryRepository {
    async fn create(&self, query: Query) -> AppResult<Query> {
        self.collection.insert_one(&query).await?;
        Ok(query)
    }

    async fn find_all(&self) -> AppResult<Vec<Query>> {
        let queries = self
            .collection
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(queries)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Query>> {
        let query = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(query)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound("Query not found".to_string()));
        }

        Ok(())
    }
}
