use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{domain::Query, dto::request::QueryRequest},
    repositories::QueryRepository,
};

pub struct QueryService {
    queries: Arc<dyn QueryRepository>,
}

impl QueryService {
    pub fn new(queries: Arc<dyn QueryRepository>) -> Self {
        Self { queries }
    }

    pub async fn submit(&self, request: QueryRequest) -> AppResult<Query> {
        request.validate()?;

        let query = self
            .queries
            .create(Query::new(&request.name, &request.email, &request.query))
            .await?;

        log::info!("Stored query {}", query.id);
        Ok(query)
    }

    pub async fn list(&self) -> AppResult<Vec<Query>> {
        self.queries.find_all().await
    }

    pub async fn get(&self, id: &str) -> AppResult<Query> {
        self.queries
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Query not found".to_string()))
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.queries.delete(id).await?;
        log::info!("Deleted query {}", id);
        Ok(())
    }
}
