use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{Chat, Message},
};

/// Every lookup is keyed by chat id and owner id together, so a chat that
/// belongs to someone else is indistinguishable from a missing one.
#[async_trait]
pub trait ChatRepository: Send + Sync {
    async fn create(&self, chat: Chat) -> AppResult<Chat>;
    async fn push_message(&self, chat_id: &str, owner_id: &str, message: Message) -> AppResult<Chat>;
    async fn find_by_owner(&self, owner_id: &str) -> AppResult<Vec<Chat>>;
    async fn find_for_owner(&self, chat_id: &str, owner_id: &str) -> AppResult<Option<Chat>>;
    async fn delete_for_owner(&self, chat_id: &str, owner_id: &str) -> AppResult<()>;
    async fn delete_all_for_owner(&self, owner_id: &str) -> AppResult<u64>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub fn chat_not_found() -> AppError {
    AppError::NotFound("Chat not found".to_string())
}

pub struct MongoChatRepository {
    collection: Collection<Chat>,
}

impl MongoChatRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("chats");
        Self { collection }
    }
}

#[async_trait]
impl ChatRepository for MongoChatRepository {
    async fn create(&self, chat: Chat) -> AppResult<Chat> {
        self.collection.insert_one(&chat).await?;
        Ok(chat)
    }

    async fn push_message(&self, chat_id: &str, owner_id: &str, message: Message) -> AppResult<Chat> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection
            .find_one_and_update(
                doc! { "_id": chat_id, "user": owner_id },
                doc! { "$push": { "messages": to_bson(&message)? } },
            )
            .with_options(options)
            .await?
            .ok_or_else(chat_not_found)
    }

    async fn find_by_owner(&self, owner_id: &str) -> AppResult<Vec<Chat>> {
        let chats = self
            .collection
            .find(doc! { "user": owner_id })
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(chats)
    }

    async fn find_for_owner(&self, chat_id: &str, owner_id: &str) -> AppResult<Option<Chat>> {
        let chat = self
            .collection
            .find_one(doc! { "_id": chat_id, "user": owner_id })
            .await?;
        Ok(chat)
    }

    async fn delete_for_owner(&self, chat_id: &str, owner_id: &str) -> AppResult<()> {
        let result = self
            .collection
            .delete_one(doc! { "_id": chat_id, "user": owner_id })
            .await?;

        if result.deleted_count == 0 {
            return Err(chat_not_found());
        }

        Ok(())
    }

    async fn delete_all_for_owner(&self, owner_id: &str) -> AppResult<u64> {
        let result = self.collection.delete_many(doc! { "user": owner_id }).await?;
        Ok(result.deleted_count)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let owner_index = IndexModel::builder()
            .keys(doc! { "user": 1 })
            .options(IndexOptions::builder().name("user".to_string()).build())
            .build();

        self.collection.create_index(owner_index).await?;
        log::info!("Created owner index on chats.user");

        Ok(())
    }
}
