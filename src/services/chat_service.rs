use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Chat, Message, Sender},
        dto::request::{ChatMessageRequest, NewChatRequest},
    },
    repositories::{chat_repository::chat_not_found, ChatRepository},
};

pub struct ChatService {
    chats: Arc<dyn ChatRepository>,
}

fn required_sender(sender: Option<Sender>) -> AppResult<Sender> {
    sender.ok_or_else(|| AppError::BadRequest("sender is required".to_string()))
}

impl ChatService {
    pub fn new(chats: Arc<dyn ChatRepository>) -> Self {
        Self { chats }
    }

    pub async fn create(&self, owner_id: &str, request: NewChatRequest) -> AppResult<Chat> {
        request.validate()?;
        let sender = required_sender(request.sender)?;

        let chat = Chat::new(owner_id, &request.title, Message::new(sender, &request.text));
        let chat = self.chats.create(chat).await?;

        log::info!("Created chat {} for user {}", chat.id, owner_id);
        Ok(chat)
    }

    pub async fn append_message(
        &self,
        chat_id: &str,
        owner_id: &str,
        request: ChatMessageRequest,
    ) -> AppResult<Chat> {
        request.validate()?;
        let sender = required_sender(request.sender)?;

        self.chats
            .push_message(chat_id, owner_id, Message::new(sender, &request.text))
            .await
    }

    pub async fn list_for_owner(&self, owner_id: &str) -> AppResult<Vec<Chat>> {
        self.chats.find_by_owner(owner_id).await
    }

    pub async fn get(&self, chat_id: &str, owner_id: &str) -> AppResult<Chat> {
        self.chats
            .find_for_owner(chat_id, owner_id)
            .await?
            .ok_or_else(chat_not_found)
    }

    pub async fn delete(&self, chat_id: &str, owner_id: &str) -> AppResult<()> {
        self.chats.delete_for_owner(chat_id, owner_id).await
    }

    /// Zero deleted chats is a success.
    pub async fn delete_all(&self, owner_id: &str) -> AppResult<u64> {
        let deleted = self.chats.delete_all_for_owner(owner_id).await?;
        log::info!("Deleted {} chats for user {}", deleted, owner_id);
        Ok(deleted)
    }
}
