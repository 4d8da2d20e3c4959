use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(sender: Sender, text: &str) -> Self {
        Message {
            sender,
            text: text.to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Chat {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: String, // Owner id; every lookup filters on it
    #[serde(default)]
    pub title: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Chat {
    pub fn new(owner_id: &str, title: &str, first_message: Message) -> Self {
        Chat {
            id: Uuid::new_v4().to_string(),
            user: owner_id.to_string(),
            title: title.to_string(),
            messages: vec![first_message],
            created_at: Some(Utc::now()),
        }
    }
}
