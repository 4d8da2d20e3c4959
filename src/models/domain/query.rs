use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A contact/support message left through the public form.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Query {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub query: String,
    pub created_at: DateTime<Utc>,
}

impl Query {
    pub fn new(name: &str, email: &str, query: &str) -> Self {
        Query {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            query: query.to_string(),
            created_at: Utc::now(),
        }
    }
}
