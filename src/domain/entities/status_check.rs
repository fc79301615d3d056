use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Client heartbeat kept for older frontends that still post to `/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCheck {
    id: Uuid,
    client_name: String,
    timestamp: DateTime<Utc>,
}

impl StatusCheck {
    pub fn new(client_name: String) -> Self {
        Self::restore(Uuid::new_v4(), client_name, Utc::now())
    }

    pub fn restore(id: Uuid, client_name: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            client_name,
            timestamp,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
