use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::StatusCheck;

#[derive(Debug, Deserialize)]
pub struct StatusCheckCreateDto {
    pub client_name: String,
}

#[derive(Debug, Serialize)]
pub struct StatusCheckDto {
    pub id: Uuid,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

impl From<StatusCheck> for StatusCheckDto {
    fn from(status_check: StatusCheck) -> Self {
        Self {
            id: status_check.id(),
            client_name: status_check.client_name().to_string(),
            timestamp: status_check.timestamp(),
        }
    }
}
