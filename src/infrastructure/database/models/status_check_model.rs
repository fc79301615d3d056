use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::StatusCheck;
use crate::infrastructure::database::schema::status_checks;

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = status_checks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StatusCheckModel {
    pub id: Uuid,
    pub client_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&StatusCheck> for StatusCheckModel {
    fn from(status_check: &StatusCheck) -> Self {
        Self {
            id: status_check.id(),
            client_name: status_check.client_name().to_string(),
            created_at: status_check.timestamp(),
        }
    }
}

impl From<StatusCheckModel> for StatusCheck {
    fn from(model: StatusCheckModel) -> Self {
        StatusCheck::restore(model.id, model.client_name, model.created_at)
    }
}
