use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::user_admin;

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAdminInput {
    pub email: String,
    pub full_name: String,
    pub password: String,
}

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginAdminInput {
    pub email: String,
    pub password: String,
}

/// Admin as exposed to clients; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    pub user_admin_id: Uuid,
    pub email: String,
    pub full_name: String,
}

impl From<user_admin::Model> for AdminResponse {
    fn from(m: user_admin::Model) -> Self {
        Self { user_admin_id: m.id, email: m.email, full_name: m.full_name }
    }
}
