//! User Model

use serde::{Deserialize, Serialize};

/// Storefront user, created on first sign-in with the identity provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    /// External identity reference, immutable after creation
    pub uid: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub photo_url: Option<String>,
    pub is_admin: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create user payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub uid: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub photo_url: Option<String>,
}

/// Update user profile payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub photo_url: Option<String>,
}
