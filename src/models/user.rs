use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub user_name: String,
    pub password: String,
    pub name: String,
}

/// Backend login/register response, passed through as-is. The only field the
/// client acts on is `token`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub success: Option<bool>,
    pub token: Option<String>,
    pub user: Option<serde_json::Value>,
    pub message: Option<String>,
}
