use std::sync::Arc;
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::models::{Session, User};
use crate::storage::{KeyValueStore, TOKEN_KEY, USER_KEY};

const LOGIN_DELAY: Duration = Duration::from_millis(500);
const LOGOUT_DELAY: Duration = Duration::from_millis(200);

struct MockUser {
    id: i32,
    email: &'static str,
    password: &'static str,
    name: &'static str,
    role: &'static str,
}

const MOCK_USERS: [MockUser; 2] = [
    MockUser {
        id: 1,
        email: "test@example.com",
        password: "password123",
        name: "Test User",
        role: "user",
    },
    MockUser {
        id: 2,
        email: "admin@example.com",
        password: "admin123",
        name: "Admin User",
        role: "admin",
    },
];

/// Simulated authentication against a fixed mock-user table. The token and
/// cached user live in the same store the product records do.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn KeyValueStore>,
}

impl AuthService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        tokio::time::sleep(LOGIN_DELAY).await;

        if email.is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "Email và mật khẩu không được để trống".to_string(),
            ));
        }
        if !email.contains('@') {
            return Err(AppError::Validation("Email không hợp lệ".to_string()));
        }

        let account = MOCK_USERS
            .iter()
            .find(|user| user.email == email && user.password == password)
            .ok_or_else(|| {
                AppError::Unauthorized("Email hoặc mật khẩu không đúng".to_string())
            })?;

        let user = User {
            id: account.id,
            email: account.email.to_string(),
            name: account.name.to_string(),
            role: account.role.to_string(),
        };
        let token = format!("mock-jwt-token-{}", account.id);

        self.store.set(TOKEN_KEY, token.clone());
        self.store.set(USER_KEY, serde_json::to_string(&user)?);
        tracing::info!("User {} logged in", user.email);

        Ok(Session { token, user })
    }

    pub async fn logout(&self) {
        tokio::time::sleep(LOGOUT_DELAY).await;

        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_KEY);
        tracing::info!("Session cleared");
    }

    pub fn current_user(&self) -> Option<User> {
        let json = self.store.get(USER_KEY)?;
        serde_json::from_str(&json).ok()
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.get(TOKEN_KEY).is_some()
    }
}
