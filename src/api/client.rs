use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ApiConfig;
use crate::error::{AppError, Result};
use crate::models::{
    AuthResponse, LoginRequest, ProductDto, ProductPage, ProductRequest, RegisterRequest,
};
use crate::storage::{KeyValueStore, TOKEN_KEY};

/// HTTP client for the real backend. Mutually exclusive with the simulated
/// services: the UI imports one or the other. The bearer token is read from
/// the shared store on every request, so a login through either path
/// authorizes this client.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn KeyValueStore>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            store,
        })
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse> {
        let body = LoginRequest {
            user_name: username.to_string(),
            password: password.to_string(),
        };
        let response: AuthResponse = self.post_json("/auth/login", &body, "Login failed").await?;

        if let Some(token) = &response.token {
            self.store.set(TOKEN_KEY, token.clone());
        }

        Ok(response)
    }

    pub async fn logout(&self) -> Result<()> {
        let response = self
            .authorized(self.http.post(self.url("/auth/logout")))
            .send()
            .await
            .map_err(|_| AppError::RequestFailed("Logout failed".to_string()))?;
        Self::check_status(response, "Logout failed").await?;

        self.store.remove(TOKEN_KEY);
        Ok(())
    }

    pub async fn register(&self, username: &str, password: &str, name: &str) -> Result<AuthResponse> {
        let body = RegisterRequest {
            user_name: username.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        };
        self.post_json("/auth/register", &body, "Registration failed").await
    }

    pub async fn get_all_products(&self, page: u32, size: u32) -> Result<ProductPage> {
        let path = format!("/products?page={}&size={}", page, size);
        self.get_json(&path, "Failed to fetch products").await
    }

    pub async fn get_product_by_id(&self, id: i64) -> Result<ProductDto> {
        self.get_json(&format!("/products/{}", id), "Failed to fetch product").await
    }

    pub async fn create_product(&self, product: &ProductRequest) -> Result<ProductDto> {
        self.post_json("/products", product, "Failed to create product").await
    }

    pub async fn update_product(&self, id: i64, product: &ProductRequest) -> Result<ProductDto> {
        let response = self
            .authorized(self.http.put(self.url(&format!("/products/{}", id))))
            .json(product)
            .send()
            .await
            .map_err(|_| AppError::RequestFailed("Failed to update product".to_string()))?;
        Self::parse_json(response, "Failed to update product").await
    }

    pub async fn delete_product(&self, id: i64) -> Result<()> {
        let response = self
            .authorized(self.http.delete(self.url(&format!("/products/{}", id))))
            .send()
            .await
            .map_err(|_| AppError::RequestFailed("Failed to delete product".to_string()))?;
        // 204 No Content on success; only the status matters.
        Self::check_status(response, "Failed to delete product").await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.store.get(TOKEN_KEY) {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, fallback: &str) -> Result<T> {
        let response = self
            .authorized(self.http.get(self.url(path)))
            .send()
            .await
            .map_err(|_| AppError::RequestFailed(fallback.to_string()))?;
        Self::parse_json(response, fallback).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B, fallback: &str) -> Result<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let response = self
            .authorized(self.http.post(self.url(path)))
            .json(body)
            .send()
            .await
            .map_err(|_| AppError::RequestFailed(fallback.to_string()))?;
        Self::parse_json(response, fallback).await
    }

    async fn parse_json<T: DeserializeOwned>(
        response: reqwest::Response,
        fallback: &str,
    ) -> Result<T> {
        let response = Self::check_status(response, fallback).await?;
        response
            .json::<T>()
            .await
            .map_err(|_| AppError::RequestFailed(fallback.to_string()))
    }

    // Non-2xx responses surface the server's `message` field when the body
    // carries one, otherwise the per-operation fallback string.
    async fn check_status(
        response: reqwest::Response,
        fallback: &str,
    ) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_else(|| fallback.to_string());
        tracing::debug!("Request failed with {}: {}", status, message);

        Err(AppError::RequestFailed(message))
    }
}
