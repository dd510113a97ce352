use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product record as persisted by the simulated store, JSON-encoded
/// under `product:<id>`. `updated_at` stays absent until the first update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub category: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A candidate record as collected by a form: every user-supplied field is a
/// raw string until validation parses it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub price: String,
    pub quantity: String,
    pub description: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i64,
    pub product_name: String,
    pub price: f64,
    pub quantity: i32,
    pub category: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub content: Vec<ProductDto>,
    pub total_elements: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub product_name: String,
    pub price: f64,
    pub quantity: i32,
    pub category: String,
    pub description: String,
}
