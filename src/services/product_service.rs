use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::error::{AppError, Result};
use crate::models::{Product, ProductDraft};
use crate::storage::{product_key, KeyValueStore, PRODUCT_KEY_PREFIX};
use crate::validation::validate_product;

// Artificial round-trip latency per operation, matching the remote API this
// layer stands in for.
const LIST_DELAY: Duration = Duration::from_millis(300);
const GET_DELAY: Duration = Duration::from_millis(200);
const WRITE_DELAY: Duration = Duration::from_millis(500);
const DELETE_DELAY: Duration = Duration::from_millis(300);

const NOT_FOUND_MESSAGE: &str = "Không tìm thấy sản phẩm";

/// Simulated product API over an injected key-value store. Records are
/// persisted as JSON under `product:<id>` only after passing full validation.
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn KeyValueStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn get_all_products(&self) -> Result<Vec<Product>> {
        tokio::time::sleep(LIST_DELAY).await;
        self.load_all()
    }

    pub async fn get_product(&self, id: &str) -> Result<Product> {
        tokio::time::sleep(GET_DELAY).await;
        self.load(id)
    }

    pub async fn create_product(&self, data: &ProductDraft) -> Result<Product> {
        let (price, quantity) = checked_fields(data)?;
        tokio::time::sleep(WRITE_DELAY).await;

        let id = self.generate_id();
        let product = Product {
            id,
            name: data.name.clone(),
            price,
            quantity,
            category: data.category.clone(),
            description: data.description.clone(),
            created_at: Utc::now(),
            updated_at: None,
        };
        self.persist(&product)?;
        tracing::info!("Created product {} ({})", product.name, product.id);

        Ok(product)
    }

    pub async fn update_product(&self, id: &str, data: &ProductDraft) -> Result<Product> {
        // Existence check first: an update of a missing id must fail without
        // touching the store.
        let existing = self.get_product(id).await?;
        let (price, quantity) = checked_fields(data)?;
        tokio::time::sleep(WRITE_DELAY).await;

        let product = Product {
            id: existing.id,
            name: data.name.clone(),
            price,
            quantity,
            category: data.category.clone(),
            description: data.description.clone(),
            created_at: existing.created_at,
            updated_at: Some(Utc::now()),
        };
        self.persist(&product)?;
        tracing::info!("Updated product {} ({})", product.name, product.id);

        Ok(product)
    }

    pub async fn delete_product(&self, id: &str) -> Result<()> {
        tokio::time::sleep(DELETE_DELAY).await;

        self.store
            .remove(&product_key(id))
            .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;
        tracing::info!("Deleted product {}", id);

        Ok(())
    }

    pub async fn search_products(&self, query: &str) -> Result<Vec<Product>> {
        tokio::time::sleep(LIST_DELAY).await;

        let products = self.load_all()?;
        if query.is_empty() {
            return Ok(products);
        }

        let term = query.to_lowercase();
        Ok(products
            .into_iter()
            .filter(|product| {
                product.name.to_lowercase().contains(&term)
                    || product.description.to_lowercase().contains(&term)
            })
            .collect())
    }

    pub async fn get_products_by_category(&self, category: &str) -> Result<Vec<Product>> {
        tokio::time::sleep(LIST_DELAY).await;

        let products = self.load_all()?;
        if category.is_empty() || category == "all" {
            return Ok(products);
        }

        Ok(products.into_iter().filter(|product| product.category == category).collect())
    }

    fn load(&self, id: &str) -> Result<Product> {
        let json = self
            .store
            .get(&product_key(id))
            .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;
        Ok(serde_json::from_str(&json)?)
    }

    fn load_all(&self) -> Result<Vec<Product>> {
        let mut products = Vec::new();
        for key in self.store.keys_with_prefix(PRODUCT_KEY_PREFIX) {
            if let Some(json) = self.store.get(&key) {
                products.push(serde_json::from_str(&json)?);
            }
        }
        Ok(products)
    }

    fn persist(&self, product: &Product) -> Result<()> {
        let json = serde_json::to_string(product)?;
        self.store.set(&product_key(&product.id), json);
        Ok(())
    }

    // Timestamp-derived id, bumped past any occupied key so two creates in
    // the same millisecond stay distinct.
    fn generate_id(&self) -> String {
        let mut candidate = Utc::now().timestamp_millis();
        while self.store.get(&product_key(&candidate.to_string())).is_some() {
            candidate += 1;
        }
        candidate.to_string()
    }
}

fn checked_fields(data: &ProductDraft) -> Result<(f64, u32)> {
    let report = validate_product(data);
    if let Some(message) = report.first_error() {
        return Err(AppError::Validation(message.to_string()));
    }

    // Both parses are guaranteed by the report being clean.
    let price = data
        .price
        .trim()
        .parse::<f64>()
        .map_err(|_| AppError::InternalError("Price unparsable after validation".to_string()))?;
    let quantity = data
        .quantity
        .trim()
        .parse::<f64>()
        .map_err(|_| AppError::InternalError("Quantity unparsable after validation".to_string()))?
        as u32;

    Ok((price, quantity))
}
