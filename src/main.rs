use std::sync::Arc;

use flogin::models::ProductDraft;
use flogin::services::{AuthService, ProductService};
use flogin::storage::MemoryStore;
use flogin::ApiConfig;
use tracing::Level;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    if let Err(e) = run().await {
        tracing::error!("Smoke run failed: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> flogin::Result<()> {
    let config = ApiConfig::from_env()?;
    tracing::info!("Remote API configured at {}", config.base_url);

    let store = Arc::new(MemoryStore::new());
    let auth = AuthService::new(store.clone());
    let products = ProductService::new(store);

    let session = auth.login("test@example.com", "password123").await?;
    tracing::info!("Logged in as {} ({})", session.user.name, session.user.role);

    let draft = ProductDraft {
        name: "Laptop Dell".to_string(),
        price: "15000000".to_string(),
        quantity: "5".to_string(),
        category: "Điện tử".to_string(),
        description: "Laptop Dell mới với cấu hình cao".to_string(),
    };
    let created = products.create_product(&draft).await?;
    tracing::info!("Created product {} ({})", created.name, created.id);

    let all = products.get_all_products().await?;
    tracing::info!("Store holds {} product(s)", all.len());

    let matches = products.search_products("dell").await?;
    tracing::info!("Search for 'dell' matched {} product(s)", matches.len());

    products.delete_product(&created.id).await?;
    auth.logout().await;

    Ok(())
}
