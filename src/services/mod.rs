mod auth_service;
mod product_service;

pub use auth_service::AuthService;
pub use product_service::ProductService;
