mod memory;

pub use memory::MemoryStore;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const PRODUCT_KEY_PREFIX: &str = "product:";

pub fn product_key(id: &str) -> String {
    format!("{}{}", PRODUCT_KEY_PREFIX, id)
}

/// Persistence seam for the simulated backend. Implementations hold
/// JSON-encoded records; keys are plain strings (`product:<id>`, `token`,
/// `user`). Methods are synchronous, the service layer injects latency.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str) -> Option<String>;
    fn keys_with_prefix(&self, prefix: &str) -> Vec<String>;
}
