mod credentials;
mod product;

pub use credentials::*;
pub use product::*;
