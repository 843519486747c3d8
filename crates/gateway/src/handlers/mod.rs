//! HTTP request handlers.

pub mod auth_handler;
pub mod health_handler;
pub mod payment_handler;
pub mod product_handler;
pub mod search_handler;

pub use auth_handler::auth_routes;
pub use health_handler::health_routes;
pub use payment_handler::payment_routes;
pub use product_handler::product_routes;
pub use search_handler::search_routes;
