pub mod models;
pub mod service;

pub use models::Order;
pub use service::{OrderError, OrderService, OrderServiceImpl};
