pub mod wiring;

pub use wiring::AppConfig;
