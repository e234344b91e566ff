pub mod app_config;
pub mod memory_repo;

pub use app_config::{Config, DiscountConfig, PolicyKind};
pub use memory_repo::MemoryMemberRepository;
