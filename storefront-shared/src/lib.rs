pub mod models;

pub use models::member::{Grade, Member, MemberId};
