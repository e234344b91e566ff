pub mod service;

pub use service::{MemberService, MemberServiceImpl};
