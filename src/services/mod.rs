pub mod ai_service;
pub mod search_service;

pub use ai_service::*;
pub use search_service::*;
